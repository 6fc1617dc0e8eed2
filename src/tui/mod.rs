//! Interactive terminal editor.
//!
//! Displays both address spaces as grids of lightbulb glyphs and provides:
//! - Cursor-driven bit editing with insert-char and insert-number modes
//! - Run mode at a fixed cycle frequency with pause and cancel
//! - Automatic memory restore after every run
//! - Quick-save to numbered image files

mod app;
mod ui;

pub use app::{run_editor, Cursor, EditorApp, Mode, CYCLE_MILLIS};
