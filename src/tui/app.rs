//! Editor application state and logic.

use crate::binary::Word;
use crate::cpu::{AddrSpace, Cpu, Memory, RAM_SIZE};
use crate::image::{next_free_image_path, save_image};
use std::path::PathBuf;

/// Milliseconds between executed instructions in interactive runs.
pub const CYCLE_MILLIS: u64 = 333;

/// What the editor is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Cursor-driven bit editing.
    Edit,
    /// Executing one instruction per tick.
    Running,
    /// Execution paused by a keypress; resumes on the next.
    Paused,
    /// Program halted; waiting for a key before restoring memory.
    Finished,
    /// Next key's character code becomes the current data word.
    InsertChar,
    /// Typed digits accumulate into the current data word.
    InsertNumber,
}

/// Cursor over the memory grid: one bit in one word of one space.
#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    pub space: AddrSpace,
    pub row: usize,
    pub bit: usize,
}

impl Cursor {
    fn new() -> Self {
        Self {
            space: AddrSpace::Code,
            row: 0,
            bit: 0,
        }
    }

    pub fn up(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.row + 1 < RAM_SIZE {
            self.row += 1;
        }
    }

    pub fn left(&mut self) {
        self.bit = self.bit.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.bit + 1 < Word::WIDTH {
            self.bit += 1;
        }
    }

    pub fn switch_space(&mut self) {
        self.space = self.space.other();
    }
}

/// Editor application state.
pub struct EditorApp {
    /// The machine's memory, edited in place.
    pub mem: Memory,
    /// The CPU; rebuilt fresh for every run.
    pub cpu: Cpu,
    /// Cursor position.
    pub cursor: Cursor,
    /// Current mode.
    pub mode: Mode,
    /// Status message to display.
    pub status: String,
    /// Should we quit?
    pub should_quit: bool,
    /// File the image was loaded from / last saved to.
    pub file: Option<PathBuf>,
    /// Memory as it was when the run started; put back afterwards so a run
    /// never corrupts the edited program.
    snapshot: Option<Memory>,
    /// Value accumulated in insert-number mode.
    number: i64,
}

impl EditorApp {
    /// Create an editor over the given memory.
    pub fn new(mem: Memory, file: Option<PathBuf>) -> Self {
        Self {
            mem,
            cpu: Cpu::new(),
            cursor: Cursor::new(),
            mode: Mode::Edit,
            status: "Ready. Space toggles a bit, Enter runs, q quits.".into(),
            should_quit: false,
            file,
            snapshot: None,
            number: 0,
        }
    }

    // ==================== Editing ====================

    /// Toggle the bit under the cursor.
    pub fn toggle_bit(&mut self) {
        let current = self
            .mem
            .read_bit(self.cursor.space, self.cursor.row, self.cursor.bit);
        self.mem
            .write_bit(self.cursor.space, self.cursor.row, self.cursor.bit, !current);
    }

    /// Set the bit under the cursor and advance to the next bit.
    pub fn set_bit(&mut self, value: bool) {
        self.mem
            .write_bit(self.cursor.space, self.cursor.row, self.cursor.bit, value);
        self.cursor.right();
    }

    /// Zero the word under the cursor and return to its first bit.
    pub fn erase_word(&mut self) {
        self.mem
            .write(self.cursor.space, self.cursor.row, Word::zero());
        self.cursor.bit = 0;
    }

    /// Replace the word under the cursor.
    pub fn set_word(&mut self, word: Word) {
        self.mem.write(self.cursor.space, self.cursor.row, word);
    }

    /// Swap the current word with its upper neighbor, following it.
    pub fn move_word_up(&mut self) {
        if self.cursor.row == 0 {
            return;
        }
        self.swap_rows(self.cursor.row, self.cursor.row - 1);
        self.cursor.up();
    }

    /// Swap the current word with its lower neighbor, following it.
    pub fn move_word_down(&mut self) {
        if self.cursor.row + 1 >= RAM_SIZE {
            return;
        }
        self.swap_rows(self.cursor.row, self.cursor.row + 1);
        self.cursor.down();
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        let wa = self.mem.read(self.cursor.space, a);
        let wb = self.mem.read(self.cursor.space, b);
        self.mem.write(self.cursor.space, a, wb);
        self.mem.write(self.cursor.space, b, wa);
    }

    // ==================== Insert modes ====================

    /// Enter insert-char mode. Only data words hold character values.
    pub fn engage_insert_char(&mut self) {
        if self.cursor.space == AddrSpace::Data {
            self.mode = Mode::InsertChar;
            self.status = "Insert char: next key is stored as its code.".into();
        }
    }

    /// Store a typed character's code and leave insert-char mode.
    pub fn insert_char(&mut self, c: char) {
        self.set_word(Word::from_int_saturating(c as i64));
        self.cursor.down();
        self.mode = Mode::Edit;
        self.status = format!("Inserted '{}' ({})", c, c as u32);
    }

    /// Enter insert-number mode.
    pub fn engage_insert_number(&mut self) {
        if self.cursor.space == AddrSpace::Data {
            self.mode = Mode::InsertNumber;
            self.number = 0;
            self.status = "Insert number: type digits, any other key ends.".into();
        }
    }

    /// Accumulate one typed digit into the current data word.
    pub fn insert_digit(&mut self, digit: u32) {
        // Cap the accumulator so held-down keys cannot overflow it; the
        // stored word saturates at 255 regardless.
        self.number = (self.number * 10 + i64::from(digit)).min(1000);
        self.set_word(Word::from_int_saturating(self.number));
        self.status = format!("Number: {}", self.number);
    }

    /// Leave insert-number mode.
    pub fn end_insert_number(&mut self) {
        self.mode = Mode::Edit;
        self.status = "Ready.".into();
    }

    // ==================== Execution ====================

    /// Snapshot memory and start executing from a fresh CPU.
    pub fn start_run(&mut self) {
        self.snapshot = Some(self.mem.clone());
        self.cpu = Cpu::new();
        self.mode = Mode::Running;
        self.status = "Running. Esc cancels, any other key pauses.".into();
    }

    /// Execute one instruction of a continuous run.
    pub fn tick(&mut self) {
        if self.mode != Mode::Running {
            return;
        }
        if !self.cpu.step(&mut self.mem) {
            self.mode = Mode::Finished;
            self.status = format!(
                "Halted after {} cycles. Press any key.",
                self.cpu.cycles
            );
        }
    }

    /// Pause a running program.
    pub fn pause(&mut self) {
        self.mode = Mode::Paused;
        self.status = "Paused. Esc cancels, any other key resumes.".into();
    }

    /// Resume a paused program.
    pub fn resume(&mut self) {
        self.mode = Mode::Running;
        self.status = "Running. Esc cancels, any other key pauses.".into();
    }

    /// End the run: put the pre-run memory back and rebuild the CPU.
    pub fn finish_run(&mut self) {
        if let Some(saved) = self.snapshot.take() {
            self.mem = saved;
        }
        self.cpu = Cpu::new();
        self.mode = Mode::Edit;
        self.status = "Memory restored. Ready.".into();
    }

    // ==================== Saving ====================

    /// Save to the first free `saved-ram-N` file.
    pub fn save_new(&mut self) {
        let path = next_free_image_path();
        self.save_to(path);
    }

    /// Save to the loaded file, or a fresh name when none is loaded.
    pub fn save_current(&mut self) {
        let path = self.file.clone().unwrap_or_else(next_free_image_path);
        self.save_to(path);
    }

    fn save_to(&mut self, path: PathBuf) {
        match save_image(&path, &self.mem) {
            Ok(()) => {
                self.status = format!("Saved to {}", path.display());
                self.file = Some(path);
            }
            Err(e) => {
                self.status = format!("Save failed: {}", e);
            }
        }
    }
}

/// Run the interactive editor over a memory image.
pub fn run_editor(mem: Memory, file: Option<PathBuf>) -> std::io::Result<()> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    };
    use ratatui::prelude::*;
    use std::io::stdout;
    use std::time::{Duration, Instant};

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = EditorApp::new(mem, file);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            super::ui::draw(frame, &app);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key.code);
                }
            }
        }

        // Tick for continuous running
        if app.mode == Mode::Running && last_tick.elapsed() >= Duration::from_millis(CYCLE_MILLIS)
        {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}

fn handle_key(app: &mut EditorApp, code: crossterm::event::KeyCode) {
    use crossterm::event::KeyCode;

    match app.mode {
        Mode::Running => match code {
            KeyCode::Esc => app.finish_run(),
            _ => app.pause(),
        },
        Mode::Paused => match code {
            KeyCode::Esc => app.finish_run(),
            _ => app.resume(),
        },
        Mode::Finished => app.finish_run(),
        Mode::InsertChar => match code {
            KeyCode::Esc => {
                app.mode = Mode::Edit;
                app.status = "Ready.".into();
            }
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        },
        Mode::InsertNumber => match code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                app.insert_digit(c.to_digit(10).unwrap_or(0));
            }
            // The terminating key also acts normally
            _ => {
                app.end_insert_number();
                handle_key(app, code);
            }
        },
        Mode::Edit => match code {
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Enter => app.start_run(),

            // Movement
            KeyCode::Up | KeyCode::Char('k') => app.cursor.up(),
            KeyCode::Down | KeyCode::Char('j') => app.cursor.down(),
            KeyCode::Left | KeyCode::Char('h') => app.cursor.left(),
            KeyCode::Right | KeyCode::Char('l') => app.cursor.right(),
            KeyCode::Tab | KeyCode::Char('t') => app.cursor.switch_space(),
            KeyCode::Char('g') | KeyCode::Home => app.cursor.bit = 0,
            KeyCode::Char('G') | KeyCode::End => app.cursor.bit = Word::WIDTH - 1,

            // Manipulation
            KeyCode::Char(' ') => app.toggle_bit(),
            KeyCode::Char('f') => app.set_bit(true),
            KeyCode::Char('d') => app.set_bit(false),
            KeyCode::Char('x') | KeyCode::Delete => app.erase_word(),
            KeyCode::Char('K') | KeyCode::PageUp => app.move_word_up(),
            KeyCode::Char('J') | KeyCode::PageDown => app.move_word_down(),

            // Insert modes
            KeyCode::Char('i') => app.engage_insert_char(),
            KeyCode::Char('I') => app.engage_insert_number(),

            // Save
            KeyCode::Char('s') => app.save_new(),
            KeyCode::Char('S') => app.save_current(),

            _ => {}
        },
    }
}
