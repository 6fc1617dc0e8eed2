//! UI rendering for the editor.

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::app::{EditorApp, Mode};
use crate::binary::{Word, GLYPH_CLEAR, GLYPH_SET};
use crate::cpu::AddrSpace;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &EditorApp) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(frame.area());

    // Left side: the two address spaces
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    draw_space(frame, left_chunks[0], app, AddrSpace::Code);
    draw_space(frame, left_chunks[1], app, AddrSpace::Data);

    // Right side: CPU state, status, help
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Min(6),
        ])
        .split(chunks[1]);

    draw_cpu(frame, right_chunks[0], app);
    draw_status(frame, right_chunks[1], app);
    draw_help(frame, right_chunks[2]);
}

/// Draw one address space as rows of lightbulb glyphs.
fn draw_space(frame: &mut Frame, area: Rect, app: &EditorApp, space: AddrSpace) {
    let executing = matches!(app.mode, Mode::Running | Mode::Paused | Mode::Finished);
    let pc = app.cpu.regs.pc.to_unsigned() as usize;

    let items: Vec<ListItem> = app
        .mem
        .words(space)
        .iter()
        .enumerate()
        .map(|(row, word)| {
            let is_pc_row = executing && space == AddrSpace::Code && row == pc;
            let marker = if is_pc_row { "▶ " } else { "  " };

            let mut spans = vec![Span::raw(format!("{}{:2}: ", marker, row))];
            spans.extend(bit_spans(app, space, row, word));
            spans.push(Span::styled(
                format!("  {:3}", word.to_unsigned()),
                Style::default().fg(Color::DarkGray),
            ));
            if space == AddrSpace::Code {
                spans.push(Span::styled(
                    format!("  {}", crate::cpu::decode(*word)),
                    Style::default().fg(Color::DarkGray),
                ));
            }

            let style = if is_pc_row {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let title = match space {
        AddrSpace::Code => " Code ",
        AddrSpace::Data => " Data ",
    };
    let border = if app.cursor.space == space && !executing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border),
    );

    frame.render_widget(list, area);
}

/// One styled span per bit, with the cursor bit highlighted.
fn bit_spans<'a>(app: &EditorApp, space: AddrSpace, row: usize, word: &Word) -> Vec<Span<'a>> {
    let editing = app.mode == Mode::Edit
        || app.mode == Mode::InsertChar
        || app.mode == Mode::InsertNumber;

    (0..Word::WIDTH)
        .map(|bit| {
            let set = word.get(bit);
            let glyph = if set { GLYPH_SET } else { GLYPH_CLEAR };

            let mut style = if set {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let under_cursor = editing
                && app.cursor.space == space
                && app.cursor.row == row
                && app.cursor.bit == bit;
            if under_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }

            Span::styled(glyph.to_string(), style)
        })
        .collect()
}

/// Draw CPU state: accumulator, program counter, cycles, instruction.
fn draw_cpu(frame: &mut Frame, area: Rect, app: &EditorApp) {
    let instr = app
        .cpu
        .current_instruction()
        .map_or_else(|| "-".into(), |i| i.to_string());

    let content = vec![
        Line::from(vec![
            Span::raw("ACC: "),
            Span::styled(
                format!("{}", app.cpu.regs.acc),
                Style::default().fg(Color::White),
            ),
            Span::raw(format!(" = {}", app.cpu.regs.acc.to_unsigned())),
        ]),
        Line::from(vec![
            Span::raw("PC:  "),
            Span::styled(
                format!("{}", app.cpu.regs.pc),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(format!(" = {}", app.cpu.regs.pc.to_unsigned())),
        ]),
        Line::from(vec![
            Span::raw("Cycles: "),
            Span::styled(
                format!("{}", app.cpu.cycles),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::raw("Instr:  "),
            Span::styled(instr, Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::raw("State:  "),
            Span::styled(
                format!("{:?}", app.mode),
                if app.mode == Mode::Running {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Gray)
                },
            ),
        ]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" CPU ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );

    frame.render_widget(paragraph, area);
}

/// Draw status bar.
fn draw_status(frame: &mut Frame, area: Rect, app: &EditorApp) {
    let status = Paragraph::new(app.status.clone())
        .style(Style::default().fg(Color::White))
        .block(Block::default().title(" Status ").borders(Borders::ALL));

    frame.render_widget(status, area);
}

/// Draw help panel.
fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(vec![
        Line::from("hjkl/arrows: Move  Tab: Switch space  Space: Toggle"),
        Line::from("f/d: Set/clear bit  x: Erase word  J/K: Move word"),
        Line::from("i: Insert char  I: Insert number  (data space)"),
        Line::from("Enter: Run  Esc: Cancel run  any key: Pause"),
        Line::from("s: Save new file  S: Save current  q: Quit"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default().title(" Help ").borders(Borders::ALL));

    frame.render_widget(help, area);
}
