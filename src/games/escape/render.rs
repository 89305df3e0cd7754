//! Breaker Room rendering.
//!
//! Layout: status header + scene panel + message log. End screens replace
//! the whole area.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::time::{format_clock, TICKS_PER_SEC};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::circuit::gate::GateKind;
use super::circuit::swap::Selection;
use super::decryption::SEQUENCE_LEN;
use super::state::{EscapeState, Phase, Room, RoomAction, Scene};

pub fn render(
    state: &EscapeState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    if state.phase != Phase::Playing {
        render_end(state, f, area, click_state);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(6),
        ])
        .split(area);

    render_header(state, f, chunks[0]);
    match state.scene {
        Scene::Room => render_room(state, f, chunks[1], click_state),
        Scene::LogicPuzzle => render_logic(state, f, chunks[1], click_state),
        Scene::Decryption => render_decryption(state, f, chunks[1], click_state),
        Scene::AiTerminal => render_ai_terminal(state, f, chunks[1], click_state),
    }
    render_log(state, f, chunks[2]);
}

fn borders_for(area_width: u16) -> Borders {
    if is_narrow_layout(area_width) {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    }
}

fn panel(title: &str, width: u16) -> Block<'static> {
    Block::default()
        .borders(borders_for(width))
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
}

fn hints_label(state: &EscapeState) -> String {
    match state.hints_left {
        None => "∞".to_string(),
        Some(n) => n.to_string(),
    }
}

// ── Header ──────────────────────────────────────────────────

fn render_header(state: &EscapeState, f: &mut Frame, area: Rect) {
    let secs_left = state.ticks_left / TICKS_PER_SEC;
    let clock_color = if secs_left < 30 {
        Color::Red
    } else if secs_left < 60 {
        Color::Yellow
    } else {
        Color::White
    };
    let on_off = |on: bool, yes: &'static str, no: &'static str| {
        if on {
            Span::styled(yes, Style::default().fg(Color::Green))
        } else {
            Span::styled(no, Style::default().fg(Color::Red))
        }
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", format_clock(state.ticks_left)),
            Style::default().fg(clock_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ Power ", Style::default().fg(Color::DarkGray)),
        on_off(state.logic.is_solved(), "ON", "OFF"),
        Span::styled(" │ Lock ", Style::default().fg(Color::DarkGray)),
        on_off(state.decryption.is_solved(), "OPEN", "SEALED"),
    ];
    if state.hints_enabled() {
        spans.push(Span::styled(
            format!(" │ Hints {}", hints_label(state)),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if state.chat.is_busy() {
        spans.push(Span::styled(
            " │ AI typing…",
            Style::default().fg(Color::Cyan),
        ));
    }

    let title = format!("Breaker Room · {}", state.difficulty.name());
    f.render_widget(
        Paragraph::new(Line::from(spans)).block(panel(&title, area.width)),
        area,
    );
}

// ── Rooms ───────────────────────────────────────────────────

fn room_action_label(state: &EscapeState, action: RoomAction) -> String {
    match action {
        RoomAction::OpenDecryption if state.decryption.is_solved() => {
            "Look at the terminal (unlocked)".into()
        }
        RoomAction::OpenDecryption => "Sit down at the terminal".into(),
        RoomAction::OpenBreakerPanel if state.logic.is_solved() => {
            "Look at the breaker panel (power on)".into()
        }
        RoomAction::OpenBreakerPanel => "Open the breaker panel".into(),
        RoomAction::OpenAiTerminal => "Talk to the AI terminal".into(),
        RoomAction::AskAssistant => format!("Ask the AI for a hint ({} left)", hints_label(state)),
        RoomAction::UseExitDoor if state.exit_unlocked() => "Walk out the exit door".into(),
        RoomAction::UseExitDoor => "Try the exit door".into(),
    }
}

fn push_choice(cl: &mut ClickableList, index: usize, label: String) {
    cl.push_clickable(
        Line::from(vec![
            Span::styled(
                format!(" [{}] ", index + 1),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(label, Style::default().fg(Color::White)),
        ]),
        CHOICE_BASE + index as u16,
    );
}

fn render_room(
    state: &EscapeState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let mut tabs = TabBar::new("│").block(
        Block::default()
            .borders(borders_for(area.width))
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    for room in Room::ALL {
        let style = if room == state.room {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        tabs = tabs.tab(room.name(), style, ROOM_TAB_BASE + room.index() as u16);
    }
    {
        let mut cs = click_state.borrow_mut();
        tabs.render(f, chunks[0], &mut cs);
    }

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        format!(" {}", state.room.description()),
        Style::default().fg(Color::Gray),
    )));
    cl.push(Line::from(""));
    for (i, action) in state.room_actions().into_iter().enumerate() {
        push_choice(&mut cl, i, room_action_label(state, action));
    }
    cl.push(Line::from(""));
    if let Some(left) = state.room.left() {
        cl.push_clickable(
            Line::from(Span::styled(
                format!(" [H] ← {}", left.name()),
                Style::default().fg(Color::DarkGray),
            )),
            GO_LEFT,
        );
    }
    if let Some(right) = state.room.right() {
        cl.push_clickable(
            Line::from(Span::styled(
                format!(" [L] {} →", right.name()),
                Style::default().fg(Color::DarkGray),
            )),
            GO_RIGHT,
        );
    }

    let block = panel(state.room.name(), area.width);
    let mut cs = click_state.borrow_mut();
    cl.register_targets(chunks[1], &mut cs, 1, 1);
    drop(cs);
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(block),
        chunks[1],
    );
}

// ── Breaker panel ───────────────────────────────────────────

fn bit(value: bool) -> Span<'static> {
    if value {
        Span::styled("1", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::styled("0", Style::default().fg(Color::DarkGray))
    }
}

fn render_logic(
    state: &EscapeState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let narrow = is_narrow_layout(area.width);
    let chunks = if narrow {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(26)])
            .split(area)
    };

    let logic = &state.logic;
    let wiring = logic.wiring();
    let trail = logic.trail();
    let gates = logic.current_assembly_view();
    let armed = match logic.selection() {
        Selection::Armed(slot) => Some(slot),
        Selection::Idle => None,
    };

    let mut cl = ClickableList::new();
    let mut inputs = vec![Span::styled(" Inputs  ", Style::default().fg(Color::DarkGray))];
    for &b in trail.inputs() {
        inputs.push(bit(b));
        inputs.push(Span::raw(" "));
    }
    cl.push(Line::from(inputs));

    for layer in 1..=wiring.layer_count() {
        let label = if layer == wiring.layer_count() {
            " Output".to_string()
        } else {
            format!(" Layer {}", layer)
        };
        cl.push(Line::from(Span::styled(label, Style::default().fg(Color::DarkGray))));
        for slot in wiring.slots_in_layer(layer) {
            let (Some(wire), Some(&gate)) = (wiring.wires().get(slot), gates.get(slot)) else {
                continue;
            };
            let [a, b] = wire.inputs;
            let read = |node: usize| trail.get(node).unwrap_or(false);
            let mut gate_style = Style::default().fg(gate.color()).add_modifier(Modifier::BOLD);
            if armed == Some(slot) {
                gate_style = gate_style.add_modifier(Modifier::REVERSED);
            }
            cl.push_clickable(
                Line::from(vec![
                    Span::styled(
                        format!("  [{}] ", slot + 1),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(format!("{:<5}", gate.name()), gate_style),
                    Span::styled(" (", Style::default().fg(Color::DarkGray)),
                    bit(read(a)),
                    Span::styled(",", Style::default().fg(Color::DarkGray)),
                    bit(read(b)),
                    Span::styled(") → ", Style::default().fg(Color::DarkGray)),
                    bit(read(wire.output)),
                ]),
                GATE_SLOT_BASE + slot as u16,
            );
        }
    }

    cl.push(Line::from(""));
    let status = if logic.is_solved() {
        Span::styled(" BREAKER ON", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else if armed.is_some() {
        Span::styled(" Pick a slot to swap with", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" Pick two slots to swap their gates", Style::default().fg(Color::Gray))
    };
    cl.push(Line::from(status));
    if state.hints_enabled() {
        cl.push_clickable(
            Line::from(Span::styled(
                format!(" [?] Ask the AI ({} left)", hints_label(state)),
                Style::default().fg(Color::DarkGray),
            )),
            HINT,
        );
    }
    cl.push_clickable(
        Line::from(Span::styled(" [0] Back", Style::default().fg(Color::DarkGray))),
        BACK,
    );

    let block = panel("Breaker Panel", area.width);
    let mut cs = click_state.borrow_mut();
    cl.register_targets(chunks[0], &mut cs, 1, 1);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), chunks[0]);

    if !narrow {
        render_truth_tables(f, chunks[1]);
    }
}

fn render_truth_tables(f: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        " a b │ 00 01 10 11",
        Style::default().fg(Color::DarkGray),
    ))];
    for gate in GateKind::ALL {
        let mut spans = vec![Span::styled(
            format!(" {:<4}│ ", gate.name()),
            Style::default().fg(gate.color()),
        )];
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            spans.push(bit(gate.eval(a, b)));
            spans.push(Span::raw("  "));
        }
        lines.push(Line::from(spans));
    }
    f.render_widget(
        Paragraph::new(lines).block(panel("Gates", area.width)),
        area,
    );
}

// ── Decryption terminal ─────────────────────────────────────

fn code_boxes(state: &EscapeState) -> Line<'static> {
    let attempt: Vec<char> = state
        .decryption
        .last_attempt()
        .map(|a| a.chars().collect())
        .unwrap_or_default();
    let color = if state.decryption.is_solved() {
        Color::Green
    } else if attempt.is_empty() {
        Color::DarkGray
    } else {
        Color::Red
    };
    let mut spans = vec![Span::styled(" Code ", Style::default().fg(Color::DarkGray))];
    for i in 0..SEQUENCE_LEN {
        let c = attempt.get(i).copied().unwrap_or('_');
        spans.push(Span::styled("┃", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            format!(" {} ", c),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled("┃", Style::default().fg(Color::DarkGray)));
    Line::from(spans)
}

fn render_decryption(
    state: &EscapeState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let narrow = is_narrow_layout(area.width);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(6)])
        .split(area);
    let top = Layout::default()
        .direction(if narrow { Direction::Vertical } else { Direction::Horizontal })
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[0]);

    // Listing
    let entry = state.decryption.entry();
    let mut listing = vec![
        Line::from(Span::styled(
            format!(" {}", entry.description),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];
    for line in entry.algorithm.lines() {
        listing.push(Line::from(Span::styled(
            format!(" {}", line),
            Style::default().fg(Color::LightGreen),
        )));
    }
    f.render_widget(
        Paragraph::new(listing).block(panel("Terminal", top[0].width)),
        top[0],
    );

    render_chat(state, f, top[1]);

    let mut cl = ClickableList::new();
    cl.push(code_boxes(state));
    push_prompt(&mut cl, state, "Hint");
    let block = panel("Enter the faulty line numbers", rows[1].width);
    let mut cs = click_state.borrow_mut();
    cl.register_targets(rows[1], &mut cs, 1, 1);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), rows[1]);
}

// ── Chat ────────────────────────────────────────────────────

/// Transcript panel, pinned to the newest line.
fn render_chat(state: &EscapeState, f: &mut Frame, area: Rect) {
    let chat_lines: Vec<Line> = state
        .chat
        .transcript()
        .iter()
        .map(|t| {
            let color = if t.starts_with("user>") {
                Color::White
            } else if t.starts_with("ai>") {
                Color::Cyan
            } else {
                Color::Red
            };
            Line::from(Span::styled(t.clone(), Style::default().fg(color)))
        })
        .collect();
    let chat_block = panel("AI", area.width);
    let inner = chat_block.inner(area);
    let chat = Paragraph::new(chat_lines).wrap(Wrap { trim: false });
    let overflow = chat.line_count(inner.width).saturating_sub(inner.height as usize);
    f.render_widget(chat.scroll((overflow as u16, 0)).block(chat_block), area);
}

/// Input line, hint button and back button shared by both terminals.
fn push_prompt(cl: &mut ClickableList, state: &EscapeState, hint_label: &str) {
    let cursor = if state.chat.is_busy() { "…" } else { "_" };
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" > ", Style::default().fg(Color::Yellow)),
            Span::styled(state.input.clone(), Style::default().fg(Color::White)),
            Span::styled(cursor, Style::default().fg(Color::Yellow)),
        ]),
        SUBMIT,
    );
    if state.hints_enabled() {
        cl.push_clickable(
            Line::from(Span::styled(
                format!(" [?] {} ({} left)", hint_label, hints_label(state)),
                Style::default().fg(Color::DarkGray),
            )),
            HINT,
        );
    }
    cl.push_clickable(
        Line::from(Span::styled(" [Esc] Back", Style::default().fg(Color::DarkGray))),
        BACK,
    );
}

fn render_ai_terminal(
    state: &EscapeState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(5)])
        .split(area);
    render_chat(state, f, rows[0]);

    let mut cl = ClickableList::new();
    push_prompt(&mut cl, state, "What next?");
    let block = panel("Office terminal", rows[1].width);
    let mut cs = click_state.borrow_mut();
    cl.register_targets(rows[1], &mut cs, 1, 1);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), rows[1]);
}

// ── Log ─────────────────────────────────────────────────────

fn render_log(state: &EscapeState, f: &mut Frame, area: Rect) {
    let block = panel("Log", area.width);
    let visible = block.inner(area).height as usize;
    let start = state.log.len().saturating_sub(visible);
    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(format!(" > {}", entry.text), style))
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ── End screens ─────────────────────────────────────────────

fn render_end(
    state: &EscapeState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let (title, color, text) = match state.phase {
        Phase::Escaped => ("ESCAPED", Color::Green, "The night air hits your face. You made it out."),
        _ => ("TIME UP", Color::Red, "The emergency lights fade. You are stuck here."),
    };

    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        format!("  {}", title),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        format!("  {}", text),
        Style::default().fg(Color::White),
    )));
    cl.push(Line::from(""));
    let used = state.total_ticks.saturating_sub(state.ticks_left);
    cl.push(Line::from(Span::styled(
        format!("  Time used   {}", format_clock(used)),
        Style::default().fg(Color::Gray),
    )));
    cl.push(Line::from(Span::styled(
        format!("  Hints used  {}", state.hints_used),
        Style::default().fg(Color::Gray),
    )));
    cl.push(Line::from(Span::styled(
        format!("  Difficulty  {}", state.difficulty.name()),
        Style::default().fg(Color::Gray),
    )));
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            "  [R] Back to menu",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        RETURN_TO_MENU,
    );

    let block = panel("Breaker Room", area.width);
    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}
