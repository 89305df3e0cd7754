//! Title menu: pick difficulty, time limit and circuit size, then start.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::config::{Config, Difficulty, GateLayout};
use crate::games::{MENU_DIFFICULTY_BASE, MENU_LAYOUT, MENU_START, MENU_TIME_LIMIT};
use crate::input::{ClickState, InputEvent};
use crate::widgets::ClickableList;

const DIFFICULTIES: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    None,
    /// A setting changed and should be saved.
    Changed,
    Start,
}

pub fn handle_input(config: &mut Config, event: &InputEvent) -> MenuAction {
    match event {
        InputEvent::Key(c @ '1'..='3') => set_difficulty(config, (*c as u8 - b'1') as usize),
        InputEvent::Key('t' | 'T') | InputEvent::Click(MENU_TIME_LIMIT) => {
            config.cycle_time_limit();
            MenuAction::Changed
        }
        InputEvent::Key('g' | 'G') | InputEvent::Click(MENU_LAYOUT) => {
            config.layout = config.layout.toggled();
            MenuAction::Changed
        }
        InputEvent::Key('s' | 'S') | InputEvent::Enter | InputEvent::Click(MENU_START) => {
            MenuAction::Start
        }
        InputEvent::Click(id)
            if (MENU_DIFFICULTY_BASE..MENU_DIFFICULTY_BASE + DIFFICULTIES.len() as u16)
                .contains(id) =>
        {
            set_difficulty(config, (id - MENU_DIFFICULTY_BASE) as usize)
        }
        _ => MenuAction::None,
    }
}

fn set_difficulty(config: &mut Config, index: usize) -> MenuAction {
    match DIFFICULTIES.get(index) {
        Some(&d) if d != config.difficulty => {
            config.difficulty = d;
            MenuAction::Changed
        }
        _ => MenuAction::None,
    }
}

fn difficulty_note(d: Difficulty) -> &'static str {
    match d {
        Difficulty::Easy => "unlimited hints",
        Difficulty::Medium => "5 hints",
        Difficulty::Hard => "no AI help",
    }
}

pub fn render(
    config: &Config,
    notice: Option<&str>,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(10)])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        "BREAKER ROOM",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(title, chunks[0]);

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        " The power is out and the door is sealed.",
        Style::default().fg(Color::Gray),
    )));
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        " Difficulty",
        Style::default().fg(Color::DarkGray),
    )));
    for (i, d) in DIFFICULTIES.iter().enumerate() {
        let selected = *d == config.difficulty;
        let style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let marker = if selected { "▶" } else { " " };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" {} [{}] ", marker, i + 1), style),
                Span::styled(format!("{:<7}", d.name()), style),
                Span::styled(difficulty_note(*d), Style::default().fg(Color::DarkGray)),
            ]),
            MENU_DIFFICULTY_BASE + i as u16,
        );
    }
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(vec![
            Span::styled("   [T] Time limit  ", Style::default().fg(Color::White)),
            Span::styled(
                format!("{} min", config.time_limit_minutes),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        MENU_TIME_LIMIT,
    );
    let gates = match config.layout {
        GateLayout::Two => "3 gates",
        GateLayout::Four => "7 gates",
    };
    cl.push_clickable(
        Line::from(vec![
            Span::styled("   [G] Breaker     ", Style::default().fg(Color::White)),
            Span::styled(gates, Style::default().fg(Color::Cyan)),
        ]),
        MENU_LAYOUT,
    );
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            "   [S] Start",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        MENU_START,
    );
    if let Some(text) = notice {
        cl.push(Line::from(""));
        cl.push(Line::from(Span::styled(
            format!(" {}", text),
            Style::default().fg(Color::Red),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let mut cs = click_state.borrow_mut();
    cl.register_targets(chunks[1], &mut cs, 1, 1);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), chunks[1]);
}
