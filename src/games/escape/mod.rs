//! Breaker Room: restore the power, crack the terminal, get out.
//!
//! Rooms use [1]-[4] for hotspots and [H]/[L] to walk. The breaker panel
//! takes slot numbers, [0]/Esc backs out. Both terminals are text prompts.

pub mod actions;
pub mod chat;
pub mod circuit;
pub mod decryption;
pub mod logic;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::config::Config;
use crate::error::CircuitError;
use crate::games::Game;
use crate::input::{ClickState, InputEvent};
use crate::rng::Rng;

use actions::*;
use state::{EscapeState, Phase, Room, Scene};

pub struct EscapeGame {
    state: EscapeState,
}

impl EscapeGame {
    pub fn new(config: &Config, rng: &mut Rng) -> Result<Self, CircuitError> {
        Ok(Self {
            state: EscapeState::new(config, rng)?,
        })
    }
}

impl Game for EscapeGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        let state = &mut self.state;
        if state.phase != Phase::Playing {
            return handle_end(state, event);
        }
        match event {
            InputEvent::Key(ch) => handle_key(state, *ch),
            InputEvent::Click(id) => handle_click(state, *id),
            InputEvent::Enter => logic::submit_input(state),
            InputEvent::Backspace => logic::backspace(state),
            InputEvent::Escape => logic::leave_scene(state),
        }
    }

    fn tick(&mut self, delta_ticks: u32) {
        logic::tick(&mut self.state, delta_ticks);
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }

    fn is_finished(&self) -> bool {
        self.state.finished
    }
}

// ── Input Handling ──────────────────────────────────────────

fn handle_key(state: &mut EscapeState, ch: char) -> bool {
    match state.scene {
        Scene::Room => handle_room_key(state, ch),
        Scene::LogicPuzzle => handle_logic_key(state, ch),
        Scene::Decryption | Scene::AiTerminal => logic::type_char(state, ch),
    }
}

fn handle_click(state: &mut EscapeState, id: u16) -> bool {
    match id {
        BACK => logic::leave_scene(state),
        HINT => logic::request_hint(state),
        SUBMIT => logic::submit_input(state),
        GO_LEFT => logic::go_left(state),
        GO_RIGHT => logic::go_right(state),
        _ if (ROOM_TAB_BASE..ROOM_TAB_BASE + Room::ALL.len() as u16).contains(&id) => {
            let room = Room::ALL[(id - ROOM_TAB_BASE) as usize];
            logic::travel_to(state, room)
        }
        _ if (CHOICE_BASE..CHOICE_BASE + 10).contains(&id) => {
            logic::execute_room_action(state, (id - CHOICE_BASE) as usize)
        }
        _ if id >= GATE_SLOT_BASE && id < RETURN_TO_MENU => {
            logic::select_slot(state, (id - GATE_SLOT_BASE) as usize)
        }
        _ => false,
    }
}

fn handle_room_key(state: &mut EscapeState, ch: char) -> bool {
    match ch {
        'h' | 'H' => logic::go_left(state),
        'l' | 'L' => logic::go_right(state),
        '1'..='4' => logic::execute_room_action(state, (ch as u8 - b'1') as usize),
        _ => false,
    }
}

fn handle_logic_key(state: &mut EscapeState, ch: char) -> bool {
    match ch {
        '0' => logic::leave_scene(state),
        '?' => logic::request_hint(state),
        '1'..='9' => {
            let slot = (ch as u8 - b'1') as usize;
            // keys past the last slot are just keys, not a wiring fault
            slot < state.logic.current_assembly_view().len() && logic::select_slot(state, slot)
        }
        _ => false,
    }
}

fn handle_end(state: &mut EscapeState, event: &InputEvent) -> bool {
    match event {
        InputEvent::Key('r' | 'R') | InputEvent::Enter | InputEvent::Click(RETURN_TO_MENU) => {
            logic::return_to_menu(state)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Difficulty, GateLayout};
    use crate::games::escape::circuit::assembly::PlacementPolicy;
    use crate::games::escape::circuit::gate::GateKind;
    use crate::games::escape::circuit::LogicGatePuzzle;
    use crate::games::escape::decryption::DecryptionPuzzle;

    fn game() -> EscapeGame {
        let mut g = EscapeGame::new(&Config::default(), &mut Rng::new(3)).unwrap();
        g.state.logic = LogicGatePuzzle::new(
            GateLayout::Four,
            PlacementPolicy::Fixed(vec![
                GateKind::Xor,
                GateKind::Xor,
                GateKind::And,
                GateKind::And,
                GateKind::Xor,
                GateKind::And,
                GateKind::And,
            ]),
            &[true; 8],
        )
        .unwrap();
        g.state.decryption = DecryptionPuzzle::with_index(0);
        // collect the greeting so the AI is idle
        g.tick(0);
        g
    }

    fn keys(g: &mut EscapeGame, text: &str) {
        for c in text.chars() {
            g.handle_input(&InputEvent::Key(c));
        }
    }

    #[test]
    fn play_through_with_keys() {
        let mut g = game();

        // Office -> Breaker, open panel, swap 7 and 5
        assert!(g.handle_input(&InputEvent::Key('l')));
        assert_eq!(g.state.room, Room::Breaker);
        assert!(g.handle_input(&InputEvent::Key('1')));
        assert_eq!(g.state.scene, Scene::LogicPuzzle);
        keys(&mut g, "75");
        assert!(g.state.logic.is_solved());
        assert!(g.handle_input(&InputEvent::Key('0')));

        // Breaker -> Control via the tabs, crack the code
        assert!(g.handle_input(&InputEvent::Click(ROOM_TAB_BASE)));
        assert_eq!(g.state.room, Room::Control);
        g.handle_input(&InputEvent::Click(CHOICE_BASE));
        assert_eq!(g.state.scene, Scene::Decryption);
        keys(&mut g, "2357");
        assert!(g.handle_input(&InputEvent::Enter));
        assert!(g.state.decryption.is_solved());
        assert!(g.handle_input(&InputEvent::Escape));

        // Out the door
        g.handle_input(&InputEvent::Key('l'));
        assert_eq!(g.state.room, Room::Office);
        assert!(g.handle_input(&InputEvent::Key('1')));
        assert_eq!(g.state.phase, Phase::Escaped);

        assert!(!g.is_finished());
        assert!(g.handle_input(&InputEvent::Key('r')));
        assert!(g.is_finished());
    }

    #[test]
    fn slot_clicks_route_to_one_handler() {
        let mut g = game();
        g.state.scene = Scene::LogicPuzzle;
        assert!(g.handle_input(&InputEvent::Click(GATE_SLOT_BASE + 6)));
        assert!(g.handle_input(&InputEvent::Click(GATE_SLOT_BASE + 4)));
        assert!(g.state.logic.is_solved());
    }

    #[test]
    fn digits_past_the_last_slot_are_ignored() {
        let mut g = game();
        g.state.scene = Scene::LogicPuzzle;
        let log_len = g.state.log.len();
        assert!(!g.handle_input(&InputEvent::Key('8')));
        assert!(!g.handle_input(&InputEvent::Key('9')));
        assert_eq!(g.state.log.len(), log_len);
        assert_eq!(g.state.logic.selection(), circuit::swap::Selection::Idle);
        assert!(g.handle_input(&InputEvent::Key('7')));
    }

    #[test]
    fn small_panel_takes_three_slot_keys() {
        let config = Config {
            layout: GateLayout::Two,
            ..Config::default()
        };
        let mut g = EscapeGame::new(&config, &mut Rng::new(3)).unwrap();
        g.tick(0);
        g.state.scene = Scene::LogicPuzzle;
        assert!(!g.handle_input(&InputEvent::Key('4')));
        assert!(g.handle_input(&InputEvent::Key('3')));
    }

    #[test]
    fn office_terminal_keys_are_text() {
        let mut g = game();
        assert!(g.handle_input(&InputEvent::Key('2')));
        assert_eq!(g.state.scene, Scene::AiTerminal);
        keys(&mut g, "hl");
        assert_eq!(g.state.input, "hl");
        assert_eq!(g.state.room, Room::Office);
        assert!(g.handle_input(&InputEvent::Enter));
        assert!(g.state.chat.is_busy());
        assert!(g.handle_input(&InputEvent::Escape));
        assert_eq!(g.state.scene, Scene::Room);
    }

    #[test]
    fn terminal_keys_are_text() {
        let mut g = game();
        g.state.scene = Scene::Decryption;
        keys(&mut g, "h1?");
        assert_eq!(g.state.input, "h1?");
        assert_eq!(g.state.room, Room::Office);
        assert!(g.handle_input(&InputEvent::Backspace));
        assert_eq!(g.state.input, "h1");
    }

    #[test]
    fn end_screen_ignores_play_input() {
        let mut g = game();
        g.tick(g.state.total_ticks);
        assert_eq!(g.state.phase, Phase::TimeUp);
        assert!(!g.handle_input(&InputEvent::Key('l')));
        assert!(g.handle_input(&InputEvent::Click(RETURN_TO_MENU)));
        assert!(g.is_finished());
    }

    #[test]
    fn hard_has_no_hint_key() {
        let config = Config {
            difficulty: Difficulty::Hard,
            ..Config::default()
        };
        let mut g = EscapeGame::new(&config, &mut Rng::new(3)).unwrap();
        g.state.scene = Scene::LogicPuzzle;
        assert!(!g.handle_input(&InputEvent::Key('?')));
        assert!(!g.handle_input(&InputEvent::Click(HINT)));
    }
}
