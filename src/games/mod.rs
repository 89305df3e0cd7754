//! Game trait and session creation.

pub mod escape;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::config::Config;
use crate::error::CircuitError;
use crate::input::{ClickState, InputEvent};
use crate::rng::Rng;

/// Menu click targets. Kept clear of the in-game action IDs.
pub const MENU_DIFFICULTY_BASE: u16 = 100;
pub const MENU_TIME_LIMIT: u16 = 110;
pub const MENU_LAYOUT: u16 = 111;
pub const MENU_START: u16 = 112;

/// Trait that all games implement.
pub trait Game {
    /// Handle an input event. Returns true if the event was consumed.
    fn handle_input(&mut self, event: &InputEvent) -> bool;

    /// Advance game logic by `delta_ticks` discrete ticks.
    fn tick(&mut self, delta_ticks: u32);

    /// Render the game into the given area.
    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>);

    /// True once the player has left the end screen.
    fn is_finished(&self) -> bool;
}

/// Top-level application state.
pub enum AppState {
    /// Title menu with the settings.
    Menu,
    /// A run in progress.
    Playing { game: Box<dyn Game> },
}

/// Start a new run with the given settings.
pub fn create_game(config: &Config, rng: &mut Rng) -> Result<Box<dyn Game>, CircuitError> {
    Ok(Box::new(escape::EscapeGame::new(config, rng)?))
}
