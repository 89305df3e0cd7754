//! Breaker Room session state: data structures, no rules.
//!
//! One `EscapeState` lives for one run, from the menu to the end screen.

use crate::config::{Config, Difficulty};
use crate::error::CircuitError;
use crate::rng::Rng;
use crate::time::TICKS_PER_SEC;

use super::chat::{ChatBackend, ChatSession, ScriptedAssistant};
use super::circuit::LogicGatePuzzle;
use super::decryption::DecryptionPuzzle;

/// Log lines kept on screen.
pub const MAX_LOG: usize = 30;

/// Characters accepted in the terminal input line.
pub const MAX_INPUT: usize = 48;

const SYSTEM_PROMPT: &str = "You are the facility AI. The player is locked in. \
     Help only with short hints and never reveal a full answer.";

const GREETING: &str = "Power is down and the door is sealed. \
     Restore the breaker and crack the terminal.";

// ── Rooms ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Room {
    Control,
    Office,
    Breaker,
}

impl Room {
    /// Left to right, as drawn on the room tabs.
    pub const ALL: [Room; 3] = [Room::Control, Room::Office, Room::Breaker];

    pub fn index(self) -> usize {
        match self {
            Room::Control => 0,
            Room::Office => 1,
            Room::Breaker => 2,
        }
    }

    pub fn left(self) -> Option<Room> {
        match self {
            Room::Control => None,
            Room::Office => Some(Room::Control),
            Room::Breaker => Some(Room::Office),
        }
    }

    pub fn right(self) -> Option<Room> {
        match self {
            Room::Control => Some(Room::Office),
            Room::Office => Some(Room::Breaker),
            Room::Breaker => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Room::Control => "Control Room",
            Room::Office => "Office",
            Room::Breaker => "Breaker Room",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Room::Control => "Racks of dead monitors. One terminal still glows, asking for a code.",
            Room::Office => "A cramped office. The exit door is sealed and an AI terminal blinks on the desk.",
            Room::Breaker => "It smells of ozone. A panel of logic gates controls the main breaker.",
        }
    }
}

// ── Scenes ────────────────────────────────────────────────────

/// What fills the main panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scene {
    /// Room view with its hotspots.
    Room,
    /// Breaker panel close-up.
    LogicPuzzle,
    /// Decryption terminal close-up.
    Decryption,
    /// Office AI terminal: free chat and hints, no code entry.
    AiTerminal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Escaped,
    TimeUp,
}

/// Things the player can do in a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoomAction {
    OpenDecryption,
    OpenBreakerPanel,
    OpenAiTerminal,
    AskAssistant,
    UseExitDoor,
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

// ── Session ───────────────────────────────────────────────────

pub struct EscapeState {
    pub difficulty: Difficulty,
    pub room: Room,
    pub scene: Scene,
    pub phase: Phase,
    pub ticks_left: u32,
    pub total_ticks: u32,
    /// `None` means unlimited.
    pub hints_left: Option<u32>,
    pub hints_used: u32,
    pub logic: LogicGatePuzzle,
    pub decryption: DecryptionPuzzle,
    pub chat: ChatSession,
    /// Text typed at whichever terminal prompt is open.
    pub input: String,
    pub log: Vec<LogEntry>,
    /// Set when the player leaves the end screen.
    pub finished: bool,
}

impl EscapeState {
    /// New session with the offline assistant.
    pub fn new(config: &Config, rng: &mut Rng) -> Result<Self, CircuitError> {
        Self::with_backend(config, rng, Box::new(ScriptedAssistant::new(GREETING)))
    }

    pub fn with_backend(
        config: &Config,
        rng: &mut Rng,
        backend: Box<dyn ChatBackend>,
    ) -> Result<Self, CircuitError> {
        let logic = LogicGatePuzzle::generate(config.layout, rng)?;
        let decryption = DecryptionPuzzle::random(rng);
        let ticks_left = config.time_limit_minutes * 60 * TICKS_PER_SEC;
        let mut state = Self {
            difficulty: config.difficulty,
            room: Room::Office,
            scene: Scene::Room,
            phase: Phase::Playing,
            ticks_left,
            total_ticks: ticks_left,
            hints_left: config.difficulty.hint_budget(),
            hints_used: 0,
            logic,
            decryption,
            chat: ChatSession::new(backend, SYSTEM_PROMPT),
            input: String::new(),
            log: Vec::new(),
            finished: false,
        };
        state.add_log("You wake up in a dark office. The door will not budge.");
        // the greeting lands on the first tick, like any other reply
        state.chat.open();
        Ok(state)
    }

    pub fn add_log(&mut self, text: &str) {
        self.push_log(text, false);
    }

    pub fn add_important_log(&mut self, text: &str) {
        self.push_log(text, true);
    }

    fn push_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }

    /// The exit opens once both puzzles are solved.
    pub fn exit_unlocked(&self) -> bool {
        self.logic.is_solved() && self.decryption.is_solved()
    }

    /// Hard mode ships with the hint button switched off. Chat stays.
    pub fn hints_enabled(&self) -> bool {
        self.difficulty != Difficulty::Hard
    }

    /// Hotspots of the current room, in on-screen order.
    pub fn room_actions(&self) -> Vec<RoomAction> {
        match self.room {
            Room::Control => vec![RoomAction::OpenDecryption],
            Room::Office if !self.hints_enabled() => {
                vec![RoomAction::UseExitDoor, RoomAction::OpenAiTerminal]
            }
            Room::Office => vec![
                RoomAction::UseExitDoor,
                RoomAction::OpenAiTerminal,
                RoomAction::AskAssistant,
            ],
            Room::Breaker => vec![RoomAction::OpenBreakerPanel],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(difficulty: Difficulty) -> EscapeState {
        let config = Config {
            difficulty,
            ..Config::default()
        };
        EscapeState::new(&config, &mut Rng::new(11)).unwrap()
    }

    #[test]
    fn starts_in_office() {
        let s = state(Difficulty::Medium);
        assert_eq!(s.room, Room::Office);
        assert_eq!(s.scene, Scene::Room);
        assert_eq!(s.phase, Phase::Playing);
        assert!(!s.logic.is_solved());
        assert!(!s.exit_unlocked());
        assert_eq!(s.log.len(), 1);
        assert!(s.chat.is_busy());
    }

    #[test]
    fn timer_from_config() {
        let s = state(Difficulty::Easy);
        assert_eq!(s.ticks_left, 4 * 60 * TICKS_PER_SEC);
        assert_eq!(s.total_ticks, s.ticks_left);
    }

    #[test]
    fn hint_budget_by_difficulty() {
        assert_eq!(state(Difficulty::Easy).hints_left, None);
        assert_eq!(state(Difficulty::Medium).hints_left, Some(5));
        assert_eq!(state(Difficulty::Hard).hints_left, Some(0));
        assert!(!state(Difficulty::Hard).hints_enabled());
        assert!(state(Difficulty::Medium).hints_enabled());
    }

    #[test]
    fn hard_office_keeps_chat_but_no_hints() {
        let s = state(Difficulty::Hard);
        assert_eq!(
            s.room_actions(),
            vec![RoomAction::UseExitDoor, RoomAction::OpenAiTerminal]
        );
        assert_eq!(
            state(Difficulty::Easy).room_actions().last(),
            Some(&RoomAction::AskAssistant)
        );
    }

    #[test]
    fn rooms_line_up() {
        assert_eq!(Room::Office.left(), Some(Room::Control));
        assert_eq!(Room::Office.right(), Some(Room::Breaker));
        assert_eq!(Room::Control.left(), None);
        assert_eq!(Room::Breaker.right(), None);
        for (i, r) in Room::ALL.iter().enumerate() {
            assert_eq!(r.index(), i);
        }
    }

    #[test]
    fn log_is_capped() {
        let mut s = state(Difficulty::Easy);
        for i in 0..MAX_LOG + 5 {
            s.add_log(&format!("line {}", i));
        }
        assert_eq!(s.log.len(), MAX_LOG);
        assert_eq!(s.log.last().unwrap().text, format!("line {}", MAX_LOG + 4));
    }
}
