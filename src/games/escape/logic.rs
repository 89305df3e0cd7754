//! Breaker Room rules: pure functions over `EscapeState`, no rendering.
//!
//! Every entry point returns whether the input did something, so the
//! dispatcher can tell consumed input from ignored input.

use tracing::info;

use super::chat::{hint_prompt, objective_prompt, ChatMessage, PollResult, RequestKind, Role};
use super::circuit::swap::SelectOutcome;
use super::decryption::{parse_attempt, AttemptResult};
use super::state::{EscapeState, Phase, Room, RoomAction, Scene, MAX_INPUT};

// ── Tick ──────────────────────────────────────────────────────

pub fn tick(state: &mut EscapeState, delta_ticks: u32) {
    if state.phase != Phase::Playing {
        return;
    }
    poll_chat(state);

    state.ticks_left = state.ticks_left.saturating_sub(delta_ticks);
    if state.ticks_left == 0 {
        state.phase = Phase::TimeUp;
        state.logic.clear_selection();
        state.add_important_log("The lights die for good. Time is up.");
        info!("time up");
    }
}

fn poll_chat(state: &mut EscapeState) {
    match state.chat.poll() {
        PollResult::Replied(text) => state.add_log(&format!("AI: {}", text)),
        PollResult::Failed(e) => state.add_log(&format!("The AI terminal flickers ({}).", e)),
        PollResult::Idle | PollResult::Waiting => {}
    }
}

fn playing(state: &EscapeState) -> bool {
    state.phase == Phase::Playing
}

fn reject_if_busy(state: &mut EscapeState) -> bool {
    if state.chat.is_busy() {
        state.add_log("The AI is still answering. Wait a moment.");
        true
    } else {
        false
    }
}

// ── Navigation ────────────────────────────────────────────────

pub fn go_left(state: &mut EscapeState) -> bool {
    match state.room.left() {
        Some(room) => travel_to(state, room),
        None => false,
    }
}

pub fn go_right(state: &mut EscapeState) -> bool {
    match state.room.right() {
        Some(room) => travel_to(state, room),
        None => false,
    }
}

/// Walk to a room. Only from the room view.
pub fn travel_to(state: &mut EscapeState, room: Room) -> bool {
    if !playing(state) || state.scene != Scene::Room || state.room == room {
        return false;
    }
    state.room = room;
    state.add_log(&format!("You walk into the {}.", room.name()));
    true
}

/// Run the `index`-th hotspot of the current room.
pub fn execute_room_action(state: &mut EscapeState, index: usize) -> bool {
    if !playing(state) || state.scene != Scene::Room {
        return false;
    }
    let Some(&action) = state.room_actions().get(index) else {
        return false;
    };
    match action {
        RoomAction::OpenDecryption => {
            state.scene = Scene::Decryption;
            state.add_log("You sit down at the terminal.");
            true
        }
        RoomAction::OpenBreakerPanel => {
            state.scene = Scene::LogicPuzzle;
            state.add_log("You pry open the breaker panel.");
            true
        }
        RoomAction::OpenAiTerminal => {
            state.scene = Scene::AiTerminal;
            state.add_log("You pull up a chair at the AI terminal.");
            true
        }
        RoomAction::AskAssistant => request_hint(state),
        RoomAction::UseExitDoor => use_exit(state),
    }
}

/// Back out of a puzzle close-up to its room.
pub fn leave_scene(state: &mut EscapeState) -> bool {
    if state.scene == Scene::Room {
        return false;
    }
    if state.scene == Scene::LogicPuzzle {
        state.logic.clear_selection();
    }
    state.input.clear();
    state.scene = Scene::Room;
    true
}

// ── Breaker panel ─────────────────────────────────────────────

pub fn select_slot(state: &mut EscapeState, slot: usize) -> bool {
    if !playing(state) || state.scene != Scene::LogicPuzzle {
        return false;
    }
    if reject_if_busy(state) {
        return false;
    }
    if state.logic.is_solved() {
        state.add_log("The breaker is already on.");
        return false;
    }
    let Some(outcome) = state.logic.on_slot_selected(slot) else {
        return false;
    };
    match outcome {
        SelectOutcome::Armed(s) => {
            let name = state
                .logic
                .current_assembly_view()
                .get(s)
                .map(|g| g.name())
                .unwrap_or("?");
            state.add_log(&format!("You pull the {} gate out of slot {}.", name, s + 1));
        }
        SelectOutcome::Deselected => state.add_log("You push the gate back in."),
        SelectOutcome::Swapped { a, b, solved } => {
            state.add_log(&format!("Swapped slots {} and {}.", a + 1, b + 1));
            if solved {
                state.add_important_log("The breaker clicks on. Power restored!");
                info!("breaker restored");
            }
        }
    }
    true
}

// ── Terminal prompts ──────────────────────────────────────────

fn at_prompt(state: &EscapeState) -> bool {
    matches!(state.scene, Scene::Decryption | Scene::AiTerminal)
}

pub fn type_char(state: &mut EscapeState, ch: char) -> bool {
    if !playing(state) || !at_prompt(state) || ch.is_control() {
        return false;
    }
    if state.input.chars().count() >= MAX_INPUT {
        return false;
    }
    state.input.push(ch);
    true
}

pub fn backspace(state: &mut EscapeState) -> bool {
    if !at_prompt(state) {
        return false;
    }
    state.input.pop().is_some()
}

/// Enter at a prompt: a lone `?` asks for a hint, a four-digit run at the
/// locked decryption terminal is a code attempt, anything else goes to the AI.
pub fn submit_input(state: &mut EscapeState) -> bool {
    if !playing(state) || !at_prompt(state) {
        return false;
    }
    let text = state.input.trim().to_string();
    if text.is_empty() {
        return false;
    }
    if text == "?" {
        state.input.clear();
        return request_hint(state);
    }
    if reject_if_busy(state) {
        return false;
    }
    state.input.clear();

    let takes_code = state.scene == Scene::Decryption && !state.decryption.is_solved();
    if let Some(attempt) = parse_attempt(&text).filter(|_| takes_code) {
        match state.decryption.submit(&attempt) {
            AttemptResult::Correct => {
                state.add_important_log("ACCESS GRANTED. The terminal unlocks the door circuit.");
            }
            AttemptResult::Incorrect => {
                state.add_log(&format!("ACCESS DENIED: {}", attempt.0));
            }
            AttemptResult::AlreadySolved => {
                state.add_log("The terminal is already unlocked.");
            }
        }
        return true;
    }

    state
        .chat
        .send(RequestKind::Chat, ChatMessage::new(Role::User, text))
}

// ── Hints ─────────────────────────────────────────────────────

/// What the player should do next.
pub fn next_objective(state: &EscapeState) -> &'static str {
    if !state.logic.is_solved() {
        "the breaker panel is dead; swap gates until the last one outputs 1"
    } else if !state.decryption.is_solved() {
        "find the four broken lines on the control room terminal"
    } else {
        "both systems are up; walk out through the office door"
    }
}

/// Ask the AI for a hint, spending one from the budget.
///
/// At the terminal the hint points at a faulty line; anywhere else it
/// nudges towards the next objective.
pub fn request_hint(state: &mut EscapeState) -> bool {
    if !playing(state) || !state.hints_enabled() {
        return false;
    }
    if state.hints_left == Some(0) {
        state.add_log("The AI refuses: no hints left.");
        return false;
    }
    if reject_if_busy(state) {
        return false;
    }

    let prompt = if state.scene == Scene::Decryption && !state.decryption.is_solved() {
        let line = state.decryption.next_hint_line();
        hint_prompt(&state.decryption.pseudocode(), line)
    } else {
        objective_prompt(next_objective(state))
    };
    if !state
        .chat
        .send(RequestKind::Hint, ChatMessage::new(Role::Assistant, prompt))
    {
        return false;
    }

    if let Some(left) = state.hints_left.as_mut() {
        *left -= 1;
    }
    state.hints_used += 1;
    state.add_log("You ask the AI for a hint.");
    true
}

// ── Exit ──────────────────────────────────────────────────────

pub fn use_exit(state: &mut EscapeState) -> bool {
    if !playing(state) {
        return false;
    }
    if !state.exit_unlocked() {
        let missing = match (state.logic.is_solved(), state.decryption.is_solved()) {
            (false, false) => "No power, and the lock wants a code.",
            (false, true) => "The lock is open, but there is no power.",
            _ => "Power is on, but the lock still wants a code.",
        };
        state.add_log(&format!("The door will not open. {}", missing));
        return true;
    }
    state.phase = Phase::Escaped;
    state.scene = Scene::Room;
    state.add_important_log("The door slides open. You escaped!");
    info!(ticks_left = state.ticks_left, hints_used = state.hints_used, "escaped");
    true
}

/// Leave the end screen.
pub fn return_to_menu(state: &mut EscapeState) -> bool {
    if playing(state) {
        return false;
    }
    state.finished = true;
    true
}
