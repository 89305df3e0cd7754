//! Chat assistant boundary.
//!
//! The assistant itself (an LLM behind an HTTP API in the full game) lives
//! outside this crate. A backend receives the conversation and answers
//! through a channel; the session keeps at most one request in flight and
//! picks up the answer on the next tick.

use std::sync::mpsc::{self, Receiver, TryRecvError};

use tracing::{debug, warn};

use crate::error::ChatError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    System,
    Assistant,
    User,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Something that can answer a conversation.
pub trait ChatBackend {
    fn request(&mut self, history: &[ChatMessage]) -> Receiver<Result<String, ChatError>>;
}

/// Why a request was sent; hint prompts are dropped from the history once
/// answered so they cannot be replayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Chat,
    Hint,
}

struct Pending {
    kind: RequestKind,
    /// Index of the prompt message in `history`.
    prompt_index: usize,
    reply: Receiver<Result<String, ChatError>>,
}

/// What `poll` observed.
#[derive(Clone, Debug, PartialEq)]
pub enum PollResult {
    Idle,
    Waiting,
    Replied(String),
    Failed(ChatError),
}

pub struct ChatSession {
    history: Vec<ChatMessage>,
    /// Lines shown in the chat panel (`user>`, `ai>`, system notices).
    transcript: Vec<String>,
    pending: Option<Pending>,
    backend: Box<dyn ChatBackend>,
}

impl ChatSession {
    pub fn new(backend: Box<dyn ChatBackend>, system_prompt: &str) -> Self {
        Self {
            history: vec![ChatMessage::new(Role::System, system_prompt)],
            transcript: Vec::new(),
            pending: None,
            backend,
        }
    }

    /// True while a request is outstanding. Input that would start another
    /// request or mutate a puzzle is rejected meanwhile.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Ask for an opening message on the history as it stands. Returns false
    /// if busy.
    pub fn open(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        let reply = self.backend.request(&self.history);
        self.pending = Some(Pending {
            kind: RequestKind::Chat,
            prompt_index: self.history.len(),
            reply,
        });
        true
    }

    /// Send a message. Returns false (and sends nothing) if busy.
    pub fn send(&mut self, kind: RequestKind, message: ChatMessage) -> bool {
        if self.is_busy() {
            debug!("chat busy, request rejected");
            return false;
        }
        if kind == RequestKind::Chat && message.role == Role::User {
            self.push_transcript(format!("user> {}", message.content));
        }
        let prompt_index = self.history.len();
        self.history.push(message);
        let reply = self.backend.request(&self.history);
        self.pending = Some(Pending {
            kind,
            prompt_index,
            reply,
        });
        true
    }

    /// Collect the reply if it has arrived. Input is re-enabled only here,
    /// after success or failure.
    pub fn poll(&mut self) -> PollResult {
        let Some(pending) = &self.pending else {
            return PollResult::Idle;
        };
        let outcome = match pending.reply.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return PollResult::Waiting,
            Err(TryRecvError::Disconnected) => Err(ChatError::Disconnected),
        };
        let Some(pending) = self.pending.take() else {
            return PollResult::Idle;
        };
        if pending.kind == RequestKind::Hint && pending.prompt_index < self.history.len() {
            self.history.remove(pending.prompt_index);
        }
        match outcome {
            Ok(text) => {
                self.history
                    .push(ChatMessage::new(Role::Assistant, text.clone()));
                self.push_transcript(format!("ai> {}", text));
                PollResult::Replied(text)
            }
            Err(e) => {
                warn!(error = %e, "chat request failed");
                self.push_transcript(format!("-- {} --", e));
                PollResult::Failed(e)
            }
        }
    }

    #[cfg(test)]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    fn push_transcript(&mut self, line: String) {
        self.transcript.push(line);
        if self.transcript.len() > 40 {
            self.transcript.remove(0);
        }
    }
}

/// Offline assistant with canned replies. Answers immediately.
pub struct ScriptedAssistant {
    greeting: String,
}

impl ScriptedAssistant {
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            greeting: greeting.into(),
        }
    }

    fn reply_to(&self, history: &[ChatMessage]) -> String {
        let Some(last) = history.last() else {
            return self.greeting.clone();
        };
        if let Some(line) = hinted_line(&last.content) {
            return format!("Take a closer look at line {}.", line);
        }
        if let Some(goal) = hinted_goal(&last.content) {
            return format!("If I were you: {}", goal);
        }
        match last.role {
            Role::System => self.greeting.clone(),
            Role::Assistant => "I'm listening.".to_string(),
            Role::User => {
                let text = last.content.to_lowercase();
                if text.contains("hint") || text.contains("help") {
                    "Use the hint button. I am not allowed to just give you the answer.".into()
                } else if text.contains("gate") || text.contains("breaker") {
                    "The breaker panel only opens when its final gate outputs 1.".into()
                } else {
                    "Focus. The clock is ticking.".into()
                }
            }
        }
    }
}

impl ChatBackend for ScriptedAssistant {
    fn request(&mut self, history: &[ChatMessage]) -> Receiver<Result<String, ChatError>> {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(Ok(self.reply_to(history)));
        rx
    }
}

/// Hint prompts carry `[line N]`; pull N back out.
fn hinted_line(prompt: &str) -> Option<u32> {
    let start = prompt.find("[line ")? + "[line ".len();
    let end = prompt[start..].find(']')? + start;
    prompt[start..end].trim().parse().ok()
}

fn hinted_goal(prompt: &str) -> Option<&str> {
    let start = prompt.find("[goal: ")? + "[goal: ".len();
    let end = prompt[start..].rfind(']')? + start;
    Some(prompt[start..end].trim())
}

/// Hint prompt nudging the player towards the next step in the rooms.
pub fn objective_prompt(objective: &str) -> String {
    format!(
        "The player asks what to do next. Nudge them without spoiling any \
         puzzle answer. [goal: {}]",
        objective
    )
}

/// Hint prompt for the assistant about one faulty pseudocode line.
pub fn hint_prompt(pseudocode: &str, line: u32) -> String {
    format!(
        "The player is stuck on this pseudocode:\n{}\nGive a short riddle-like hint that \
         points at [line {}] without revealing the fix.",
        pseudocode, line
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend that holds replies until the test releases them.
    struct Manual {
        senders: std::rc::Rc<std::cell::RefCell<Vec<mpsc::Sender<Result<String, ChatError>>>>>,
    }

    impl ChatBackend for Manual {
        fn request(&mut self, _history: &[ChatMessage]) -> Receiver<Result<String, ChatError>> {
            let (tx, rx) = mpsc::channel();
            self.senders.borrow_mut().push(tx);
            rx
        }
    }

    fn manual() -> (
        ChatSession,
        std::rc::Rc<std::cell::RefCell<Vec<mpsc::Sender<Result<String, ChatError>>>>>,
    ) {
        let senders = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let backend = Manual {
            senders: senders.clone(),
        };
        (ChatSession::new(Box::new(backend), "sys"), senders)
    }

    #[test]
    fn busy_until_reply_arrives() {
        let (mut chat, senders) = manual();
        assert!(chat.send(RequestKind::Chat, ChatMessage::new(Role::User, "hi")));
        assert!(chat.is_busy());
        assert_eq!(chat.poll(), PollResult::Waiting);
        assert!(!chat.send(RequestKind::Chat, ChatMessage::new(Role::User, "again")));

        senders.borrow()[0].send(Ok("hello".into())).unwrap();
        assert_eq!(chat.poll(), PollResult::Replied("hello".into()));
        assert!(!chat.is_busy());
        assert_eq!(chat.transcript(), &["user> hi".to_string(), "ai> hello".to_string()]);
    }

    #[test]
    fn failure_reenables_input() {
        let (mut chat, senders) = manual();
        chat.send(RequestKind::Chat, ChatMessage::new(Role::User, "hi"));
        senders.borrow()[0]
            .send(Err(ChatError::Unavailable("offline".into())))
            .unwrap();
        assert!(matches!(chat.poll(), PollResult::Failed(ChatError::Unavailable(_))));
        assert!(!chat.is_busy());
    }

    #[test]
    fn dropped_backend_counts_as_failure() {
        let (mut chat, senders) = manual();
        chat.send(RequestKind::Chat, ChatMessage::new(Role::User, "hi"));
        senders.borrow_mut().clear();
        assert_eq!(chat.poll(), PollResult::Failed(ChatError::Disconnected));
        assert!(!chat.is_busy());
    }

    #[test]
    fn hint_prompt_removed_after_answer() {
        let mut chat = ChatSession::new(Box::new(ScriptedAssistant::new("hello")), "sys");
        chat.send(
            RequestKind::Hint,
            ChatMessage::new(Role::Assistant, hint_prompt("code", 3)),
        );
        assert_eq!(chat.poll(), PollResult::Replied("Take a closer look at line 3.".into()));
        assert_eq!(chat.history().len(), 2);
        assert_eq!(chat.history()[1].role, Role::Assistant);
        assert!(!chat.history().iter().any(|m| m.content.contains("[line 3]")));
    }

    #[test]
    fn opening_message_from_system_prompt() {
        let mut chat = ChatSession::new(Box::new(ScriptedAssistant::new("welcome")), "sys");
        assert!(chat.open());
        assert!(chat.is_busy());
        assert!(!chat.open());
        assert_eq!(chat.poll(), PollResult::Replied("welcome".into()));
        assert_eq!(chat.transcript(), &["ai> welcome".to_string()]);
        assert_eq!(chat.history().len(), 2);
        assert_eq!(chat.history()[0].role, Role::System);
    }

    #[test]
    fn idle_poll() {
        let mut chat = ChatSession::new(Box::new(ScriptedAssistant::new("hello")), "sys");
        assert_eq!(chat.poll(), PollResult::Idle);
    }

    #[test]
    fn objective_hint_echoes_goal() {
        let mut chat = ChatSession::new(Box::new(ScriptedAssistant::new("hello")), "sys");
        chat.send(
            RequestKind::Hint,
            ChatMessage::new(Role::Assistant, objective_prompt("restore power")),
        );
        assert_eq!(
            chat.poll(),
            PollResult::Replied("If I were you: restore power".into())
        );
        assert_eq!(chat.history().len(), 2);
    }

    #[test]
    fn hinted_line_parsing() {
        assert_eq!(hinted_line(&hint_prompt("x", 7)), Some(7));
        assert_eq!(hinted_line("no marker"), None);
    }
}
