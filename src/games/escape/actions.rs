//! Semantic action IDs for Breaker Room click targets.

// ── Navigation ────────────────────────────────────────────────
pub const GO_LEFT: u16 = 1;
pub const GO_RIGHT: u16 = 2;
/// Room tabs: + room index (Control=0, Office=1, Breaker=2).
pub const ROOM_TAB_BASE: u16 = 5;

// ── Room hotspots (1-based on screen) ─────────────────────────
/// Choice base: +index (0-based). Choice [1] = CHOICE_BASE+0.
pub const CHOICE_BASE: u16 = 10;

// ── Puzzle scenes ─────────────────────────────────────────────
pub const BACK: u16 = 30;
pub const HINT: u16 = 31;
pub const SUBMIT: u16 = 32;
/// Logic gate slot base: + slot index.
pub const GATE_SLOT_BASE: u16 = 40;

// ── End screens ───────────────────────────────────────────────
pub const RETURN_TO_MENU: u16 = 90;
