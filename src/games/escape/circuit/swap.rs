//! Two-click slot swapping.

use tracing::debug;

use crate::error::{CircuitError, Result};

use super::assembly::CircuitAssembly;
use super::evaluator::evaluate;
use super::trail::SignalTrail;
use super::wiring::Wiring;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Idle,
    /// One slot picked, waiting for its partner.
    Armed(usize),
}

/// What a selection did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Armed(usize),
    Deselected,
    Swapped { a: usize, b: usize, solved: bool },
}

#[derive(Clone, Debug)]
pub struct SwapController {
    selection: Selection,
}

impl SwapController {
    pub fn new() -> Self {
        Self {
            selection: Selection::Idle,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Feed one slot click. An out-of-range slot changes nothing.
    pub fn select(
        &mut self,
        slot: usize,
        assembly: &mut CircuitAssembly,
        trail: &mut SignalTrail,
        wiring: &Wiring,
    ) -> Result<SelectOutcome> {
        if slot >= assembly.len() {
            return Err(CircuitError::IndexOutOfRange {
                index: slot,
                len: assembly.len(),
            });
        }
        match self.selection {
            Selection::Idle => {
                self.selection = Selection::Armed(slot);
                Ok(SelectOutcome::Armed(slot))
            }
            Selection::Armed(armed) if armed == slot => {
                self.selection = Selection::Idle;
                Ok(SelectOutcome::Deselected)
            }
            Selection::Armed(armed) => {
                assembly.swap(armed, slot)?;
                // a failed evaluation wrote nothing; undo the swap so the
                // assembly still matches the trail
                let solved = match evaluate(assembly, trail, wiring) {
                    Ok(solved) => solved,
                    Err(e) => {
                        assembly.swap(armed, slot)?;
                        return Err(e);
                    }
                };
                self.selection = Selection::Idle;
                debug!(a = armed, b = slot, solved, "gates swapped");
                Ok(SelectOutcome::Swapped {
                    a: armed,
                    b: slot,
                    solved,
                })
            }
        }
    }

    pub fn reset(&mut self) {
        self.selection = Selection::Idle;
    }
}
