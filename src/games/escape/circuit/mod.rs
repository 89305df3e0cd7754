//! Logic-gate circuit engine for the breaker-room puzzle.
//!
//! A fixed halving network of two-input gates: the first layer reads the
//! puzzle inputs pairwise, each following layer reads the previous layer's
//! outputs, and the last gate's output is the solved flag. The player can
//! only permute gates between slots.
//!
//! [`LogicGatePuzzle`] is the surface the UI talks to: slot clicks in,
//! gate kinds and the solved flag out.

pub mod assembly;
pub mod evaluator;
pub mod gate;
pub mod swap;
pub mod trail;
pub mod wiring;

use tracing::{debug, info, warn};

use crate::config::GateLayout;
use crate::error::{CircuitError, Result};
use crate::rng::Rng;

use assembly::{CircuitAssembly, PlacementPolicy};
use evaluator::evaluate;
use gate::GateKind;
use swap::{SelectOutcome, Selection, SwapController};
use trail::SignalTrail;
use wiring::Wiring;

/// Attempts at finding a solvable placement, and at scrambling it.
const MAX_ATTEMPTS: usize = 64;

pub struct LogicGatePuzzle {
    assembly: CircuitAssembly,
    trail: SignalTrail,
    wiring: Wiring,
    swap: SwapController,
    solved: bool,
    evaluations: u32,
}

impl LogicGatePuzzle {
    /// Build a puzzle from explicit gates and inputs and evaluate it once.
    pub fn new(layout: GateLayout, policy: PlacementPolicy, inputs: &[bool]) -> Result<Self> {
        let wiring = Wiring::layered(layout.first_layer())?;
        let assembly = CircuitAssembly::new(wiring.slot_count(), policy)?;
        let trail = SignalTrail::new(wiring.node_count(), wiring.input_len(), inputs)?;
        let mut puzzle = Self {
            assembly,
            trail,
            wiring,
            swap: SwapController::new(),
            solved: false,
            evaluations: 0,
        };
        puzzle.reevaluate()?;
        Ok(puzzle)
    }

    /// Random puzzle that has a solution but does not start solved.
    ///
    /// A random placement that already solves the random inputs is found
    /// first, then its slots are shuffled until the circuit reads false.
    pub fn generate(layout: GateLayout, rng: &mut Rng) -> Result<Self> {
        let input_len = layout.first_layer() * 2;
        for _ in 0..MAX_ATTEMPTS {
            let inputs: Vec<bool> = (0..input_len).map(|_| rng.next_bool()).collect();
            let mut puzzle = Self::new(layout, PlacementPolicy::Random(rng.next_u32()), &inputs)?;
            if !puzzle.solved {
                continue;
            }
            for _ in 0..MAX_ATTEMPTS {
                puzzle.assembly.shuffle(rng);
                if !puzzle.reevaluate()? {
                    info!(?layout, "logic gate puzzle generated");
                    return Ok(puzzle);
                }
            }
        }
        Err(CircuitError::InvalidConfiguration(
            "could not generate a scrambled solvable circuit".into(),
        ))
    }

    fn reevaluate(&mut self) -> Result<bool> {
        self.solved = evaluate(&self.assembly, &mut self.trail, &self.wiring)?;
        self.evaluations += 1;
        debug!(evaluations = self.evaluations, solved = self.solved, "circuit evaluated");
        Ok(self.solved)
    }

    /// Single handler for every slot click.
    ///
    /// A bad slot index is a wiring bug in the UI; it is logged and the
    /// click ignored.
    pub fn on_slot_selected(&mut self, slot: usize) -> Option<SelectOutcome> {
        match self
            .swap
            .select(slot, &mut self.assembly, &mut self.trail, &self.wiring)
        {
            Ok(outcome) => {
                if let SelectOutcome::Swapped { solved, .. } = outcome {
                    self.solved = solved;
                    self.evaluations += 1;
                    debug!(evaluations = self.evaluations, solved, "circuit evaluated");
                }
                Some(outcome)
            }
            Err(e) => {
                warn!(slot, error = %e, "ignored slot selection");
                None
            }
        }
    }

    pub fn current_assembly_view(&self) -> &[GateKind] {
        self.assembly.kinds()
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn selection(&self) -> Selection {
        self.swap.selection()
    }

    pub fn clear_selection(&mut self) {
        self.swap.reset();
    }

    pub fn trail(&self) -> &SignalTrail {
        &self.trail
    }

    pub fn wiring(&self) -> &Wiring {
        &self.wiring
    }

    /// Number of full evaluations run so far.
    #[cfg(test)]
    pub fn evaluations(&self) -> u32 {
        self.evaluations
    }
}
