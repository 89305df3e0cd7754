//! Circuit assembly: the gates currently sitting in each slot.

use crate::error::{CircuitError, Result};
use crate::rng::Rng;

use super::gate::GateKind;

/// How slots are filled when an assembly is created.
#[derive(Clone, Debug, PartialEq)]
pub enum PlacementPolicy {
    /// Uniform draw from the gate catalog.
    Random(u32),
    /// Exact gates, one per slot.
    Fixed(Vec<GateKind>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CircuitAssembly {
    gates: Vec<GateKind>,
}

impl CircuitAssembly {
    pub fn new(slot_count: usize, policy: PlacementPolicy) -> Result<Self> {
        if slot_count == 0 {
            return Err(CircuitError::InvalidConfiguration(
                "assembly needs at least one slot".into(),
            ));
        }
        let gates = match policy {
            PlacementPolicy::Random(seed) => {
                let mut rng = Rng::new(seed);
                (0..slot_count)
                    .map(|_| GateKind::ALL[rng.below(GateKind::ALL.len())])
                    .collect()
            }
            PlacementPolicy::Fixed(gates) => {
                if gates.len() != slot_count {
                    return Err(CircuitError::InvalidConfiguration(format!(
                        "expected {} gates, got {}",
                        slot_count,
                        gates.len()
                    )));
                }
                gates
            }
        };
        Ok(Self { gates })
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn gate_at(&self, slot: usize) -> Result<GateKind> {
        self.gates
            .get(slot)
            .copied()
            .ok_or(CircuitError::IndexOutOfRange {
                index: slot,
                len: self.gates.len(),
            })
    }

    /// Exchange two slots. Both indices are checked before anything moves.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        let len = self.gates.len();
        for index in [a, b] {
            if index >= len {
                return Err(CircuitError::IndexOutOfRange { index, len });
            }
        }
        self.gates.swap(a, b);
        Ok(())
    }

    /// Read-only view, one kind per slot.
    pub fn kinds(&self) -> &[GateKind] {
        &self.gates
    }

    /// Reorder the slots in place. Used when scrambling a generated solution.
    pub fn shuffle(&mut self, rng: &mut Rng) {
        rng.shuffle(&mut self.gates);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CircuitAssembly {
        CircuitAssembly::new(
            7,
            PlacementPolicy::Fixed(vec![
                GateKind::And,
                GateKind::And,
                GateKind::Or,
                GateKind::And,
                GateKind::Xnor,
                GateKind::Or,
                GateKind::Or,
            ]),
        )
        .unwrap()
    }

    #[test]
    fn zero_slots_rejected() {
        let err = CircuitAssembly::new(0, PlacementPolicy::Random(1)).unwrap_err();
        assert!(matches!(err, CircuitError::InvalidConfiguration(_)));
    }

    #[test]
    fn fixed_length_must_match() {
        let err =
            CircuitAssembly::new(3, PlacementPolicy::Fixed(vec![GateKind::And])).unwrap_err();
        assert!(matches!(err, CircuitError::InvalidConfiguration(_)));
    }

    #[test]
    fn random_placement_is_seeded() {
        let a = CircuitAssembly::new(7, PlacementPolicy::Random(5)).unwrap();
        let b = CircuitAssembly::new(7, PlacementPolicy::Random(5)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 7);
    }

    #[test]
    fn swap_same_slot_is_noop() {
        let mut a = sample();
        let before = a.gate_at(4).unwrap();
        a.swap(4, 4).unwrap();
        assert_eq!(a.gate_at(4).unwrap(), before);
        assert_eq!(a, sample());
    }

    #[test]
    fn swap_exchanges_slots() {
        let mut a = sample();
        a.swap(0, 4).unwrap();
        assert_eq!(a.gate_at(0).unwrap(), GateKind::Xnor);
        assert_eq!(a.gate_at(4).unwrap(), GateKind::And);
    }

    #[test]
    fn swap_out_of_range_leaves_state() {
        let mut a = sample();
        let err = a.swap(7, 0).unwrap_err();
        assert_eq!(err, CircuitError::IndexOutOfRange { index: 7, len: 7 });
        let err = a.swap(0, usize::MAX).unwrap_err();
        assert!(matches!(err, CircuitError::IndexOutOfRange { .. }));
        assert_eq!(a, sample());
    }

    #[test]
    fn gate_at_out_of_range() {
        let a = sample();
        assert_eq!(
            a.gate_at(999),
            Err(CircuitError::IndexOutOfRange { index: 999, len: 7 })
        );
    }
}
