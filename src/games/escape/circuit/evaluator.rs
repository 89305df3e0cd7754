//! Circuit evaluation: full recomputation of every derived node.

use tracing::debug;

use crate::error::{CircuitError, Result};

use super::assembly::CircuitAssembly;
use super::trail::SignalTrail;
use super::wiring::Wiring;

/// Recompute `trail` from `assembly` and return the final node (solved flag).
///
/// The whole topology is validated before the first write, so a mismatch
/// leaves the trail untouched.
pub fn evaluate(
    assembly: &CircuitAssembly,
    trail: &mut SignalTrail,
    wiring: &Wiring,
) -> Result<bool> {
    check_wiring(assembly, trail, wiring)?;

    for (slot, wire) in wiring.wires().iter().enumerate() {
        let kind = assembly.gate_at(slot)?;
        let a = trail.get(wire.inputs[0])?;
        let b = trail.get(wire.inputs[1])?;
        trail.set(wire.output, kind.eval(a, b))?;
    }

    let final_node = wiring
        .final_node()
        .ok_or_else(|| CircuitError::WiringMismatch("wiring has no gates".into()))?;
    let solved = trail.get(final_node)?;
    debug!(solved, "circuit evaluated");
    Ok(solved)
}

fn check_wiring(assembly: &CircuitAssembly, trail: &SignalTrail, wiring: &Wiring) -> Result<()> {
    if wiring.slot_count() != assembly.len() {
        return Err(CircuitError::WiringMismatch(format!(
            "wiring has {} slots, assembly has {}",
            wiring.slot_count(),
            assembly.len()
        )));
    }
    if wiring.input_len() != trail.input_len() {
        return Err(CircuitError::WiringMismatch(format!(
            "wiring expects {} inputs, trail has {}",
            wiring.input_len(),
            trail.input_len()
        )));
    }
    for (slot, wire) in wiring.wires().iter().enumerate() {
        for node in wire.inputs.iter().chain(std::iter::once(&wire.output)) {
            if *node >= trail.len() {
                return Err(CircuitError::WiringMismatch(format!(
                    "slot {} touches node {} but trail has {} nodes",
                    slot,
                    node,
                    trail.len()
                )));
            }
        }
        if wire.output < trail.input_len() {
            return Err(CircuitError::WiringMismatch(format!(
                "slot {} writes input node {}",
                slot, wire.output
            )));
        }
    }
    Ok(())
}
