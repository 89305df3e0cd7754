//! Fixed wiring topology: which trail nodes each slot reads and writes.

use crate::error::{CircuitError, Result};

/// Connections of one gate slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateWire {
    pub inputs: [usize; 2],
    pub output: usize,
    /// 1 = first gate layer (reads the puzzle inputs).
    pub layer: usize,
}

/// Wires listed in evaluation order; wire `i` belongs to slot `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct Wiring {
    wires: Vec<GateWire>,
    input_len: usize,
    node_count: usize,
}

impl Wiring {
    /// Halving tree with `first_layer` gates on the input side.
    ///
    /// Each layer reads the previous layer's nodes pairwise and writes its
    /// outputs right after them. For 4 first-layer gates: gate `i` reads
    /// `2i, 2i+1` and writes `8+i`; the second layer reads `8+2i, 9+2i` and
    /// writes `12+i`; the final gate reads `12, 13` and writes `14`.
    pub fn layered(first_layer: usize) -> Result<Self> {
        if first_layer == 0 || !first_layer.is_power_of_two() {
            return Err(CircuitError::InvalidConfiguration(format!(
                "first layer must be a power of two, got {}",
                first_layer
            )));
        }
        let input_len = first_layer * 2;
        let mut wires = Vec::with_capacity(first_layer * 2 - 1);
        let mut read_base = 0;
        let mut write_base = input_len;
        let mut width = first_layer;
        let mut layer = 1;
        loop {
            for i in 0..width {
                wires.push(GateWire {
                    inputs: [read_base + 2 * i, read_base + 2 * i + 1],
                    output: write_base + i,
                    layer,
                });
            }
            if width == 1 {
                break;
            }
            read_base = write_base;
            write_base += width;
            width /= 2;
            layer += 1;
        }
        Ok(Self {
            wires,
            input_len,
            node_count: write_base + 1,
        })
    }

    /// Arbitrary topology. Only checked when evaluated.
    #[cfg(test)]
    pub fn from_wires(wires: Vec<GateWire>, input_len: usize, node_count: usize) -> Self {
        Self {
            wires,
            input_len,
            node_count,
        }
    }

    pub fn wires(&self) -> &[GateWire] {
        &self.wires
    }

    pub fn slot_count(&self) -> usize {
        self.wires.len()
    }

    pub fn input_len(&self) -> usize {
        self.input_len
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Node written by the last gate, the solved flag.
    pub fn final_node(&self) -> Option<usize> {
        self.wires.last().map(|w| w.output)
    }

    pub fn layer_count(&self) -> usize {
        self.wires.iter().map(|w| w.layer).max().unwrap_or(0)
    }

    /// Slots belonging to `layer`, index-ascending.
    pub fn slots_in_layer(&self, layer: usize) -> Vec<usize> {
        self.wires
            .iter()
            .enumerate()
            .filter(|(_, w)| w.layer == layer)
            .map(|(slot, _)| slot)
            .collect()
    }
}
