//! Signal trail: boolean value on every node of the network.
//!
//! Layout: `[inputs.. | first-layer outputs.. | ... | final]`.

use crate::error::{CircuitError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct SignalTrail {
    nodes: Vec<bool>,
    input_len: usize,
}

impl SignalTrail {
    /// Allocate `len` nodes with the leading `input_len` seeded from `input_bits`.
    pub fn new(len: usize, input_len: usize, input_bits: &[bool]) -> Result<Self> {
        if input_len > len {
            return Err(CircuitError::InvalidConfiguration(format!(
                "input segment ({}) longer than trail ({})",
                input_len, len
            )));
        }
        if input_bits.len() != input_len {
            return Err(CircuitError::InvalidConfiguration(format!(
                "expected {} input bits, got {}",
                input_len,
                input_bits.len()
            )));
        }
        let mut nodes = vec![false; len];
        nodes[..input_len].copy_from_slice(input_bits);
        Ok(Self { nodes, input_len })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn input_len(&self) -> usize {
        self.input_len
    }

    pub fn get(&self, node: usize) -> Result<bool> {
        self.nodes
            .get(node)
            .copied()
            .ok_or(CircuitError::IndexOutOfRange {
                index: node,
                len: self.nodes.len(),
            })
    }

    pub fn set(&mut self, node: usize, value: bool) -> Result<()> {
        let len = self.nodes.len();
        match self.nodes.get_mut(node) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(CircuitError::IndexOutOfRange { index: node, len }),
        }
    }

    pub fn inputs(&self) -> &[bool] {
        &self.nodes[..self.input_len]
    }

    pub fn nodes(&self) -> &[bool] {
        &self.nodes
    }
}
