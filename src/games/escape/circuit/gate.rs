//! Gate catalog: the six two-input boolean gates.

use ratzilla::ratatui::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateKind {
    And,
    Nand,
    Or,
    Nor,
    Xor,
    Xnor,
}

impl GateKind {
    /// Catalog order, also the order of the helper truth-table sidebar.
    pub const ALL: [GateKind; 6] = [
        GateKind::And,
        GateKind::Nand,
        GateKind::Or,
        GateKind::Nor,
        GateKind::Xor,
        GateKind::Xnor,
    ];

    /// Apply this gate to two inputs.
    pub fn eval(self, a: bool, b: bool) -> bool {
        match self {
            GateKind::And => a && b,
            GateKind::Nand => !(a && b),
            GateKind::Or => a || b,
            GateKind::Nor => !(a || b),
            GateKind::Xor => a ^ b,
            GateKind::Xnor => a == b,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GateKind::And => "AND",
            GateKind::Nand => "NAND",
            GateKind::Or => "OR",
            GateKind::Nor => "NOR",
            GateKind::Xor => "XOR",
            GateKind::Xnor => "XNOR",
        }
    }

    /// Display color for this gate kind.
    pub fn color(self) -> Color {
        match self {
            GateKind::And | GateKind::Nand => Color::Cyan,
            GateKind::Or | GateKind::Nor => Color::LightGreen,
            GateKind::Xor | GateKind::Xnor => Color::LightMagenta,
        }
    }
}
