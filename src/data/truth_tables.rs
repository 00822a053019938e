use std::fmt;
use std::str::FromStr;

use crate::data::dataset::Dataset;
use crate::error::{NnError, Result};
use crate::math::matrix::Matrix;

/// The four input combinations of a two-input gate, in binary counting order.
pub const GATE_INPUTS: [[f64; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];

/// Two-input boolean gates with a built-in truth table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicGate {
    And,
    Nand,
    Or,
    Nor,
    Xor,
    Xnor,
}

impl LogicGate {
    pub const ALL: [LogicGate; 6] = [
        LogicGate::And,
        LogicGate::Nand,
        LogicGate::Or,
        LogicGate::Nor,
        LogicGate::Xor,
        LogicGate::Xnor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LogicGate::And => "AND",
            LogicGate::Nand => "NAND",
            LogicGate::Or => "OR",
            LogicGate::Nor => "NOR",
            LogicGate::Xor => "XOR",
            LogicGate::Xnor => "XNOR",
        }
    }

    pub fn eval(&self, a: bool, b: bool) -> bool {
        match self {
            LogicGate::And => a && b,
            LogicGate::Nand => !(a && b),
            LogicGate::Or => a || b,
            LogicGate::Nor => !(a || b),
            LogicGate::Xor => a != b,
            LogicGate::Xnor => a == b,
        }
    }

    /// Expected outputs for [`GATE_INPUTS`], in order.
    pub fn truth_table(&self) -> [f64; 4] {
        GATE_INPUTS.map(|[a, b]| if self.eval(a > 0.5, b > 0.5) { 1.0 } else { 0.0 })
    }

    /// `4x2` inputs against `4x1` targets.
    pub fn dataset(&self) -> Result<Dataset> {
        Dataset::new(gate_inputs()?, Matrix::from_flat(4, 1, &self.truth_table())?)
    }
}

impl fmt::Display for LogicGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogicGate {
    type Err = NnError;

    fn from_str(s: &str) -> Result<LogicGate> {
        LogicGate::ALL
            .into_iter()
            .find(|gate| gate.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| NnError::InvalidParameter(format!("unknown logic gate '{s}'")))
    }
}

fn gate_inputs() -> Result<Matrix> {
    Matrix::from_flat(4, 2, &GATE_INPUTS.concat())
}

/// Half adder: inputs `(a, b)`, targets `[sum, carry]`.
pub fn half_adder() -> Result<Dataset> {
    #[rustfmt::skip]
    let targets = [
        0.0, 0.0,
        1.0, 0.0,
        1.0, 0.0,
        0.0, 1.0,
    ];
    Dataset::new(gate_inputs()?, Matrix::from_flat(4, 2, &targets)?)
}

/// Full adder: inputs `(a, b, carry_in)`, targets `[sum, carry_out]`.
pub fn full_adder() -> Result<Dataset> {
    let mut inputs = Vec::with_capacity(8 * 3);
    let mut targets = Vec::with_capacity(8 * 2);

    for row in 0..8u8 {
        let bits = [(row >> 2) & 1, (row >> 1) & 1, row & 1];
        let total: u8 = bits.iter().sum();
        inputs.extend(bits.iter().map(|&b| f64::from(b)));
        targets.push(f64::from(total & 1));
        targets.push(f64::from(total >> 1));
    }

    Dataset::new(Matrix::from_flat(8, 3, &inputs)?, Matrix::from_flat(8, 2, &targets)?)
}
