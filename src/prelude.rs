//! Convenience re-exports for building impedance calculations.

pub use crate::circuits::element::{CircuitElement, ConnectionKind, InvalidCircuit};
pub use crate::circuits::parser::{
    parse, parse_component_token, ComponentKind, ComponentSpec, ParseError,
};
pub use crate::constants::angular_frequency;
pub use crate::errors::ImpedanceError;
pub use crate::math::{format_sig, ArithmeticError, CScalar, Complex, Scalar};
pub use crate::model::{HistoryEntry, ImpedanceModel};
