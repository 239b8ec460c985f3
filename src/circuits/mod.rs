//! Circuit-element primitives, composition, and parsing.

/// Circuit-element sum type and impedance aggregation.
pub mod element;
/// Leaf-token and nested-expression parsers.
pub mod parser;

pub use element::{CircuitElement, ConnectionKind, InvalidCircuit};
pub use parser::{parse, parse_component_token, ComponentKind, ComponentSpec, ParseError};
