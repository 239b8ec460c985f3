//! Shared error types used across submodules.

use thiserror::Error;

use crate::circuits::element::InvalidCircuit;
use crate::circuits::parser::ParseError;

/// Top-level error type for the crate.
///
/// Parse failures and evaluation-domain failures are deliberately distinct
/// kinds; this wrapper exists for callers that funnel both through one
/// `Result`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImpedanceError {
    /// Wraps expression/token grammar failures.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Wraps evaluation-domain failures.
    #[error(transparent)]
    Circuit(#[from] InvalidCircuit),
}
