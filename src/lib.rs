#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Frequency conversion helpers used by the impedance formulas.
pub mod constants;
/// Shared numerical primitives: scalar aliases and the `Complex` value type.
pub mod math;
/// Circuit-element model and the expression/token parsers.
pub mod circuits;
/// Impedance evaluator with a thread-safe evaluation history.
pub mod model;
/// Error types shared between submodules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
