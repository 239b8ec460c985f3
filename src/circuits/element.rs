use std::fmt;

use thiserror::Error;

use crate::constants::angular_frequency;
use crate::math::{ArithmeticError, Complex, Scalar};

/// Connection topology for a group of circuit elements.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    /// Series connection (impedances add linearly).
    Series,
    /// Parallel connection (admittances add linearly).
    Parallel,
}

impl ConnectionKind {
    /// Keyword used for this connection in the expression grammar.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Series => "series",
            Self::Parallel => "parallel",
        }
    }
}

/// Errors raised while evaluating a circuit tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCircuit {
    /// Raised when a reactive element is evaluated at a frequency `<= 0`.
    #[error("frequency must be > 0 for reactive elements")]
    NonPositiveFrequency,
    /// Raised when a connection node has no children to aggregate.
    #[error("connection node contains no children")]
    EmptyConnection,
    /// Raised when the aggregation arithmetic itself fails, preserving the
    /// underlying message.
    #[error("computation error: {0}")]
    Computation(#[from] ArithmeticError),
}

/// A passive circuit element: a primitive component or a series/parallel
/// group of child elements.
///
/// Trees are built bottom-up by [`crate::circuits::parser::parse`] and are
/// immutable afterwards; a child belongs to exactly one parent.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitElement {
    /// Ideal resistor, resistance in ohms.
    Resistor {
        /// Resistance in ohms.
        resistance: Scalar,
    },
    /// Ideal capacitor, capacitance in farads.
    Capacitor {
        /// Capacitance in farads.
        capacitance: Scalar,
    },
    /// Ideal inductor, inductance in henries.
    Inductor {
        /// Inductance in henries.
        inductance: Scalar,
    },
    /// Series or parallel group of child elements, in insertion order.
    Connection {
        /// Combination rule applied to the children.
        kind: ConnectionKind,
        /// Ordered child elements; must be non-empty to evaluate.
        children: Vec<CircuitElement>,
    },
}

impl CircuitElement {
    /// Creates a resistor with `resistance` in ohms.
    #[must_use]
    pub const fn resistor(resistance: Scalar) -> Self {
        Self::Resistor { resistance }
    }

    /// Creates a capacitor with `capacitance` in farads.
    #[must_use]
    pub const fn capacitor(capacitance: Scalar) -> Self {
        Self::Capacitor { capacitance }
    }

    /// Creates an inductor with `inductance` in henries.
    #[must_use]
    pub const fn inductor(inductance: Scalar) -> Self {
        Self::Inductor { inductance }
    }

    /// Creates a series group over `children`.
    #[must_use]
    pub const fn series(children: Vec<Self>) -> Self {
        Self::Connection {
            kind: ConnectionKind::Series,
            children,
        }
    }

    /// Creates a parallel group over `children`.
    #[must_use]
    pub const fn parallel(children: Vec<Self>) -> Self {
        Self::Connection {
            kind: ConnectionKind::Parallel,
            children,
        }
    }

    /// Computes the impedance of this element at `frequency_hz`.
    ///
    /// Resistors accept any frequency; capacitors and inductors require
    /// `frequency_hz > 0`. Connection groups aggregate their children in
    /// order: series sums impedances, parallel sums admittances and inverts.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCircuit::NonPositiveFrequency`] for a reactive
    /// element at `frequency_hz <= 0`, [`InvalidCircuit::EmptyConnection`]
    /// for a childless group, and [`InvalidCircuit::Computation`] when a
    /// parallel combination hits an exactly-zero reciprocal.
    pub fn impedance(&self, frequency_hz: Scalar) -> Result<Complex, InvalidCircuit> {
        match self {
            Self::Resistor { resistance } => Ok(Complex::new(*resistance, 0.0)),
            Self::Capacitor { capacitance } => {
                if frequency_hz <= 0.0 {
                    return Err(InvalidCircuit::NonPositiveFrequency);
                }
                let omega = angular_frequency(frequency_hz);
                Ok(Complex::new(0.0, -1.0 / (omega * capacitance)))
            }
            Self::Inductor { inductance } => {
                if frequency_hz <= 0.0 {
                    return Err(InvalidCircuit::NonPositiveFrequency);
                }
                let omega = angular_frequency(frequency_hz);
                Ok(Complex::new(0.0, omega * inductance))
            }
            Self::Connection { kind, children } => {
                if children.is_empty() {
                    return Err(InvalidCircuit::EmptyConnection);
                }
                match kind {
                    ConnectionKind::Series => {
                        let mut total = Complex::ZERO;
                        for child in children {
                            total = total + child.impedance(frequency_hz)?;
                        }
                        Ok(total)
                    }
                    ConnectionKind::Parallel => {
                        let mut admittance = Complex::ZERO;
                        for child in children {
                            let z = child.impedance(frequency_hz)?;
                            admittance = admittance + z.reciprocal()?;
                        }
                        Ok(admittance.reciprocal()?)
                    }
                }
            }
        }
    }

    /// Returns the canonical textual form of this element, e.g. `R(100.0)`
    /// or `series(R(100.0), parallel(C(1e-6), L(0.01)))`.
    ///
    /// Primitive values are rendered with Rust's shortest round-trippable
    /// float formatting; child order is preserved.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Resistor { resistance } => format!("R({resistance:?})"),
            Self::Capacitor { capacitance } => format!("C({capacitance:?})"),
            Self::Inductor { inductance } => format!("L({inductance:?})"),
            Self::Connection { kind, children } => {
                let joined = children
                    .iter()
                    .map(Self::description)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}({joined})", kind.keyword())
            }
        }
    }
}

impl fmt::Display for CircuitElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn resistor_impedance_is_real_at_any_frequency() {
        let r = CircuitElement::resistor(100.0);
        for f in [0.0, -5.0, 1.0, 1.0e6] {
            let z = r.impedance(f).unwrap();
            assert_eq!(z, Complex::new(100.0, 0.0));
        }
    }

    #[test]
    fn capacitor_impedance_is_negative_reactance() {
        let c = CircuitElement::capacitor(1.0e-6);
        let z = c.impedance(1.0e3).unwrap();
        assert_relative_eq!(z.re, 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(
            z.im,
            -1.0 / (angular_frequency(1.0e3) * 1.0e-6),
            max_relative = 1.0e-9
        );
    }

    #[test]
    fn inductor_impedance_is_positive_reactance() {
        let l = CircuitElement::inductor(0.01);
        let z = l.impedance(50.0).unwrap();
        assert_relative_eq!(z.re, 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(z.im, angular_frequency(50.0) * 0.01, max_relative = 1.0e-9);
    }

    #[test]
    fn reactive_elements_reject_non_positive_frequency() {
        for f in [0.0, -1.0] {
            assert_eq!(
                CircuitElement::capacitor(1.0e-6).impedance(f),
                Err(InvalidCircuit::NonPositiveFrequency)
            );
            assert_eq!(
                CircuitElement::inductor(0.01).impedance(f),
                Err(InvalidCircuit::NonPositiveFrequency)
            );
        }
    }

    #[test]
    fn series_resistors_add() {
        let tree = CircuitElement::series(vec![
            CircuitElement::resistor(100.0),
            CircuitElement::resistor(50.0),
        ]);
        let z = tree.impedance(1.0e3).unwrap();
        assert_relative_eq!(z.re, 150.0, epsilon = 1.0e-9);
        assert_relative_eq!(z.im, 0.0, epsilon = 1.0e-9);
    }

    #[test]
    fn parallel_equal_resistors_halve() {
        let tree = CircuitElement::parallel(vec![
            CircuitElement::resistor(100.0),
            CircuitElement::resistor(100.0),
        ]);
        let z = tree.impedance(60.0).unwrap();
        assert_relative_eq!(z.re, 50.0, epsilon = 1.0e-9);
        assert_relative_eq!(z.im, 0.0, epsilon = 1.0e-9);
    }

    #[test]
    fn series_rlc_combines_reactances() {
        let tree = CircuitElement::series(vec![
            CircuitElement::resistor(10.0),
            CircuitElement::inductor(1.0e-3),
            CircuitElement::capacitor(1.0e-6),
        ]);
        let f = 1.0e3;
        let omega = angular_frequency(f);
        let z = tree.impedance(f).unwrap();
        assert_relative_eq!(z.re, 10.0, epsilon = 1.0e-9);
        assert_relative_eq!(
            z.im,
            omega * 1.0e-3 - 1.0 / (omega * 1.0e-6),
            max_relative = 1.0e-9
        );
    }

    #[test]
    fn empty_connection_fails_for_both_kinds() {
        assert_eq!(
            CircuitElement::series(Vec::new()).impedance(1.0e3),
            Err(InvalidCircuit::EmptyConnection)
        );
        assert_eq!(
            CircuitElement::parallel(Vec::new()).impedance(1.0e3),
            Err(InvalidCircuit::EmptyConnection)
        );
    }

    #[test]
    fn child_failure_propagates_out_of_groups() {
        let tree = CircuitElement::series(vec![
            CircuitElement::resistor(10.0),
            CircuitElement::capacitor(1.0e-6),
        ]);
        assert_eq!(
            tree.impedance(0.0),
            Err(InvalidCircuit::NonPositiveFrequency)
        );
    }

    #[test]
    fn parallel_zero_impedance_branch_is_a_computation_error() {
        let tree = CircuitElement::parallel(vec![CircuitElement::resistor(0.0)]);
        let err = tree.impedance(1.0e3).unwrap_err();
        assert_eq!(
            err,
            InvalidCircuit::Computation(ArithmeticError::DivisionByZero)
        );
        assert_eq!(
            err.to_string(),
            "computation error: division by zero in complex reciprocal"
        );
    }

    #[test]
    fn parallel_cancelling_reactances_fail_with_division_by_zero() {
        // At the resonant frequency of an ideal LC pair the admittances
        // cancel exactly and the equivalent impedance is unbounded.
        let c: f64 = 1.0e-6;
        let l: f64 = 0.01;
        let f = 1.0 / (2.0 * std::f64::consts::PI * (l * c).sqrt());
        let omega = angular_frequency(f);
        // The closed-form resonance only cancels bit-exactly if the two
        // reactances round identically; build the cancellation directly.
        let zl = CircuitElement::inductor(l).impedance(f).unwrap();
        let zc = CircuitElement::capacitor(c).impedance(f).unwrap();
        let sum = zl.reciprocal().unwrap() + zc.reciprocal().unwrap();
        if sum == Complex::ZERO {
            let tree = CircuitElement::parallel(vec![
                CircuitElement::inductor(l),
                CircuitElement::capacitor(c),
            ]);
            assert_eq!(
                tree.impedance(f),
                Err(InvalidCircuit::Computation(ArithmeticError::DivisionByZero))
            );
        } else {
            // Rounding left a residual; the combination stays finite.
            assert!(sum.magnitude() < 1.0 / (omega * l));
        }
    }

    #[test]
    fn descriptions_pin_primitive_formats() {
        assert_eq!(CircuitElement::resistor(100.0).description(), "R(100.0)");
        assert_eq!(CircuitElement::inductor(0.01).description(), "L(0.01)");
        assert_eq!(CircuitElement::capacitor(1.0e-6).description(), "C(1e-6)");
    }

    #[test]
    fn description_preserves_child_order() {
        let tree = CircuitElement::series(vec![
            CircuitElement::resistor(100.0),
            CircuitElement::parallel(vec![
                CircuitElement::capacitor(1.0e-6),
                CircuitElement::inductor(0.01),
            ]),
            CircuitElement::resistor(50.0),
        ]);
        assert_eq!(
            tree.description(),
            "series(R(100.0), parallel(C(1e-6), L(0.01)), R(50.0))"
        );
        assert_eq!(tree.to_string(), tree.description());
    }
}
