//! Impedance evaluator with a shared, thread-safe evaluation history.

use std::sync::{Mutex, PoisonError};

use crate::circuits::element::{CircuitElement, InvalidCircuit};
use crate::math::{Complex, Scalar};

/// One successful evaluation: the tree, the driving frequency, the result.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// The evaluated circuit tree.
    pub element: CircuitElement,
    /// Driving frequency in hertz.
    pub frequency_hz: Scalar,
    /// Computed impedance.
    pub result: Complex,
}

/// Evaluates circuit trees and records every successful evaluation.
///
/// Intended to be created once and shared across concurrent callers (wrap
/// in an `Arc`). History entries are kept as one composite sequence under a
/// single lock, so an append is atomic — readers never observe an entry
/// with only some of its fields, and the three parallel accessors are
/// always index-aligned.
#[derive(Debug, Default)]
pub struct ImpedanceModel {
    history: Mutex<Vec<HistoryEntry>>,
}

impl ImpedanceModel {
    /// Creates a model with an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the impedance of `element` at `frequency_hz` and records
    /// the evaluation.
    ///
    /// On success exactly one history entry is appended; on failure the
    /// history is left untouched.
    ///
    /// # Errors
    ///
    /// Propagates any [`InvalidCircuit`] raised by the tree evaluation.
    pub fn calculate_impedance(
        &self,
        element: &CircuitElement,
        frequency_hz: Scalar,
    ) -> Result<Complex, InvalidCircuit> {
        let result = element.impedance(frequency_hz)?;
        self.lock().push(HistoryEntry {
            element: element.clone(),
            frequency_hz,
            result,
        });
        Ok(result)
    }

    /// Returns a point-in-time snapshot of the full history.
    #[must_use]
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock().clone()
    }

    /// Returns a snapshot of the evaluated circuit trees, in evaluation order.
    #[must_use]
    pub fn history_elements(&self) -> Vec<CircuitElement> {
        self.lock().iter().map(|e| e.element.clone()).collect()
    }

    /// Returns a snapshot of the driving frequencies, index-aligned with
    /// [`Self::history_elements`].
    #[must_use]
    pub fn history_frequencies(&self) -> Vec<Scalar> {
        self.lock().iter().map(|e| e.frequency_hz).collect()
    }

    /// Returns a snapshot of the computed impedances, index-aligned with
    /// [`Self::history_elements`].
    #[must_use]
    pub fn history_results(&self) -> Vec<Complex> {
        self.lock().iter().map(|e| e.result).collect()
    }

    /// Returns the current number of history entries.
    #[must_use]
    pub fn history_size(&self) -> usize {
        self.lock().len()
    }

    /// Removes all history entries.
    pub fn clear_history(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<HistoryEntry>> {
        // Entries are pushed fully formed, so data behind a poisoned lock
        // is still consistent.
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
