//! Parsers for component tokens and nested series/parallel expressions.
//!
//! A component token has the form `KIND:VALUE` (`R:100`, `capacitor:1e-6`);
//! a full expression is either a single token or a `series(...)` /
//! `parallel(...)` group with comma-separated subexpressions:
//!
//! ```text
//! series(R:100, parallel(C:1e-6, L:0.01), R:50)
//! ```

use std::fmt;

use thiserror::Error;

use super::element::{CircuitElement, ConnectionKind};
use crate::math::Scalar;

/// Errors raised while parsing a token or expression.
///
/// Parsing is all-or-nothing: no partial tree is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Raised for an empty (or all-whitespace) component token.
    #[error("empty component token")]
    EmptyToken,
    /// Raised when a component token has no `:` separator.
    #[error("expected `KIND:value` component token, got `{0}`")]
    MissingSeparator(String),
    /// Raised when the kind half of a component token is empty.
    #[error("component kind is empty in `{0}`")]
    EmptyKind(String),
    /// Raised when the value half of a component token is not a finite float.
    #[error("invalid numeric value: {0}")]
    InvalidValue(String),
    /// Raised for a component kind that maps to none of R/C/L.
    #[error("unknown component type: {0}")]
    UnknownComponent(String),
    /// Raised for a group keyword other than `series`/`parallel`.
    #[error("unknown connection type: {0}")]
    UnknownConnection(String),
    /// Raised when an opening parenthesis is never closed.
    #[error("unmatched parenthesis in expression")]
    UnmatchedParenthesis,
    /// Raised when text follows a group's closing parenthesis.
    #[error("unexpected trailing characters: `{0}`")]
    TrailingCharacters(String),
}

/// Kind of a primitive component, normalized from user input.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// `R` / `resistor`.
    Resistor,
    /// `C` / `capacitor`.
    Capacitor,
    /// `L` / `inductor`.
    Inductor,
}

impl ComponentKind {
    /// Normalizes a raw kind token.
    ///
    /// Accepts the single letters `R`/`C`/`L` and the full words
    /// `resistor`/`capacitor`/`inductor`, case-insensitively; any other
    /// string falls back to its first character. Returns `None` when
    /// nothing matches.
    #[must_use]
    pub fn normalize(raw: &str) -> Option<Self> {
        let kind = raw.trim().to_ascii_uppercase();
        match kind.as_str() {
            "R" | "RESISTOR" => Some(Self::Resistor),
            "C" | "CAPACITOR" => Some(Self::Capacitor),
            "L" | "INDUCTOR" => Some(Self::Inductor),
            _ => match kind.chars().next() {
                Some('R') => Some(Self::Resistor),
                Some('C') => Some(Self::Capacitor),
                Some('L') => Some(Self::Inductor),
                _ => None,
            },
        }
    }

    /// Single-letter code for this kind.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Resistor => "R",
            Self::Capacitor => "C",
            Self::Inductor => "L",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Normalized specification for a single primitive component.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentSpec {
    kind: ComponentKind,
    value: Scalar,
}

impl ComponentSpec {
    /// Creates a specification from an already-normalized kind and value.
    #[must_use]
    pub const fn new(kind: ComponentKind, value: Scalar) -> Self {
        Self { kind, value }
    }

    /// The normalized component kind.
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// The numeric value (ohms, farads, or henries depending on the kind).
    #[must_use]
    pub const fn value(&self) -> Scalar {
        self.value
    }

    /// Builds the corresponding primitive circuit element.
    #[must_use]
    pub const fn into_element(self) -> CircuitElement {
        match self.kind {
            ComponentKind::Resistor => CircuitElement::resistor(self.value),
            ComponentKind::Capacitor => CircuitElement::capacitor(self.value),
            ComponentKind::Inductor => CircuitElement::inductor(self.value),
        }
    }
}

impl fmt::Display for ComponentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

/// Parses a single `KIND:VALUE` component token.
///
/// Surrounding whitespace is trimmed; the value must be a finite decimal or
/// exponential float literal. The value is validated before the kind, so a
/// token like `X:abc` reports the numeric error.
///
/// # Errors
///
/// Returns a [`ParseError`] for an empty token, a missing `:`, an empty
/// kind, a non-finite or unparseable value, or an unknown kind.
pub fn parse_component_token(token: &str) -> Result<ComponentSpec, ParseError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ParseError::EmptyToken);
    }
    let Some((kind_raw, value_raw)) = token.split_once(':') else {
        return Err(ParseError::MissingSeparator(token.to_string()));
    };
    let kind_raw = kind_raw.trim();
    let value_raw = value_raw.trim();
    let value = value_raw
        .parse::<Scalar>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidValue(value_raw.to_string()))?;
    if kind_raw.is_empty() {
        return Err(ParseError::EmptyKind(token.to_string()));
    }
    let kind = ComponentKind::normalize(kind_raw)
        .ok_or_else(|| ParseError::UnknownComponent(kind_raw.to_string()))?;
    Ok(ComponentSpec::new(kind, value))
}

/// Parses a nested circuit expression into a [`CircuitElement`] tree.
///
/// An input with no `(` is handed to [`parse_component_token`] as a single
/// leaf; otherwise the text before the first `(` must start with `series`
/// or `parallel` (case-insensitive) and the parenthesized interior is split
/// on top-level commas, each part parsed recursively. An empty interior
/// parses to a childless group, which is rejected at evaluation time.
///
/// # Errors
///
/// Returns a [`ParseError`] on any grammar violation; see the variant docs.
pub fn parse(expr: &str) -> Result<CircuitElement, ParseError> {
    let expr = expr.trim();
    let Some(open) = expr.find('(') else {
        return parse_component_token(expr).map(ComponentSpec::into_element);
    };
    let name = expr[..open].trim().to_ascii_lowercase();
    let close = find_matching_paren(expr, open)?;
    let trailing = expr[close + 1..].trim();
    if !trailing.is_empty() {
        return Err(ParseError::TrailingCharacters(trailing.to_string()));
    }
    let kind = if name.starts_with("series") {
        ConnectionKind::Series
    } else if name.starts_with("parallel") {
        ConnectionKind::Parallel
    } else {
        return Err(ParseError::UnknownConnection(name));
    };
    let children = split_top_level(&expr[open + 1..close])
        .into_iter()
        .map(parse)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CircuitElement::Connection { kind, children })
}

/// Returns the index of the parenthesis matching the one at `open`.
fn find_matching_paren(s: &str, open: usize) -> Result<usize, ParseError> {
    let mut depth = 0_i32;
    for (i, c) in s[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(open + i);
                }
            }
            _ => {}
        }
    }
    Err(ParseError::UnmatchedParenthesis)
}

/// Splits `s` on commas at parenthesis depth zero, trimming each part.
///
/// Interior empty parts are kept (they fail downstream as empty tokens);
/// a fully empty input yields no parts.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0_i32;
    let mut start = 0_usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let tail = s[start..].trim();
    if !tail.is_empty() {
        parts.push(tail);
    }
    parts
}
