//! Structured error types shared across the ERTP amount crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`AmountError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code, e.g. `nat.negative`.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (offending values, brand names, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the amount algebra.
///
/// Every variant is a local, synchronous failure of a single call. Nothing in
/// the amount crates retries or swallows these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum AmountError {
    /// Raw input does not match the canonical shape for its asset kind.
    #[error("shape error: {0}")]
    Shape(ErrorInfo),
    /// A set or bag contains an element or label more than once.
    #[error("duplicate error: {0}")]
    Duplicate(ErrorInfo),
    /// Two amounts (or an amount and an expected brand) disagree on brand.
    #[error("brand mismatch: {0}")]
    BrandMismatch(ErrorInfo),
    /// `subtract` was asked to remove more than the minuend holds.
    #[error("domination error: {0}")]
    Domination(ErrorInfo),
    /// `min`/`max` on amounts where neither dominates the other.
    #[error("incomparable amounts: {0}")]
    Incomparable(ErrorInfo),
    /// An untrusted amount exposes its value through a computed accessor.
    #[error("accessor violation: {0}")]
    Accessor(ErrorInfo),
    /// Brand manifest loading and parsing errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl AmountError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            AmountError::Shape(info)
            | AmountError::Duplicate(info)
            | AmountError::BrandMismatch(info)
            | AmountError::Domination(info)
            | AmountError::Incomparable(info)
            | AmountError::Accessor(info)
            | AmountError::Config(info) => info,
        }
    }

    /// Shorthand for the stable error code.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Adds a context entry, keeping the error family unchanged.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        self.map_info(|info| info.with_context(key, value.to_string()))
    }

    /// Attaches a remediation hint, keeping the error family unchanged.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        self.map_info(|info| info.with_hint(hint))
    }

    fn map_info(self, f: impl FnOnce(ErrorInfo) -> ErrorInfo) -> Self {
        match self {
            AmountError::Shape(info) => AmountError::Shape(f(info)),
            AmountError::Duplicate(info) => AmountError::Duplicate(f(info)),
            AmountError::BrandMismatch(info) => AmountError::BrandMismatch(f(info)),
            AmountError::Domination(info) => AmountError::Domination(f(info)),
            AmountError::Incomparable(info) => AmountError::Incomparable(f(info)),
            AmountError::Accessor(info) => AmountError::Accessor(f(info)),
            AmountError::Config(info) => AmountError::Config(f(info)),
        }
    }
}

/// Builds a [`AmountError::Shape`] error.
pub fn shape_error(code: impl Into<String>, message: impl Into<String>) -> AmountError {
    AmountError::Shape(ErrorInfo::new(code, message))
}

/// Builds a [`AmountError::Duplicate`] error.
pub fn duplicate_error(code: impl Into<String>, message: impl Into<String>) -> AmountError {
    AmountError::Duplicate(ErrorInfo::new(code, message))
}

/// Builds a [`AmountError::Domination`] error.
pub fn domination_error(code: impl Into<String>, message: impl Into<String>) -> AmountError {
    AmountError::Domination(ErrorInfo::new(code, message))
}
