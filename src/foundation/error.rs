/// Convenience result type used across scrolly.
pub type ScrollyResult<T> = Result<T, ScrollyError>;

/// A user-facing description of bad story data.
///
/// The three parts map onto the error panel shown to the story author: what went wrong,
/// what to do about it, and an optional hint.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ValidationFailure {
    /// What is wrong with the data.
    pub message: String,
    /// Suggested corrective action.
    pub action: String,
    /// Optional extra guidance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ValidationFailure {
    pub fn new(message: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action: action.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.action)?;
        if let Some(hint) = &self.hint {
            write!(f, " hint: {hint}")?;
        }
        Ok(())
    }
}

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ScrollyError {
    /// Step or story data violates the input contract. Fatal to start-up.
    #[error("data validation error: {0}")]
    DataValidation(ValidationFailure),

    /// An expected container, element or step target is absent.
    #[error("render target missing: {0}")]
    RenderTargetMissing(String),

    /// Invalid engine configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollyError {
    /// Build a [`ScrollyError::DataValidation`] value without a hint.
    pub fn validation(message: impl Into<String>, action: impl Into<String>) -> Self {
        Self::DataValidation(ValidationFailure::new(message, action))
    }

    /// Build a [`ScrollyError::RenderTargetMissing`] value.
    pub fn target_missing(what: impl Into<String>) -> Self {
        Self::RenderTargetMissing(what.into())
    }

    /// Build a [`ScrollyError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ScrollyError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// The validation details, when this is a data error.
    pub fn validation_failure(&self) -> Option<&ValidationFailure> {
        match self {
            Self::DataValidation(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<ValidationFailure> for ScrollyError {
    fn from(failure: ValidationFailure) -> Self {
        Self::DataValidation(failure)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
