use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("invalid {name}: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: String,
    },

    #[error("{senders} sharing senders but {files} files were given (one file per sender)")]
    SenderCountMismatch { senders: usize, files: usize },

    #[error("no files to schedule")]
    NoFiles,

    #[error("could not parse size '{0}' (expected bytes or a KiB/MiB suffix)")]
    InvalidSize(String),
}

impl CalcError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid(name, format!("{value} is not finite")));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid(name, format!("{value} must be greater than zero")));
    }
    Ok(value)
}

pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid(name, format!("{value} is not finite")));
    }
    if value < 0.0 {
        return Err(CalcError::invalid(name, format!("{value} must not be negative")));
    }
    Ok(value)
}
