//! Pending / ready / failed state for values that may still be loading.

use serde::{Deserialize, Serialize};
use taqwim_types::TaqwimError;

/// What a presentation layer shows while a date or schedule is resolving.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum LoadState<T> {
    #[default]
    Pending,
    Ready(T),
    Failed(TaqwimError),
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<T, TaqwimError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::Failed(e),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// True for the distinguished "nothing could be produced" outcome, as
    /// opposed to a rejected input.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Failed(TaqwimError::Unavailable))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&TaqwimError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> LoadState<&T> {
        match self {
            Self::Pending => LoadState::Pending,
            Self::Ready(v) => LoadState::Ready(v),
            Self::Failed(e) => LoadState::Failed(e.clone()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U> {
        match self {
            Self::Pending => LoadState::Pending,
            Self::Ready(v) => LoadState::Ready(f(v)),
            Self::Failed(e) => LoadState::Failed(e),
        }
    }
}

impl<T> From<Result<T, TaqwimError>> for LoadState<T> {
    fn from(result: Result<T, TaqwimError>) -> Self {
        Self::from_result(result)
    }
}
