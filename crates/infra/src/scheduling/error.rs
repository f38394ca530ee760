//! Lifecycle errors of the refresh loop
//!
//! Refresh failures never surface here: the loop logs them and waits for the
//! next tick. These variants only describe misuse of `start`/`stop` and a
//! background task that did not wind down cleanly.

use messesinfo_domain::MessesError;
use thiserror::Error;

use crate::errors::InfraError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    /// `start` called while the refresh loop task is alive
    #[error("refresh loop is already running")]
    AlreadyRunning,

    /// `stop` called with no refresh loop task
    #[error("refresh loop is not running")]
    NotRunning,

    /// The cancelled refresh loop did not exit within the join window
    #[error("refresh loop did not stop within {seconds}s of cancellation")]
    Timeout { seconds: u64 },

    /// The refresh loop task panicked or was aborted
    #[error("refresh loop task ended abnormally: {0}")]
    TaskJoinFailed(String),
}

impl From<SchedulerError> for InfraError {
    fn from(err: SchedulerError) -> Self {
        let message = err.to_string();
        InfraError(match err {
            SchedulerError::AlreadyRunning | SchedulerError::NotRunning => MessesError::InvalidInput(message),
            SchedulerError::Timeout { .. } | SchedulerError::TaskJoinFailed(_) => MessesError::Internal(message),
        })
    }
}

impl From<SchedulerError> for MessesError {
    fn from(err: SchedulerError) -> Self {
        InfraError::from(err).into()
    }
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_misuse_maps_to_invalid_input() {
        assert_eq!(
            MessesError::from(SchedulerError::AlreadyRunning),
            MessesError::InvalidInput("refresh loop is already running".into())
        );
        assert_eq!(
            MessesError::from(SchedulerError::NotRunning),
            MessesError::InvalidInput("refresh loop is not running".into())
        );
    }

    #[test]
    fn stuck_loop_maps_to_internal() {
        let err = MessesError::from(SchedulerError::Timeout { seconds: 5 });
        assert_eq!(err, MessesError::Internal("refresh loop did not stop within 5s of cancellation".into()));
        assert_eq!(err.label(), "internal");
    }
}
