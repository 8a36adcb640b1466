//! Error types used throughout the client

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ActivityId, SaveStep};

/// Main error type for the Qbis client
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum QbisError {
    /// Network or HTTP level failure. Never retried automatically.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Malformed date string or unexpected payload shape.
    #[error("Format error: {0}")]
    Format(String),

    /// Identity, day or activity lookup miss.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Sign-policy violation on a salary edit, rejected before any network call.
    #[error("Policy violation: {0}")]
    Policy(String),

    /// The remote service explicitly refused a save step.
    #[error("Save rejected: {0}")]
    SaveRejected(SaveRejection),

    /// Locally detected logically impossible state.
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// `save()` was called on a week without local modifications.
    #[error("Week has no unsaved changes")]
    NoChanges,

    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure while lazily resolving an activity record.
    #[error("Activity {activity_id}: {source}")]
    ActivityLookup {
        activity_id: ActivityId,
        #[source]
        source: Box<QbisError>,
    },
}

impl QbisError {
    /// Wrap an error raised while resolving `activity_id`.
    pub fn activity_lookup(activity_id: ActivityId, source: QbisError) -> Self {
        Self::ActivityLookup { activity_id, source: Box::new(source) }
    }

    /// Returns true if re-issuing the whole operation may succeed.
    ///
    /// Only transport failures qualify; nothing in the client retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::ActivityLookup { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    /// The innermost error, unwrapping any activity lookup context.
    pub fn root(&self) -> &QbisError {
        match self {
            Self::ActivityLookup { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Details of a save step the remote service refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRejection {
    pub step: SaveStep,
    pub messages: Vec<String>,
}

impl SaveRejection {
    pub fn new(step: SaveStep, messages: Vec<String>) -> Self {
        Self { step, messages }
    }
}

impl fmt::Display for SaveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.messages.is_empty() {
            write!(f, "{} was not saved", self.step)
        } else {
            write!(f, "{} was not saved: {}", self.step, self.messages.join("; "))
        }
    }
}

/// Result type alias for Qbis operations
pub type Result<T> = std::result::Result<T, QbisError>;
