//! Analyzer lifecycle
//!
//! The handle is built once at startup and never mutated afterwards, so it can
//! be shared behind an `Arc` and read from any request without locking.

use crate::collaborator::Collaborators;
use crate::Result;
use std::panic::{self, AssertUnwindSafe};

/// Lifecycle state of the analysis collaborators
#[derive(Debug)]
pub enum AnalyzerState {
    /// Initialization has not run
    Uninitialized,
    /// Collaborators are constructed and usable
    Ready(Collaborators),
    /// Construction failed; the reason is kept for diagnostics
    Failed(String),
}

/// Owner of the collaborators for the lifetime of the process
#[derive(Debug)]
pub struct AnalyzerHandle {
    state: AnalyzerState,
}

impl AnalyzerHandle {
    /// Run `setup` exactly once and capture its result.
    ///
    /// Errors and panics from `setup` both leave the handle `Failed`. There is
    /// no way to retry on an existing handle.
    pub fn initialize<F>(setup: F) -> Self
    where
        F: FnOnce() -> Result<Collaborators>,
    {
        let state = match panic::catch_unwind(AssertUnwindSafe(setup)) {
            Ok(Ok(collaborators)) => {
                tracing::info!("Repository analyzer initialized successfully");
                AnalyzerState::Ready(collaborators)
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Failed to initialize analyzer");
                AnalyzerState::Failed(e.to_string())
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                tracing::error!(error = %reason, "Analyzer setup panicked");
                AnalyzerState::Failed(reason)
            }
        };

        Self { state }
    }

    /// A handle for a process that never attempted initialization
    pub fn uninitialized() -> Self {
        Self {
            state: AnalyzerState::Uninitialized,
        }
    }

    /// Wrap already-constructed collaborators
    pub fn ready(collaborators: Collaborators) -> Self {
        Self {
            state: AnalyzerState::Ready(collaborators),
        }
    }

    /// Whether business endpoints may call the collaborators
    pub fn is_ready(&self) -> bool {
        matches!(self.state, AnalyzerState::Ready(_))
    }

    /// Collaborators, if ready
    pub fn collaborators(&self) -> Option<&Collaborators> {
        match &self.state {
            AnalyzerState::Ready(collaborators) => Some(collaborators),
            _ => None,
        }
    }

    /// Initialization failure reason, if any
    pub fn failure(&self) -> Option<&str> {
        match &self.state {
            AnalyzerState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Best-effort text of a panic payload
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
