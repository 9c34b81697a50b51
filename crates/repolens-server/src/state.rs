//! Server state management

use repolens_core::{AnalyzerHandle, Collaborators};
use std::sync::Arc;

/// Shared application state
///
/// The analyzer handle is immutable after startup, so it is shared without a lock.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<AnalyzerHandle>,
    pub service_name: Arc<str>,
}

impl AppState {
    pub fn new(analyzer: AnalyzerHandle, service_name: &str) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            service_name: Arc::from(service_name),
        }
    }

    /// Readiness gate: collaborators only when the handle is ready
    pub fn collaborators(&self) -> Option<&Collaborators> {
        self.analyzer.collaborators()
    }
}
