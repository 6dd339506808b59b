use std::sync::Arc;

use tokio::sync::RwLock;

use crate::services::EnrollmentEngine;

/// One lock over the whole engine: promotion touches a course and several
/// students, and callers must never observe half of it.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<EnrollmentEngine>>,
}

impl AppState {
    pub fn new(engine: EnrollmentEngine) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }
}
