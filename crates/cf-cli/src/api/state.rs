//! Application state for the API server

use std::sync::Arc;

use cf_core::EmissionCalculator;
use cf_db::Database;
use tokio::sync::Mutex;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Activity storage; the lock serializes reads and writes.
    pub db: Arc<Mutex<Database>>,
    /// Factors applied to newly recorded activities.
    pub calculator: Arc<EmissionCalculator>,
}

impl AppState {
    /// Create state with the default emission factors.
    pub fn new(db: Database) -> Self {
        Self::with_calculator(db, EmissionCalculator::default())
    }

    /// Create state with a specific calculator.
    pub fn with_calculator(db: Database, calculator: EmissionCalculator) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            calculator: Arc::new(calculator),
        }
    }
}
