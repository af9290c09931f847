// Configuration layers
pub mod config;

// SQLite result cache
pub mod database;

// Error taxonomy
pub mod error;

// Completion client
pub mod oracle;

// Generation pipeline
pub mod planner;

pub use error::{PlannerError, PlannerResult};
