use serde::{Deserialize, Serialize};

/// Prefix marking a structured event line on stderr
pub const EVENT_PREFIX: &str = "__PLANNER_EVENT__:";

/// Structured logging events emitted by the generation pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlannerLog {
    /// Pipeline stage started for a task
    StageStarted { task: String, stage: String },
    /// Pipeline stage completed
    StageCompleted { task: String, stage: String },
    /// Pipeline stage failed
    StageFailed {
        task: String,
        stage: String,
        error: String,
    },
    /// Cached result found for a natural key
    CacheHit { task: String, key: String },
    /// No cached result for a natural key
    CacheMiss { task: String, key: String },
    /// The language model returned no text
    OracleUnavailable { reason: String },
    /// A repair step was needed before the response parsed
    ResponseRepaired { task: String, step: String },
    /// A default-filled result was produced instead of model content
    ResultDegraded { task: String, reason: String },
    /// Result persisted under a natural key
    ResultStored { task: String, key: String },
}

impl PlannerLog {
    /// Render the event as a single prefixed line
    pub fn to_line(&self) -> Option<String> {
        serde_json::to_string(self)
            .ok()
            .map(|json| format!("{}{}", EVENT_PREFIX, json))
    }

    /// Parse a line produced by [`PlannerLog::to_line`]
    pub fn from_line(line: &str) -> Option<Self> {
        let json = line.trim().strip_prefix(EVENT_PREFIX)?;
        serde_json::from_str(json).ok()
    }

    /// Emit this log event to stderr
    pub fn emit(&self) {
        if let Some(line) = self.to_line() {
            use std::io::Write;
            eprintln!("{}", line);
            let _ = std::io::stderr().flush();
        }
    }
}

#[macro_export]
macro_rules! log_stage_start {
    ($task:expr, $stage:expr) => {
        $crate::PlannerLog::StageStarted {
            task: $task.to_string(),
            stage: $stage.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_stage_complete {
    ($task:expr, $stage:expr) => {
        $crate::PlannerLog::StageCompleted {
            task: $task.to_string(),
            stage: $stage.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_stage_failed {
    ($task:expr, $stage:expr, $error:expr) => {
        $crate::PlannerLog::StageFailed {
            task: $task.to_string(),
            stage: $stage.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_cache_hit {
    ($task:expr, $key:expr) => {
        $crate::PlannerLog::CacheHit {
            task: $task.to_string(),
            key: $key.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_cache_miss {
    ($task:expr, $key:expr) => {
        $crate::PlannerLog::CacheMiss {
            task: $task.to_string(),
            key: $key.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_oracle_unavailable {
    ($reason:expr) => {
        $crate::PlannerLog::OracleUnavailable {
            reason: $reason.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_repaired {
    ($task:expr, $step:expr) => {
        $crate::PlannerLog::ResponseRepaired {
            task: $task.to_string(),
            step: $step.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_degraded {
    ($task:expr, $reason:expr) => {
        $crate::PlannerLog::ResultDegraded {
            task: $task.to_string(),
            reason: $reason.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_stored {
    ($task:expr, $key:expr) => {
        $crate::PlannerLog::ResultStored {
            task: $task.to_string(),
            key: $key.to_string(),
        }
        .emit();
    };
}

// ============================================================================
// Console Logging Macros
// ============================================================================
// Coloured, human-readable output for the CLI, complementing the structured
// PlannerLog events above. Everything goes to stderr; stdout carries results.
// ============================================================================

/// Logs the start of a generation stage with a header and description.
///
/// # Example
/// ```
/// use project_planner_sdk::log_stage_start_console;
/// log_stage_start_console!("overview", "Generating project overview");
/// ```
///
/// Outputs:
/// ```text
/// ═══ OVERVIEW ═══
/// Generating project overview
/// ```
#[macro_export]
macro_rules! log_stage_start_console {
    ($task:expr, $description:expr) => {
        eprintln!(
            "\x1b[1;36m═══ {} ═══\x1b[0m",
            $task.to_string().to_uppercase()
        );
        eprintln!("\x1b[36m{}\x1b[0m", $description);
    };
}

/// Logs the completion of a generation stage.
///
/// Outputs:
/// ```text
/// ✓ overview complete
/// ```
#[macro_export]
macro_rules! log_stage_complete_console {
    ($task:expr) => {
        eprintln!("\x1b[32m✓ {} complete\x1b[0m", $task);
    };
}

/// Logs the number of items found.
///
/// # Example
/// ```
/// use project_planner_sdk::log_found;
/// log_found!(4, "weekly modules");
/// ```
#[macro_export]
macro_rules! log_found {
    ($count:expr, $item_type:expr) => {
        eprintln!("\x1b[36mFound {} {}\x1b[0m", $count, $item_type);
    };
}

/// Logs an informational message.
///
/// # Example
/// ```
/// use project_planner_sdk::log_info;
/// log_info!("Opening cache...");
/// ```
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        eprintln!("\x1b[36mℹ {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        eprintln!("\x1b[36mℹ {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs a warning message.
///
/// Outputs:
/// ```text
/// ⚠ Warning: cache lookup failed
/// ```
#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        eprintln!("\x1b[33m⚠ Warning: {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        eprintln!("\x1b[33m⚠ Warning: {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs that a result file has been written.
///
/// Outputs:
/// ```text
/// ✓ Saved: ./overview.json
/// ```
#[macro_export]
macro_rules! log_file_saved {
    ($path:expr) => {
        eprintln!("\x1b[32m✓ Saved: {}\x1b[0m", $path);
    };
}

/// Logs a debug message (intended to be used conditionally).
///
/// # Example
/// ```
/// use project_planner_sdk::log_debug;
/// let count = 3;
/// log_debug!("Extracted {} suggestions", count);
/// ```
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {
        eprintln!("\x1b[2m[DEBUG] {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        eprintln!("\x1b[2m[DEBUG] {}\x1b[0m", format!($fmt, $($arg)*));
    };
}
