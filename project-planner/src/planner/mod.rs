//! Project plan generation.
//!
//! A single generic pipeline turns a typed request into a typed result by
//! way of a prompt, one model completion, best-effort JSON repair and a
//! lenient mapping onto the result shape.
//!
//! ## Module Structure
//!
//! - `types` - Requests, normalized documents and result shapes
//! - `prompts` - Prompt templates with worked examples
//! - `normalize` - Fence stripping, JSON repair and bullet extraction
//! - `lenient` - Forgiving serde field decoders
//! - `mapper` - Document to result mapping
//! - `batch` - Bounded-concurrency fan-out
//! - `cli` - Command-line argument definitions
//! - `workflow` - Pipeline orchestration and command dispatch

pub mod batch;
pub mod cli;
pub mod lenient;
pub mod mapper;
pub mod normalize;
pub mod prompts;
pub mod types;
pub mod workflow;

pub use mapper::map;
pub use normalize::{normalize, repair};
pub use prompts::build;
pub use types::*;
pub use workflow::{run_workflow, ModulePlan, Planner};
