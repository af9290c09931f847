//! CLI argument definitions for the project planner.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::types::{
    GenerationRequest, ModuleDetailsParams, ModuleOutline, ModulePlanParams, ProjectModule,
    SuggestionParams,
};
use crate::config::PlannerConfig;

/// AI project-plan generator
///
/// Turns a student's skill level, interests and time budget into project
/// suggestions, roadmaps, weekly modules, per-module task breakdowns,
/// resource lists and diagrams. Results are cached in SQLite by request.
#[derive(Parser, Debug, Clone)]
#[command(name = "project-planner")]
#[command(about = "AI project-plan generator")]
#[command(version)]
pub struct Args {
    /// Path to a YAML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip the result cache for this run
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Maximum concurrent model calls for `plan`
    #[arg(long, global = true, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Write the JSON result to a file instead of stdout
    #[arg(long, short, global = true, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Suggest three project ideas
    Suggest {
        /// Beginner, Intermediate or Advanced
        #[arg(long)]
        skill_level: String,

        /// Kind of project (web app, CLI tool, game, ...)
        #[arg(long)]
        project_type: String,

        #[arg(long)]
        technology: String,

        /// short, medium or long
        #[arg(long)]
        duration: Option<String>,

        #[arg(long)]
        domain: Option<String>,

        /// e.g. "2 hours/day"
        #[arg(long)]
        time_commitment: Option<String>,
    },

    /// Roadmap, tech stack, diagrams and resources for a project
    Details {
        #[arg(long)]
        title: String,
    },

    /// High-level overview with time estimates
    Overview {
        #[arg(long)]
        title: String,
    },

    /// Weekly module breakdown
    Modules {
        #[arg(long)]
        title: String,

        #[arg(long, default_value_t = 4)]
        weeks: u32,

        #[arg(long, default_value_t = 2)]
        hours_per_day: u32,

        /// Project identifier; generated when omitted
        #[arg(long)]
        project_id: Option<String>,
    },

    /// Task breakdown for one module
    ///
    /// The module is read from a JSON file holding either an outline
    /// (`title`, `summary`, `steps`) or a module produced by `modules`.
    ModuleDetails {
        #[arg(long, value_name = "PATH")]
        module: PathBuf,

        #[arg(long, default_value_t = 4)]
        weeks: u32,

        #[arg(long, default_value_t = 2)]
        hours_per_day: u32,

        /// Defaults to the module file's `project_id`
        #[arg(long)]
        project_id: Option<String>,

        /// Defaults to the module file's `module_id`
        #[arg(long)]
        module_id: Option<String>,
    },

    /// Learning resources for a project
    Resources {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        overview: String,
    },

    /// UML, flowchart and data-flow diagrams
    Diagrams {
        #[arg(long)]
        title: String,
    },

    /// Modules plus details for every module
    Plan {
        #[arg(long)]
        title: String,

        #[arg(long, default_value_t = 4)]
        weeks: u32,

        #[arg(long, default_value_t = 2)]
        hours_per_day: u32,

        #[arg(long)]
        project_id: Option<String>,
    },

    /// List stored module plans
    Projects,

    /// Aggregate stored step resources of a project's modules
    ModuleResources {
        #[arg(long)]
        project_id: String,
    },
}

fn require_text(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("--{} must not be empty", name);
    }
    Ok(())
}

fn require_schedule(weeks: u32, hours_per_day: u32) -> Result<()> {
    if weeks == 0 {
        anyhow::bail!("--weeks must be at least 1");
    }
    if hours_per_day == 0 || hours_per_day > 24 {
        anyhow::bail!("--hours-per-day must be between 1 and 24, got {}", hours_per_day);
    }
    Ok(())
}

impl Args {
    /// Validate arguments for the selected command
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == Some(0) {
            anyhow::bail!("--concurrency must be at least 1");
        }

        match &self.command {
            Command::Suggest {
                skill_level,
                project_type,
                technology,
                ..
            } => {
                require_text("skill-level", skill_level)?;
                require_text("project-type", project_type)?;
                require_text("technology", technology)
            }
            Command::Details { title }
            | Command::Overview { title }
            | Command::Resources { title, .. }
            | Command::Diagrams { title } => require_text("title", title),
            Command::Modules {
                title,
                weeks,
                hours_per_day,
                ..
            }
            | Command::Plan {
                title,
                weeks,
                hours_per_day,
                ..
            } => {
                require_text("title", title)?;
                require_schedule(*weeks, *hours_per_day)
            }
            Command::ModuleDetails {
                weeks,
                hours_per_day,
                ..
            } => require_schedule(*weeks, *hours_per_day),
            Command::Projects => Ok(()),
            Command::ModuleResources { project_id } => require_text("project-id", project_id),
        }
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut PlannerConfig) {
        if self.no_cache {
            config.cache_enabled = false;
        }
        if self.debug {
            config.debug = true;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
    }
}

fn new_project_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Read a module outline file, returning the ids it carries when it is a
/// generated module
fn load_module_file(path: &Path) -> Result<(ModuleOutline, Option<ProjectModule>)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read module file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("Module file is not valid JSON: {}", path.display()))?;

    if value.get("module_title").is_some() {
        let module: ProjectModule =
            serde_json::from_value(value).context("Failed to decode module")?;
        return Ok((ModuleOutline::from(&module), Some(module)));
    }

    let outline: ModuleOutline =
        serde_json::from_value(value).context("Failed to decode module outline")?;
    Ok((outline, None))
}

impl Command {
    /// Single generation request for this command, if it is one
    pub fn request(&self) -> Result<Option<GenerationRequest>> {
        let request = match self {
            Command::Suggest {
                skill_level,
                project_type,
                technology,
                duration,
                domain,
                time_commitment,
            } => GenerationRequest::Suggestions(SuggestionParams {
                skill_level: skill_level.clone(),
                project_type: project_type.clone(),
                technology: technology.clone(),
                duration: duration.clone(),
                domain: domain.clone(),
                time_commitment: time_commitment.clone(),
            }),
            Command::Details { title } => GenerationRequest::Details {
                project_title: title.clone(),
            },
            Command::Overview { title } => GenerationRequest::Overview {
                project_title: title.clone(),
            },
            Command::Modules {
                title,
                weeks,
                hours_per_day,
                project_id,
            } => GenerationRequest::Modules(ModulePlanParams {
                project_title: title.clone(),
                total_weeks: *weeks,
                hours_per_day: *hours_per_day,
                project_id: project_id.clone().unwrap_or_else(new_project_id),
            }),
            Command::ModuleDetails {
                module,
                weeks,
                hours_per_day,
                project_id,
                module_id,
            } => {
                let (outline, generated) = load_module_file(module)?;
                let project_id = project_id
                    .clone()
                    .or_else(|| generated.as_ref().map(|m| m.project_id.clone()))
                    .filter(|id| !id.is_empty())
                    .context("--project-id is required for a module outline")?;
                let module_id = module_id
                    .clone()
                    .or_else(|| generated.as_ref().map(|m| m.module_id.clone()))
                    .filter(|id| !id.is_empty())
                    .context("--module-id is required for a module outline")?;

                GenerationRequest::ModuleDetails(ModuleDetailsParams {
                    module: outline,
                    total_weeks: *weeks,
                    hours_per_day: *hours_per_day,
                    project_id,
                    module_id,
                })
            }
            Command::Resources { title, overview } => GenerationRequest::Resources {
                title: title.clone(),
                overview: overview.clone(),
            },
            Command::Diagrams { title } => GenerationRequest::Diagrams {
                project_title: title.clone(),
            },
            Command::Plan { .. } | Command::Projects | Command::ModuleResources { .. } => {
                return Ok(None)
            }
        };

        Ok(Some(request))
    }
}
