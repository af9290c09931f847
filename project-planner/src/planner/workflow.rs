//! The generation pipeline and command dispatch.
//!
//! Every task runs through the same steps:
//! 1. Cache lookup by natural key
//! 2. Prompt construction
//! 3. One completion call
//! 4. Normalization (degraded to defaults on malformed output)
//! 5. Mapping to the typed result
//! 6. Cache store (skipped for degraded results)

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use project_planner_sdk::{
    log_cache_hit, log_cache_miss, log_debug, log_degraded, log_file_saved, log_found, log_info,
    log_stage_complete, log_stage_complete_console, log_stage_failed, log_stage_start,
    log_stage_start_console, log_stored, log_warning,
};

use super::batch::execute_batch;
use super::cli::{Args, Command};
use super::mapper;
use super::normalize::{fallback_document, parse_response};
use super::prompts;
use super::types::{
    DomainResult, GenerationRequest, ModuleDetails, ModuleDetailsParams, ModuleOutline,
    ModulePlanParams, NaturalKey, ProjectModule, TaskKind,
};
use crate::config::PlannerConfig;
use crate::database::{CacheGateway, SqliteCache};
use crate::error::{PlannerError, PlannerResult};
use crate::oracle::{CompletionClient, GeminiClient};

/// A module breakdown together with the details of every module
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModulePlan {
    pub project_id: String,
    pub modules: Vec<ProjectModule>,
    pub details: Vec<ModuleDetails>,
}

/// Runs generation requests against an oracle with an optional cache
#[derive(Clone)]
pub struct Planner {
    client: Arc<dyn CompletionClient>,
    cache: Option<Arc<dyn CacheGateway>>,
    debug: bool,
}

impl Planner {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            cache: None,
            debug: false,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn CacheGateway>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    fn lookup(&self, key: &NaturalKey) -> Option<DomainResult> {
        let cache = self.cache.as_ref()?;
        match cache.lookup(key) {
            Ok(Some(result)) => {
                log_cache_hit!(key.task, key.key);
                Some(result)
            }
            Ok(None) => {
                log_cache_miss!(key.task, key.key);
                None
            }
            Err(e) => {
                log_warning!("cache lookup failed for {}: {}", key, e);
                None
            }
        }
    }

    fn store(&self, key: &NaturalKey, result: &DomainResult) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        match cache.store(key, result) {
            Ok(()) => {
                log_stored!(key.task, key.key);
            }
            Err(e) => {
                log_warning!("cache store failed for {}: {}", key, e);
            }
        }
    }

    /// Produce the typed result for one request
    ///
    /// Only an Overview request whose completion is absent fails; every
    /// other outcome is a structurally valid, possibly degraded, result.
    pub async fn generate(&self, request: &GenerationRequest) -> PlannerResult<DomainResult> {
        let task = request.kind();
        let key = request.natural_key();

        if let Some(result) = self.lookup(&key) {
            return Ok(result);
        }

        log_stage_start!(task, "completion");
        let prompt = prompts::build(request);
        if self.debug {
            log_debug!("{} prompt ({} chars):\n{}", task, prompt.len(), prompt);
        }

        let raw = self.client.complete(&prompt).await;
        if raw.is_absent() && task == TaskKind::Overview {
            let err = PlannerError::GenerationFailed {
                task: task.to_string(),
                reason: "no response received from the model".to_string(),
            };
            log_stage_failed!(task, "completion", err);
            return Err(err);
        }
        log_stage_complete!(task, "completion");

        if self.debug {
            if let Some(text) = raw.text() {
                log_debug!("{} raw response:\n{}", task, text);
            }
        }

        let (document, degraded) = match parse_response(&raw, request) {
            Ok(document) => (document, false),
            Err(e) => {
                log_degraded!(task, e);
                (fallback_document(request), true)
            }
        };

        let result = mapper::map(&document, request);

        if !degraded {
            self.store(&key, &result);
        }

        Ok(result)
    }

    /// Weekly modules for a project, then the details of every module
    ///
    /// Module details are generated with at most `concurrency` calls in
    /// flight and returned in module order.
    pub async fn generate_module_plan(
        &self,
        params: ModulePlanParams,
        concurrency: usize,
    ) -> PlannerResult<ModulePlan> {
        let modules = self
            .generate(&GenerationRequest::Modules(params.clone()))
            .await?
            .into_modules()
            .unwrap_or_default();

        log_found!(modules.len(), "weekly modules");

        // A cached plan keeps the project id it was generated with
        let project_id = modules
            .first()
            .map(|m| m.project_id.clone())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| params.project_id.clone());

        let requests: Vec<GenerationRequest> = modules
            .iter()
            .map(|module| {
                GenerationRequest::ModuleDetails(ModuleDetailsParams {
                    module: ModuleOutline::from(module),
                    total_weeks: params.total_weeks,
                    hours_per_day: params.hours_per_day,
                    project_id: project_id.clone(),
                    module_id: module.module_id.clone(),
                })
            })
            .collect();

        let planner = self.clone();
        let results = execute_batch(requests, concurrency, move |request, ctx| {
            let planner = planner.clone();
            async move {
                if planner.debug {
                    log_debug!(
                        "module {}/{}: {}",
                        ctx.item_number,
                        ctx.total_items,
                        request.subject()
                    );
                }
                planner.generate(&request).await
            }
        })
        .await?;

        let details = results
            .into_iter()
            .filter_map(DomainResult::into_module_details)
            .collect();

        Ok(ModulePlan {
            project_id,
            modules,
            details,
        })
    }
}

// ============================================================================
// Command Dispatch
// ============================================================================

fn write_output<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            log_file_saved!(path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn open_cache(config: &PlannerConfig) -> Option<Arc<SqliteCache>> {
    if !config.cache_enabled {
        return None;
    }

    let opened = SqliteCache::new(config.cache_path.clone()).and_then(|cache| {
        cache.initialize_schema()?;
        Ok(cache)
    });

    match opened {
        Ok(cache) => Some(Arc::new(cache)),
        Err(e) => {
            log_warning!("cache unavailable, continuing without it: {}", e);
            None
        }
    }
}

fn require_cache(cache: Option<Arc<SqliteCache>>) -> Result<Arc<SqliteCache>> {
    cache.context("This command reads stored results and needs the cache (remove --no-cache)")
}

/// Execute one CLI command with an already validated configuration
pub async fn run_command(args: Args, config: PlannerConfig) -> Result<()> {
    let cache = open_cache(&config);
    let output = args.output.as_deref();

    match &args.command {
        Command::Projects => {
            let projects = require_cache(cache)?.list_projects()?;
            log_found!(projects.len(), "stored projects");
            return write_output(&projects, output);
        }
        Command::ModuleResources { project_id } => {
            let resources = require_cache(cache)?.collect_module_resources(project_id)?;
            log_found!(resources.len(), "module resources");
            return write_output(&resources, output);
        }
        _ => {}
    }

    let client: Arc<dyn CompletionClient> = Arc::new(GeminiClient::from_config(&config));
    if config.api_key.is_empty() {
        log_warning!("GEMINI_API_KEY is not set; only cached results are available");
    }

    let mut planner = Planner::new(client).with_debug(config.debug);
    if let Some(cache) = cache {
        planner = planner.with_cache(cache);
    }

    if let Command::Plan {
        title,
        weeks,
        hours_per_day,
        project_id,
    } = &args.command
    {
        log_stage_start_console!("plan", format!("Planning {} over {} weeks", title, weeks));
        let params = ModulePlanParams {
            project_title: title.clone(),
            total_weeks: *weeks,
            hours_per_day: *hours_per_day,
            project_id: project_id
                .clone()
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        };
        let plan = planner
            .generate_module_plan(params, config.concurrency)
            .await?;
        log_stage_complete_console!("plan");
        return write_output(&plan, output);
    }

    let request = args
        .command
        .request()?
        .context("Command does not produce a generation request")?;

    log_stage_start_console!(
        request.kind(),
        format!("Generating {} for {}", request.kind(), request.subject())
    );
    let result = planner.generate(&request).await?;
    log_stage_complete_console!(request.kind());

    write_output(&result, output)
}

/// Load configuration, apply CLI overrides and run the command
pub async fn run_workflow(args: Args) -> Result<()> {
    args.validate()?;

    let mut config = PlannerConfig::load(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    config.validate()?;

    if config.debug {
        log_info!("Using model {} ({})", config.model, config.api_base);
        log_info!(
            "Cache: {}",
            if config.cache_enabled {
                config.cache_path.display().to_string()
            } else {
                "disabled".to_string()
            }
        );
    }

    run_command(args, config).await
}
