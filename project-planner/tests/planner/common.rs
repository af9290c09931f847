//! Common test utilities for planner tests

use async_trait::async_trait;
use project_planner::database::{CacheGateway, SqliteCache};
use project_planner::oracle::{CompletionClient, RawCompletion};
use project_planner::planner::*;
use project_planner::{PlannerError, PlannerResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Oracle answering from a list of `(prompt substring, response)` rules
pub struct ScriptedOracle {
    rules: Vec<(String, RawCompletion)>,
    fallback: RawCompletion,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedOracle {
    /// Same response for every prompt
    pub fn always(response: RawCompletion) -> Self {
        Self::with_rules(Vec::new(), response)
    }

    pub fn text(text: &str) -> Self {
        Self::always(RawCompletion::Text(text.to_string()))
    }

    pub fn absent() -> Self {
        Self::always(RawCompletion::Absent)
    }

    pub fn with_rules(rules: Vec<(&str, RawCompletion)>, fallback: RawCompletion) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|(needle, response)| (needle.to_string(), response))
                .collect(),
            fallback,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedOracle {
    async fn complete(&self, prompt: &str) -> RawCompletion {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        self.rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Cache whose every operation fails
pub struct BrokenCache;

impl CacheGateway for BrokenCache {
    fn lookup(&self, _key: &NaturalKey) -> PlannerResult<Option<DomainResult>> {
        Err(PlannerError::Cache("disk on fire".to_string()))
    }

    fn store(&self, _key: &NaturalKey, _result: &DomainResult) -> PlannerResult<()> {
        Err(PlannerError::Cache("disk on fire".to_string()))
    }
}

pub fn memory_cache() -> Arc<SqliteCache> {
    let cache = SqliteCache::new_in_memory().unwrap();
    cache.initialize_schema().unwrap();
    Arc::new(cache)
}

pub fn planner_with(oracle: Arc<ScriptedOracle>, cache: Option<Arc<SqliteCache>>) -> Planner {
    let planner = Planner::new(oracle);
    match cache {
        Some(cache) => planner.with_cache(cache),
        None => planner,
    }
}

pub fn suggestion_params() -> SuggestionParams {
    SuggestionParams {
        skill_level: "Beginner".to_string(),
        project_type: "web app".to_string(),
        technology: "Rust".to_string(),
        duration: Some("short".to_string()),
        domain: None,
        time_commitment: Some("2 hours/day".to_string()),
    }
}

pub fn details_request(title: &str) -> GenerationRequest {
    GenerationRequest::Details {
        project_title: title.to_string(),
    }
}

pub fn overview_request(title: &str) -> GenerationRequest {
    GenerationRequest::Overview {
        project_title: title.to_string(),
    }
}

pub fn module_plan_params() -> ModulePlanParams {
    ModulePlanParams {
        project_title: "Chat App".to_string(),
        total_weeks: 2,
        hours_per_day: 3,
        project_id: "project-42".to_string(),
    }
}

pub fn module_details_request(hours_per_day: u32) -> GenerationRequest {
    GenerationRequest::ModuleDetails(ModuleDetailsParams {
        module: ModuleOutline {
            title: "Week 1: Setup".to_string(),
            summary: "Tooling and schema".to_string(),
            steps: vec![OutlineStep {
                title: "Init repo".to_string(),
                description: "Create the workspace".to_string(),
            }],
        },
        total_weeks: 4,
        hours_per_day,
        project_id: "project-42".to_string(),
        module_id: "module-1".to_string(),
    })
}

/// Every request kind with fixed parameters
pub fn all_requests() -> Vec<GenerationRequest> {
    vec![
        GenerationRequest::Suggestions(suggestion_params()),
        details_request("Chat App"),
        overview_request("Chat App"),
        GenerationRequest::Modules(module_plan_params()),
        module_details_request(3),
        GenerationRequest::Resources {
            title: "Chat App".to_string(),
            overview: "Real-time messaging".to_string(),
        },
        GenerationRequest::Diagrams {
            project_title: "Chat App".to_string(),
        },
    ]
}
