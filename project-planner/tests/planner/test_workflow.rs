//! End-to-end pipeline tests with a scripted oracle

use super::common::*;
use project_planner::database::CacheGateway;
use project_planner::oracle::RawCompletion;
use project_planner::planner::*;
use project_planner::PlannerError;
use std::sync::Arc;

const DETAILS_RESPONSE: &str = r#"```json
{
  "title": "Chat App",
  "roadmap": ["Design the protocol", "Build the server", "Write the client"],
  "tech_stack": {"Languages": ["Rust"], "Frameworks": ["tokio", "axum"]},
  "resources": [{"type": "documentation", "name": "Tokio", "url": "https://tokio.rs"}]
}
```"#;

const MODULES_RESPONSE: &str = r#"[
  {"module_title": "Week 1: Setup", "summary": "Tooling", "steps": ["Init repo"], "tentative_duration": "5 days"},
  {"module_title": "Week 2: API", "summary": "Endpoints", "steps": ["Routes"], "tentative_duration": "6 days"}
]"#;

const WEEK1_DETAILS: &str = r#"{
  "title": "Week 1: Setup",
  "description": "Get the workspace ready",
  "steps": [{"title": "Init repo", "resources": ["https://git-scm.com/docs/git-init"]}]
}"#;

const WEEK2_DETAILS: &str = "{title: 'Week 2: API', steps: [{title: 'Routes', resources: ['https://docs.rs/axum/latest/axum/routing',]},]}";

// ============================================================================
// Single Requests
// ============================================================================

#[tokio::test]
async fn test_overview_without_response_fails() {
    let planner = planner_with(Arc::new(ScriptedOracle::absent()), None);

    let err = planner.generate(&overview_request("Chat App")).await.unwrap_err();
    assert!(matches!(err, PlannerError::GenerationFailed { .. }));
}

#[tokio::test]
async fn test_overview_unparseable_uses_fallback_and_is_not_cached() {
    let oracle = Arc::new(ScriptedOracle::text("I'm sorry, I can't help with that."));
    let cache = memory_cache();
    let planner = planner_with(oracle.clone(), Some(cache.clone()));

    let DomainResult::Overview(overview) = planner.generate(&overview_request("Chat App")).await.unwrap()
    else {
        panic!("expected overview");
    };

    assert_eq!(overview, Overview::fallback("Chat App"));
    assert_eq!(cache.count(None).unwrap(), 0);
}

#[tokio::test]
async fn test_other_tasks_degrade_when_absent() {
    let oracle = Arc::new(ScriptedOracle::absent());
    let cache = memory_cache();
    let planner = planner_with(oracle, Some(cache.clone()));

    let DomainResult::Details(details) = planner.generate(&details_request("Chat App")).await.unwrap()
    else {
        panic!("expected details");
    };
    assert_eq!(details.title, "Chat App");
    assert!(details.roadmap.is_empty());
    assert!(details.resources.is_empty());

    let DomainResult::Suggestions(suggestions) = planner
        .generate(&GenerationRequest::Suggestions(suggestion_params()))
        .await
        .unwrap()
    else {
        panic!("expected suggestions");
    };
    assert_eq!(suggestions, vec![ProjectSuggestion::placeholder()]);

    // Degraded results are never stored
    assert_eq!(cache.count(None).unwrap(), 0);
}

#[tokio::test]
async fn test_cache_hit_skips_oracle() {
    let oracle = Arc::new(ScriptedOracle::text(DETAILS_RESPONSE));
    let cache = memory_cache();
    let planner = planner_with(oracle.clone(), Some(cache.clone()));

    let first = planner.generate(&details_request("Chat App")).await.unwrap();
    let second = planner.generate(&details_request("Chat App")).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(oracle.calls(), 1);

    let DomainResult::Details(details) = first else {
        panic!("expected details");
    };
    assert_eq!(details.roadmap.len(), 3);
    assert_eq!(details.tech_stack["Frameworks"], vec!["tokio", "axum"]);

    // A different title is a different natural key
    planner.generate(&details_request("Blog Engine")).await.unwrap();
    assert_eq!(oracle.calls(), 2);
}

#[tokio::test]
async fn test_suggestion_key_covers_all_parameters() {
    let oracle = Arc::new(ScriptedOracle::text(
        "- **Title**: Chat App - **Description**: A simple chat app. - **Difficulty**: Beginner",
    ));
    let planner = planner_with(oracle.clone(), Some(memory_cache()));

    let params = suggestion_params();
    planner
        .generate(&GenerationRequest::Suggestions(params.clone()))
        .await
        .unwrap();

    let mut other = params.clone();
    other.domain = Some("healthcare".to_string());
    planner
        .generate(&GenerationRequest::Suggestions(other))
        .await
        .unwrap();
    planner
        .generate(&GenerationRequest::Suggestions(params))
        .await
        .unwrap();

    assert_eq!(oracle.calls(), 2);
}

#[tokio::test]
async fn test_broken_cache_is_a_miss() {
    let oracle = Arc::new(ScriptedOracle::text(DETAILS_RESPONSE));
    let planner = Planner::new(oracle.clone()).with_cache(Arc::new(BrokenCache));

    let result = planner.generate(&details_request("Chat App")).await.unwrap();
    assert_eq!(result.kind(), TaskKind::Details);
    assert_eq!(oracle.calls(), 1);
}

#[tokio::test]
async fn test_prompt_reaches_oracle() {
    let oracle = Arc::new(ScriptedOracle::text(DETAILS_RESPONSE));
    let planner = planner_with(oracle.clone(), None);

    planner.generate(&details_request("Chat App")).await.unwrap();

    let prompts = oracle.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"Chat App\""));
    assert!(prompts[0].contains("Do not wrap the answer in markdown code fences"));
}

#[tokio::test]
async fn test_module_details_cache_keyed_by_schedule() {
    let oracle = Arc::new(ScriptedOracle::text(WEEK1_DETAILS));
    let planner = planner_with(oracle.clone(), Some(memory_cache()));

    let two_hours = planner
        .generate(&module_details_request(2))
        .await
        .unwrap()
        .into_module_details()
        .unwrap();
    assert_eq!(two_hours.module_total_hours, 14);

    let three_hours = planner
        .generate(&module_details_request(3))
        .await
        .unwrap()
        .into_module_details()
        .unwrap();
    assert_eq!(three_hours.hours_per_day, 3);
    assert_eq!(three_hours.module_total_hours, 21);
    assert_eq!(oracle.calls(), 2);

    // Same schedule again is a hit
    let cached = planner
        .generate(&module_details_request(3))
        .await
        .unwrap()
        .into_module_details()
        .unwrap();
    assert_eq!(cached.module_total_hours, 21);
    assert_eq!(oracle.calls(), 2);
}

// ============================================================================
// Module Plans
// ============================================================================

fn module_plan_oracle() -> Arc<ScriptedOracle> {
    Arc::new(ScriptedOracle::with_rules(
        vec![
            ("Title: Week 1: Setup", RawCompletion::Text(WEEK1_DETAILS.to_string())),
            ("Title: Week 2: API", RawCompletion::Text(WEEK2_DETAILS.to_string())),
            ("weekly modular breakdown", RawCompletion::Text(MODULES_RESPONSE.to_string())),
        ],
        RawCompletion::Absent,
    ))
}

#[tokio::test]
async fn test_module_plan_details_in_module_order() {
    let oracle = module_plan_oracle();
    let cache = memory_cache();
    let planner = planner_with(oracle.clone(), Some(cache.clone()));

    let plan = planner
        .generate_module_plan(module_plan_params(), 2)
        .await
        .unwrap();

    assert_eq!(plan.project_id, "project-42");
    assert_eq!(plan.modules.len(), 2);
    assert_eq!(plan.details.len(), 2);
    assert_eq!(oracle.calls(), 3);

    for (module, details) in plan.modules.iter().zip(&plan.details) {
        assert_eq!(details.module_id, module.module_id);
        assert_eq!(details.title, module.module_title);
        assert_eq!(details.project_id, "project-42");
        assert_eq!(details.module_total_hours, 21);
    }

    assert_eq!(plan.modules[1].duration_days, 6);
    assert_eq!(plan.details[1].steps[0].title, "Routes");
}

#[tokio::test]
async fn test_module_plan_is_listed_and_resources_collected() {
    let cache = memory_cache();
    let planner = planner_with(module_plan_oracle(), Some(cache.clone()));

    planner
        .generate_module_plan(module_plan_params(), 3)
        .await
        .unwrap();

    let projects = cache.list_projects().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].project_title, "Chat App");
    assert_eq!(projects[0].modules.len(), 2);

    let resources = cache.collect_module_resources("project-42").unwrap();
    let names: Vec<&str> = resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"git-init"));
    assert!(names.contains(&"routing"));
}

#[tokio::test]
async fn test_cached_plan_keeps_project_id() {
    let cache = memory_cache();
    let oracle = module_plan_oracle();
    let planner = planner_with(oracle.clone(), Some(cache.clone()));

    planner
        .generate_module_plan(module_plan_params(), 2)
        .await
        .unwrap();

    let mut params = module_plan_params();
    params.project_id = "a-new-id".to_string();
    let again = planner.generate_module_plan(params, 2).await.unwrap();

    assert_eq!(again.project_id, "project-42");
    assert_eq!(oracle.calls(), 3);

    let key = GenerationRequest::Modules(module_plan_params()).natural_key();
    assert!(cache.lookup(&key).unwrap().is_some());
}

#[tokio::test]
async fn test_module_plan_cache_keyed_by_weeks() {
    let cache = memory_cache();
    let oracle = module_plan_oracle();
    let planner = planner_with(oracle.clone(), Some(cache.clone()));

    planner
        .generate_module_plan(module_plan_params(), 2)
        .await
        .unwrap();
    assert_eq!(oracle.calls(), 3);

    let mut params = module_plan_params();
    params.total_weeks = 8;
    let longer = planner.generate_module_plan(params, 2).await.unwrap();

    // Modules and every module's details are regenerated for the new schedule
    assert_eq!(oracle.calls(), 6);
    assert!(longer.details.iter().all(|details| details.total_weeks == 8));

    let projects = cache.list_projects().unwrap();
    assert_eq!(projects.len(), 2);
    assert!(projects.iter().all(|project| project.project_title == "Chat App"));
}

#[tokio::test]
async fn test_module_plan_without_modules() {
    let planner = planner_with(Arc::new(ScriptedOracle::absent()), None);

    let plan = planner
        .generate_module_plan(module_plan_params(), 2)
        .await
        .unwrap();

    assert!(plan.modules.is_empty());
    assert!(plan.details.is_empty());
    assert_eq!(plan.project_id, "project-42");
}
