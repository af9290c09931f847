//! Tests for mapping documents onto typed results

use super::common::*;
use project_planner::planner::*;
use serde_json::json;

/// Documents of the wrong shape for every task
fn degenerate_documents() -> Vec<NormalizedDocument> {
    vec![
        NormalizedDocument::empty(),
        NormalizedDocument::new(json!({})),
        NormalizedDocument::new(json!([])),
        NormalizedDocument::new(json!("just a string")),
        NormalizedDocument::new(json!(42)),
        NormalizedDocument::new(json!([1, "two", null, {"unexpected": true}])),
        NormalizedDocument::new(json!({
            "title": null,
            "roadmap": {"not": "a list"},
            "steps": "one, two",
            "diagrams": [],
            "resources": "none",
            "estimated_time": "a while",
            "modular_division": ["Frontend"],
        })),
    ]
}

#[test]
fn test_map_is_total_for_every_task() {
    for request in all_requests() {
        for doc in degenerate_documents() {
            let result = map(&doc, &request);
            assert_eq!(result.kind(), request.kind());

            // Every result serializes, so no field is left unset
            let value = serde_json::to_value(&result).unwrap();
            assert_eq!(value["task"], request.kind().as_str());
        }
    }
}

#[test]
fn test_module_total_hours_regardless_of_output() {
    let request = module_details_request(3);

    for doc in degenerate_documents() {
        let details = map(&doc, &request).into_module_details().unwrap();
        assert_eq!(details.module_total_hours, 21);
        assert_eq!(details.total_weeks, 4);
        assert_eq!(details.hours_per_day, 3);
        assert_eq!(details.project_id, "project-42");
        assert_eq!(details.module_id, "module-1");
        assert_eq!(details.title, "Week 1: Setup");
    }
}

#[test]
fn test_overview_degenerate_defaults() {
    let doc = NormalizedDocument::new(json!({"estimated_time": "a while"}));
    let DomainResult::Overview(overview) = map(&doc, &overview_request("Chat App")) else {
        panic!("expected overview");
    };

    assert_eq!(overview.description, MISSING_DESCRIPTION);
    assert_eq!(overview.estimated_time, TimeEstimation::default());
    assert!(overview.technologies_used.is_empty());
    assert!(!overview.is_industrial_level);
}

#[test]
fn test_modules_duration_extraction() {
    let doc = NormalizedDocument::new(json!([
        {"module_title": "A", "tentative_duration": "5 days"},
        {"module_title": "B", "tentative_duration": "about a week"},
        {"module_title": "C", "tentative_duration": 3},
        {"module_title": "D"}
    ]));

    let modules = map(&doc, &GenerationRequest::Modules(module_plan_params()))
        .into_modules()
        .unwrap();

    let durations: Vec<u32> = modules.iter().map(|m| m.duration_days).collect();
    assert_eq!(durations, vec![5, 2, 3, 2]);
    assert_eq!(modules[2].tentative_duration, "3");
}

#[test]
fn test_resources_from_bare_array() {
    let doc = NormalizedDocument::new(json!([
        {"type": "article", "name": "Rust Book", "url": "https://doc.rust-lang.org/book/"},
        "not a resource"
    ]));
    let request = GenerationRequest::Resources {
        title: "Chat App".to_string(),
        overview: String::new(),
    };

    let DomainResult::Resources(list) = map(&doc, &request) else {
        panic!("expected resources");
    };
    assert_eq!(list.resources.len(), 1);
    assert_eq!(list.resources[0].kind, "article");
    assert_eq!(list.resources[0].estimated_time, None);
}
