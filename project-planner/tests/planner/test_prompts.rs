//! Tests that each prompt's worked example survives the pipeline

use super::common::*;
use project_planner::oracle::RawCompletion;
use project_planner::planner::normalize::parse_response;
use project_planner::planner::prompts::{build, worked_example};
use project_planner::planner::*;

#[test]
fn test_worked_examples_map_without_degrading() {
    for request in all_requests() {
        let raw = RawCompletion::Text(worked_example(request.kind()).to_string());
        let doc = parse_response(&raw, &request)
            .unwrap_or_else(|e| panic!("{} example did not parse: {}", request.kind(), e));

        match map(&doc, &request) {
            DomainResult::Suggestions(suggestions) => {
                assert_eq!(suggestions.len(), 1);
                assert_eq!(suggestions[0].title, "Recipe Finder");
                assert_eq!(suggestions[0].difficulty, "Beginner");
            }
            DomainResult::Details(details) => {
                assert_eq!(details.roadmap.len(), 2);
                assert_eq!(details.tech_stack.len(), 3);
                assert_eq!(details.diagrams.uml.classes.len(), 2);
                assert_eq!(details.diagrams.flowchart.connections.len(), 3);
                assert_eq!(details.diagrams.dfd.entities.len(), 2);
                assert_eq!(details.resources.len(), 1);
            }
            DomainResult::Overview(overview) => {
                assert_eq!(overview.estimated_time.total_estimated_days, 14);
                assert_eq!(overview.modular_division["API Integration"], 10);
                assert_eq!(overview.learning_outcomes.len(), 2);
            }
            DomainResult::Modules(modules) => {
                assert_eq!(modules.len(), 1);
                assert_eq!(modules[0].duration_days, 5);
                assert_eq!(modules[0].steps.len(), 3);
            }
            DomainResult::ModuleDetails(details) => {
                assert_eq!(details.steps.len(), 1);
                assert!(details.steps[0].code.starts_with("CREATE TABLE"));
                assert_eq!(details.steps[0].resources.len(), 1);
            }
            DomainResult::Resources(list) => {
                assert_eq!(list.resources[0].estimated_time, Some(90));
            }
            DomainResult::Diagrams(diagrams) => {
                assert_eq!(diagrams.diagrams.uml.relationships[0].kind, "association");
                assert_eq!(diagrams.diagrams.dfd.data_flows[0].data, "ingredient list");
            }
        }
    }
}

#[test]
fn test_prompts_are_deterministic_and_distinct() {
    let prompts: Vec<String> = all_requests().iter().map(build).collect();

    for (request, prompt) in all_requests().iter().zip(&prompts) {
        assert_eq!(&build(request), prompt);
    }

    for (i, a) in prompts.iter().enumerate() {
        for b in prompts.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_prompts_mention_request_fields() {
    let prompt = build(&GenerationRequest::Suggestions(suggestion_params()));
    assert!(prompt.contains("Beginner developer"));
    assert!(prompt.contains("web app project using Rust"));
    assert!(prompt.contains("short-term duration"));
    assert!(prompt.contains("2 hours/day"));

    let prompt = build(&GenerationRequest::Modules(module_plan_params()));
    assert!(prompt.contains("\"Chat App\""));
    assert!(prompt.contains("exactly 2 weekly modules"));
    assert!(prompt.contains("about 3 hours per day"));
}
