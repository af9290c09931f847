//! Tests for response normalization against realistic model output

use super::common::*;
use project_planner::oracle::RawCompletion;
use project_planner::planner::normalize::{extract_suggestions, parse_response, strip_code_fence};
use project_planner::planner::*;
use serde_json::{json, Value};

fn text(s: &str) -> RawCompletion {
    RawCompletion::Text(s.to_string())
}

// ============================================================================
// Fences and Repair
// ============================================================================

#[test]
fn test_fence_with_and_without_tag() {
    let clean = r#"[{"module_title": "Week 1"}, {"module_title": "Week 2"}]"#;
    let request = GenerationRequest::Modules(module_plan_params());

    let expected = normalize(&text(clean), &request).unwrap();
    assert_eq!(
        normalize(&text(&format!("```json\n{}\n```", clean)), &request).unwrap(),
        expected
    );
    assert_eq!(
        normalize(&text(&format!("```\n{}\n```", clean)), &request).unwrap(),
        expected
    );
}

#[test]
fn test_python_style_dict_is_repaired() {
    let raw = "```json\n{'resources': [{'type': 'video', 'name': 'Intro', 'url': 'https://youtu.be/x', estimated_time: 12,},]}\n```";
    let request = GenerationRequest::Resources {
        title: "Chat App".to_string(),
        overview: String::new(),
    };

    let doc = normalize(&text(raw), &request).unwrap();
    assert_eq!(
        doc.root(),
        &json!({"resources": [{"type": "video", "name": "Intro", "url": "https://youtu.be/x", "estimated_time": 12}]})
    );
}

#[test]
fn test_repair_steps_are_individually_idempotent() {
    for input in [
        "{a: 1}",
        "{'a': 'b'}",
        "[1, 2,]",
        "```json\n{\"a\": [1,]}\n```",
    ] {
        let once = repair(input);
        assert_eq!(repair(&once), once, "repair not idempotent for {:?}", input);
        assert!(serde_json::from_str::<Value>(&once).is_ok(), "{:?} -> {:?}", input, once);
    }
}

#[test]
fn test_strict_json_is_untouched() {
    let raw = r#"{"title": "It's fine", "roadmap": ["Plan, then build: fast"]}"#;
    let doc = normalize(&text(raw), &details_request("Chat App")).unwrap();
    assert_eq!(doc.root(), &serde_json::from_str::<Value>(raw).unwrap());
}

#[test]
fn test_strip_code_fence_keeps_inner_fences() {
    let raw = "```json\n{\"code\": \"```rust\\nfn main() {}\\n```\"}\n```";
    let stripped = strip_code_fence(raw);
    let value: Value = serde_json::from_str(&stripped).unwrap();
    assert!(value["code"].as_str().unwrap().contains("fn main"));
}

// ============================================================================
// Failure Paths
// ============================================================================

#[test]
fn test_overview_fallback_on_unparseable_text() {
    for raw in [text(""), text("Sorry, I can't do that."), RawCompletion::Absent] {
        let doc = normalize(&raw, &overview_request("Chat App")).unwrap();
        assert_eq!(
            doc.get("description").and_then(Value::as_str),
            Some(OVERVIEW_FALLBACK_DESCRIPTION)
        );
        assert_eq!(doc.get("project_title").and_then(Value::as_str), Some("Chat App"));
    }
}

#[test]
fn test_other_tasks_report_malformed() {
    for request in all_requests() {
        if request.kind() == TaskKind::Overview {
            continue;
        }
        let err = normalize(&text("no json here"), &request).unwrap_err();
        assert!(err.is_malformed(), "{} should be malformed", request.kind());
        assert!(parse_response(&RawCompletion::Absent, &request).is_err());
    }
}

// ============================================================================
// Bullet Suggestions
// ============================================================================

#[test]
fn test_bullet_scenario() {
    let raw = text("- **Title**: Chat App - **Description**: A simple chat app. - **Difficulty**: Beginner");
    let request = GenerationRequest::Suggestions(suggestion_params());

    let doc = normalize(&raw, &request).unwrap();
    let DomainResult::Suggestions(suggestions) = map(&doc, &request) else {
        panic!("expected suggestions");
    };

    assert_eq!(
        suggestions,
        vec![ProjectSuggestion {
            title: "Chat App".to_string(),
            description: "A simple chat app.".to_string(),
            difficulty: "Beginner".to_string(),
        }]
    );
}

#[test]
fn test_bullets_with_prose_and_markdown_numbering() {
    let raw = "Here are three ideas for you!\n\n\
        1. **Title**: Budget Tracker - **Description**: Track spending. - **Difficulty**: Beginner\n\
        2. **Title**: Recipe API - **Description**: REST service for recipes. - **Difficulty**: Intermediate\n\
        3. **Title**: Chess Engine - **Description**: Minimax with pruning. - **Difficulty**: Advanced\n\n\
        Good luck with your learning journey!";

    let entries = extract_suggestions(raw);
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2]["title"], "Chess Engine");
    assert_eq!(entries[2]["difficulty"], "Advanced");
}

#[test]
fn test_bullets_three_titles_two_descriptions() {
    let raw = "\
- **Title**: A - **Description**: First. - **Difficulty**: Beginner
- **Title**: B - **Description**: Second. - **Difficulty**: Beginner
- **Title**: C - **Difficulty**: Advanced";

    let request = GenerationRequest::Suggestions(suggestion_params());
    let doc = normalize(&text(raw), &request).unwrap();
    let DomainResult::Suggestions(suggestions) = map(&doc, &request) else {
        panic!("expected suggestions");
    };
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].title, "A");
    assert_eq!(suggestions[1].title, "B");
}
