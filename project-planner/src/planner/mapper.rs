//! Domain mapping: generic document to typed result
//!
//! [`map`] is total. Field lookups, coercion and defaults are declared on the
//! result types themselves (serde attributes plus `planner::lenient`); this
//! module only picks the document root for each task and applies the few
//! defaults that depend on the request.

use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use super::lenient::{decode_items, extract_int};
use super::types::*;

fn decode<T: DeserializeOwned + Default>(value: &Value) -> T {
    if !value.is_object() {
        return T::default();
    }
    serde_json::from_value(value.clone()).unwrap_or_default()
}

fn or_default_text(value: &mut String, fallback: &str) {
    if value.trim().is_empty() {
        *value = fallback.to_string();
    }
}

/// Stable module identifier from the project id and position
pub fn module_id(project_id: &str, index: usize) -> String {
    Uuid::new_v5(
        &Uuid::NAMESPACE_OID,
        format!("{}:{}", project_id, index).as_bytes(),
    )
    .to_string()
}

/// Project a normalized document onto the result shape for `request`
pub fn map(doc: &NormalizedDocument, request: &GenerationRequest) -> DomainResult {
    match request {
        GenerationRequest::Suggestions(_) => DomainResult::Suggestions(map_suggestions(doc)),
        GenerationRequest::Details { project_title } => {
            let mut details: ProjectDetails = decode(doc.root());
            or_default_text(&mut details.title, project_title);
            DomainResult::Details(details)
        }
        GenerationRequest::Overview { project_title } => {
            let mut overview: Overview = decode(doc.root());
            or_default_text(&mut overview.project_title, project_title);
            or_default_text(&mut overview.description, MISSING_DESCRIPTION);
            DomainResult::Overview(overview)
        }
        GenerationRequest::Modules(params) => DomainResult::Modules(map_modules(doc, params)),
        GenerationRequest::ModuleDetails(params) => {
            DomainResult::ModuleDetails(map_module_details(doc, params))
        }
        GenerationRequest::Resources { .. } => DomainResult::Resources(ResourceList {
            resources: decode_items(Value::Array(doc.items(&["resources"]).to_vec())),
        }),
        GenerationRequest::Diagrams { project_title } => {
            let mut details: DiagramDetails = decode(doc.root());
            // Some responses put UML/Flowchart/DFD at the top level
            if details.diagrams.is_empty() && doc.get("UML").is_some() {
                details.diagrams = decode(doc.root());
            }
            or_default_text(&mut details.title, project_title);
            DomainResult::Diagrams(details)
        }
    }
}

fn map_suggestions(doc: &NormalizedDocument) -> Vec<ProjectSuggestion> {
    let mut suggestions: Vec<ProjectSuggestion> =
        decode_items(Value::Array(doc.items(&["suggestions", "projects"]).to_vec()));

    suggestions.retain(|s| !s.title.is_empty());
    for suggestion in &mut suggestions {
        or_default_text(&mut suggestion.difficulty, "N/A");
    }

    if suggestions.is_empty() {
        suggestions.push(ProjectSuggestion::placeholder());
    }
    suggestions
}

fn map_modules(doc: &NormalizedDocument, params: &ModulePlanParams) -> Vec<ProjectModule> {
    let modules: Vec<ProjectModule> =
        decode_items(Value::Array(doc.items(&["modules", "weeks"]).to_vec()));

    modules
        .into_iter()
        .enumerate()
        .map(|(index, mut module)| {
            module.module_id = module_id(&params.project_id, index);
            module.project_id = params.project_id.clone();
            module.duration_days =
                extract_int(&module.tentative_duration).unwrap_or(DEFAULT_DURATION_DAYS);
            or_default_text(&mut module.module_title, UNTITLED);
            module
        })
        .collect()
}

fn map_module_details(doc: &NormalizedDocument, params: &ModuleDetailsParams) -> ModuleDetails {
    let mut details: ModuleDetails = decode(doc.root());

    or_default_text(&mut details.title, &params.module.title);
    or_default_text(&mut details.title, UNTITLED);
    or_default_text(&mut details.description, &params.module.summary);
    for step in &mut details.steps {
        or_default_text(&mut step.title, UNTITLED);
    }

    // Scheduling comes from the request, never from the model
    details.project_id = params.project_id.clone();
    details.module_id = params.module_id.clone();
    details.total_weeks = params.total_weeks;
    details.hours_per_day = params.hours_per_day;
    details.module_total_hours = params.module_total_hours();
    details.days = Vec::new();
    details
}
