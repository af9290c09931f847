//! Data types for the project planning pipeline.
//!
//! 1. **Requests** - one [`GenerationRequest`] per generation task
//! 2. **Documents** - the repaired, untyped model output ([`NormalizedDocument`])
//! 3. **Results** - the typed shapes returned to callers ([`DomainResult`])
//!
//! Every result field deserializes leniently (see `planner::lenient`) and
//! carries a default, so any document decodes into a structurally valid value.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::lenient;

/// Days in one weekly module
pub const MODULE_WEEK_DAYS: u32 = 7;

/// Duration used when a module's tentative duration carries no number
pub const DEFAULT_DURATION_DAYS: u32 = 2;

pub const OVERVIEW_FALLBACK_DESCRIPTION: &str = "An overview could not be generated at this time.";
pub const MISSING_DESCRIPTION: &str = "No description available";
pub const UNTITLED: &str = "Untitled";

// ============================================================================
// Request Types
// ============================================================================

/// The kind of content a request asks the model for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Suggestions,
    Details,
    Overview,
    Modules,
    ModuleDetails,
    Resources,
    Diagrams,
}

impl TaskKind {
    pub const ALL: [TaskKind; 7] = [
        TaskKind::Suggestions,
        TaskKind::Details,
        TaskKind::Overview,
        TaskKind::Modules,
        TaskKind::ModuleDetails,
        TaskKind::Resources,
        TaskKind::Diagrams,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Suggestions => "suggestions",
            TaskKind::Details => "details",
            TaskKind::Overview => "overview",
            TaskKind::Modules => "modules",
            TaskKind::ModuleDetails => "module_details",
            TaskKind::Resources => "resources",
            TaskKind::Diagrams => "diagrams",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Student preferences used to suggest projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionParams {
    /// Beginner, Intermediate or Advanced
    pub skill_level: String,

    /// Kind of project (web app, CLI tool, game, ...)
    pub project_type: String,

    /// Main technology the student wants to use
    pub technology: String,

    /// Short, medium or long term
    #[serde(default)]
    pub duration: Option<String>,

    /// Application domain (healthcare, finance, ...)
    #[serde(default)]
    pub domain: Option<String>,

    /// Daily time budget, e.g. "2 hours/day"
    #[serde(default)]
    pub time_commitment: Option<String>,
}

/// One step of a module outline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineStep {
    pub title: String,
    pub description: String,
}

/// A module as supplied by the caller when asking for its details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleOutline {
    pub title: String,
    pub summary: String,
    pub steps: Vec<OutlineStep>,
}

impl From<&ProjectModule> for ModuleOutline {
    fn from(module: &ProjectModule) -> Self {
        Self {
            title: module.module_title.clone(),
            summary: module.summary.clone(),
            steps: module
                .steps
                .iter()
                .map(|step| OutlineStep {
                    title: step.clone(),
                    description: String::new(),
                })
                .collect(),
        }
    }
}

/// Parameters for a weekly module breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePlanParams {
    pub project_title: String,
    pub total_weeks: u32,
    pub hours_per_day: u32,
    pub project_id: String,
}

/// Parameters for a single module's task breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDetailsParams {
    pub module: ModuleOutline,
    pub total_weeks: u32,
    pub hours_per_day: u32,
    pub project_id: String,
    pub module_id: String,
}

impl ModuleDetailsParams {
    /// Hours budgeted for one weekly module, saturating at `u32::MAX`
    pub fn module_total_hours(&self) -> u32 {
        MODULE_WEEK_DAYS.saturating_mul(self.hours_per_day)
    }
}

/// A single generation task with everything needed to build its prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "task", rename_all = "snake_case")]
pub enum GenerationRequest {
    Suggestions(SuggestionParams),
    Details { project_title: String },
    Overview { project_title: String },
    Modules(ModulePlanParams),
    ModuleDetails(ModuleDetailsParams),
    Resources { title: String, overview: String },
    Diagrams { project_title: String },
}

impl GenerationRequest {
    pub fn kind(&self) -> TaskKind {
        match self {
            GenerationRequest::Suggestions(_) => TaskKind::Suggestions,
            GenerationRequest::Details { .. } => TaskKind::Details,
            GenerationRequest::Overview { .. } => TaskKind::Overview,
            GenerationRequest::Modules(_) => TaskKind::Modules,
            GenerationRequest::ModuleDetails(_) => TaskKind::ModuleDetails,
            GenerationRequest::Resources { .. } => TaskKind::Resources,
            GenerationRequest::Diagrams { .. } => TaskKind::Diagrams,
        }
    }

    /// Human-readable subject of the request (project or module title)
    pub fn subject(&self) -> &str {
        match self {
            GenerationRequest::Suggestions(params) => &params.technology,
            GenerationRequest::Details { project_title }
            | GenerationRequest::Overview { project_title }
            | GenerationRequest::Diagrams { project_title } => project_title,
            GenerationRequest::Modules(params) => &params.project_title,
            GenerationRequest::ModuleDetails(params) => &params.module.title,
            GenerationRequest::Resources { title, .. } => title,
        }
    }

    /// Cache key built from exactly the identifying fields of the request
    pub fn natural_key(&self) -> NaturalKey {
        let key = match self {
            GenerationRequest::Suggestions(params) => [
                params.skill_level.as_str(),
                params.project_type.as_str(),
                params.technology.as_str(),
                params.duration.as_deref().unwrap_or(""),
                params.domain.as_deref().unwrap_or(""),
                params.time_commitment.as_deref().unwrap_or(""),
            ]
            .join("|"),
            GenerationRequest::Details { project_title }
            | GenerationRequest::Overview { project_title }
            | GenerationRequest::Diagrams { project_title } => project_title.clone(),
            // Scheduling parameters shape the output, so they are part of the key
            GenerationRequest::Modules(params) => format!(
                "{}|{}|{}",
                params.project_title, params.total_weeks, params.hours_per_day
            ),
            GenerationRequest::ModuleDetails(params) => format!(
                "{}/{}|{}|{}",
                params.project_id, params.module_id, params.total_weeks, params.hours_per_day
            ),
            GenerationRequest::Resources { title, .. } => title.clone(),
        };

        NaturalKey {
            task: self.kind(),
            key,
        }
    }
}

/// Cache lookup key derived from human-meaningful request fields
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NaturalKey {
    pub task: TaskKind,
    pub key: String,
}

/// Project title part of a module plan key (`title|weeks|hours`)
pub fn module_plan_title(key: &str) -> &str {
    key.rsplitn(3, '|').last().unwrap_or(key)
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.task, self.key)
    }
}

// ============================================================================
// Normalized Document
// ============================================================================

/// Generic tree produced by repairing and parsing model output
///
/// `Value::Null` stands for "nothing could be parsed".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedDocument {
    root: Value,
}

impl NormalizedDocument {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn empty() -> Self {
        Self { root: Value::Null }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        match &self.root {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Elements of the document's list: the root itself when it is an array,
    /// otherwise the first of `keys` holding an array.
    pub fn items(&self, keys: &[&str]) -> &[Value] {
        match &self.root {
            Value::Array(items) => items,
            Value::Object(map) => keys
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_array))
                .map(Vec::as_slice)
                .unwrap_or(&[]),
            _ => &[],
        }
    }
}

// ============================================================================
// Suggestion Types
// ============================================================================

/// One suggested project idea
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSuggestion {
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,

    #[serde(deserialize_with = "lenient::string")]
    pub description: String,

    /// Beginner, Intermediate or Advanced; "N/A" when the model omits it
    #[serde(deserialize_with = "lenient::string")]
    pub difficulty: String,
}

impl Default for ProjectSuggestion {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            difficulty: "N/A".to_string(),
        }
    }
}

impl ProjectSuggestion {
    /// Placeholder returned when no suggestion could be extracted
    pub fn placeholder() -> Self {
        Self {
            title: "No suggestions".to_string(),
            description: "Try again later.".to_string(),
            difficulty: "N/A".to_string(),
        }
    }
}

// ============================================================================
// Project Detail Types
// ============================================================================

/// A roadmap entry; the model sends either plain strings or `{step, description}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct RoadmapStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<u32>,
    pub description: String,
}

impl TryFrom<Value> for RoadmapStep {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let step = match &value {
            Value::String(text) => RoadmapStep {
                step: None,
                description: text.trim().to_string(),
            },
            Value::Object(map) => RoadmapStep {
                step: map.get("step").and_then(lenient::as_int),
                description: ["description", "title", "action", "step"]
                    .iter()
                    .filter_map(|key| map.get(*key))
                    .filter(|v| !v.is_number())
                    .map(lenient::as_text)
                    .find(|text| !text.is_empty())
                    .unwrap_or_default(),
            },
            _ => return Err("roadmap entry must be a string or object".to_string()),
        };

        if step.description.is_empty() {
            return Err("roadmap entry has no description".to_string());
        }
        Ok(step)
    }
}

/// A learning resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    /// article, video, course or documentation
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub kind: String,

    #[serde(deserialize_with = "lenient::string")]
    pub name: String,

    #[serde(deserialize_with = "lenient::string")]
    pub url: String,

    #[serde(deserialize_with = "lenient::string")]
    pub description: String,

    /// Minutes to read or watch
    #[serde(
        deserialize_with = "lenient::opt_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_time: Option<u32>,
}

/// Ordered resource list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceList {
    #[serde(deserialize_with = "lenient::seq")]
    pub resources: Vec<Resource>,
}

/// Roadmap, stack, diagrams and resources for one project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDetails {
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,

    #[serde(deserialize_with = "lenient::seq")]
    pub roadmap: Vec<RoadmapStep>,

    /// Languages, Frameworks, Databases, ...
    #[serde(deserialize_with = "lenient::string_list_map")]
    pub tech_stack: BTreeMap<String, Vec<String>>,

    #[serde(deserialize_with = "lenient::object")]
    pub diagrams: DiagramBundle,

    #[serde(deserialize_with = "lenient::seq")]
    pub resources: Vec<Resource>,
}

// ============================================================================
// Diagram Types
// ============================================================================

/// UML, flowchart and data-flow diagrams for a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramBundle {
    #[serde(rename = "UML", deserialize_with = "lenient::object")]
    pub uml: UmlDiagram,

    #[serde(rename = "Flowchart", deserialize_with = "lenient::object")]
    pub flowchart: FlowchartDiagram,

    #[serde(rename = "DFD", deserialize_with = "lenient::object")]
    pub dfd: DfdDiagram,
}

impl DiagramBundle {
    pub fn is_empty(&self) -> bool {
        self.uml.classes.is_empty()
            && self.flowchart.elements.is_empty()
            && self.dfd.entities.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UmlDiagram {
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,

    #[serde(deserialize_with = "lenient::seq")]
    pub classes: Vec<UmlClass>,

    #[serde(deserialize_with = "lenient::seq")]
    pub relationships: Vec<UmlRelationship>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UmlClass {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,

    #[serde(deserialize_with = "lenient::string_list")]
    pub attributes: Vec<String>,

    #[serde(deserialize_with = "lenient::string_list")]
    pub methods: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UmlRelationship {
    #[serde(deserialize_with = "lenient::string")]
    pub source: String,

    #[serde(deserialize_with = "lenient::string")]
    pub target: String,

    /// association, aggregation, composition or inheritance
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowchartDiagram {
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,

    #[serde(deserialize_with = "lenient::seq")]
    pub elements: Vec<FlowElement>,

    #[serde(deserialize_with = "lenient::seq")]
    pub connections: Vec<FlowConnection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowElement {
    /// start, process, decision or end
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub kind: String,

    #[serde(deserialize_with = "lenient::string")]
    pub id: String,

    #[serde(deserialize_with = "lenient::string")]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConnection {
    #[serde(deserialize_with = "lenient::string")]
    pub source: String,

    #[serde(deserialize_with = "lenient::string")]
    pub destination: String,

    #[serde(deserialize_with = "lenient::string")]
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DfdDiagram {
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,

    #[serde(deserialize_with = "lenient::seq")]
    pub entities: Vec<DfdEntity>,

    #[serde(deserialize_with = "lenient::seq")]
    pub data_flows: Vec<DataFlow>,
}

/// External entity; accepted as `"User"` or `{"name": "User"}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct DfdEntity {
    pub name: String,
}

impl TryFrom<Value> for DfdEntity {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let name = match &value {
            Value::String(name) => name.trim().to_string(),
            Value::Object(map) => map.get("name").map(lenient::as_text).unwrap_or_default(),
            _ => String::new(),
        };

        if name.is_empty() {
            Err("data-flow entity has no name".to_string())
        } else {
            Ok(Self { name })
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFlow {
    #[serde(deserialize_with = "lenient::string")]
    pub source: String,

    #[serde(deserialize_with = "lenient::string")]
    pub destination: String,

    #[serde(deserialize_with = "lenient::string")]
    pub data: String,
}

/// Standalone diagram generation result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramDetails {
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,

    #[serde(deserialize_with = "lenient::string")]
    pub description: String,

    #[serde(deserialize_with = "lenient::object")]
    pub diagrams: DiagramBundle,
}

// ============================================================================
// Overview Types
// ============================================================================

/// Estimated effort per area, in hours, plus total days
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeEstimation {
    #[serde(deserialize_with = "lenient::int")]
    pub frontend_hours: u32,

    #[serde(deserialize_with = "lenient::int")]
    pub backend_hours: u32,

    #[serde(deserialize_with = "lenient::int")]
    pub api_integration_hours: u32,

    #[serde(deserialize_with = "lenient::int")]
    pub testing_hours: u32,

    #[serde(deserialize_with = "lenient::int")]
    pub total_estimated_days: u32,
}

/// High-level project overview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overview {
    #[serde(deserialize_with = "lenient::string")]
    pub project_title: String,

    #[serde(deserialize_with = "lenient::string")]
    pub description: String,

    #[serde(deserialize_with = "lenient::string_list")]
    pub technologies_used: Vec<String>,

    #[serde(deserialize_with = "lenient::boolean")]
    pub is_industrial_level: bool,

    #[serde(deserialize_with = "lenient::string_list")]
    pub technologies_you_will_learn: Vec<String>,

    #[serde(deserialize_with = "lenient::string_list")]
    pub prerequisites: Vec<String>,

    #[serde(deserialize_with = "lenient::object")]
    pub estimated_time: TimeEstimation,

    /// Hours per area (Frontend, Backend, API Integration, Testing)
    #[serde(deserialize_with = "lenient::int_map")]
    pub modular_division: BTreeMap<String, u32>,

    #[serde(deserialize_with = "lenient::string_list")]
    pub learning_outcomes: Vec<String>,
}

impl Overview {
    /// Fixed document used when the model's overview cannot be parsed
    pub fn fallback(project_title: &str) -> Self {
        Self {
            project_title: project_title.to_string(),
            description: OVERVIEW_FALLBACK_DESCRIPTION.to_string(),
            modular_division: ["Frontend", "Backend", "API Integration", "Testing"]
                .into_iter()
                .map(|area| (area.to_string(), 0))
                .collect(),
            ..Self::default()
        }
    }
}

// ============================================================================
// Module Types
// ============================================================================

/// One weekly module of a project plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectModule {
    #[serde(deserialize_with = "lenient::string")]
    pub module_id: String,

    #[serde(deserialize_with = "lenient::string")]
    pub project_id: String,

    #[serde(deserialize_with = "lenient::string")]
    pub module_title: String,

    #[serde(deserialize_with = "lenient::string")]
    pub summary: String,

    #[serde(deserialize_with = "lenient::string_list")]
    pub steps: Vec<String>,

    #[serde(deserialize_with = "lenient::string_list")]
    pub prerequisites: Vec<String>,

    /// Free text as sent by the model, e.g. "5 days"
    #[serde(deserialize_with = "lenient::string")]
    pub tentative_duration: String,

    /// Number extracted from `tentative_duration`
    #[serde(deserialize_with = "lenient::int")]
    pub duration_days: u32,
}

impl Default for ProjectModule {
    fn default() -> Self {
        Self {
            module_id: String::new(),
            project_id: String::new(),
            module_title: UNTITLED.to_string(),
            summary: String::new(),
            steps: Vec::new(),
            prerequisites: Vec::new(),
            tentative_duration: String::new(),
            duration_days: DEFAULT_DURATION_DAYS,
        }
    }
}

/// One teachable step inside a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleStep {
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,

    #[serde(deserialize_with = "lenient::string")]
    pub explanation: String,

    #[serde(deserialize_with = "lenient::string")]
    pub example: String,

    #[serde(deserialize_with = "lenient::string")]
    pub code: String,

    #[serde(deserialize_with = "lenient::string")]
    pub algorithm: String,

    /// Resource URLs
    #[serde(deserialize_with = "lenient::string_list")]
    pub resources: Vec<String>,
}

impl Default for ModuleStep {
    fn default() -> Self {
        Self {
            title: UNTITLED.to_string(),
            explanation: String::new(),
            example: String::new(),
            code: String::new(),
            algorithm: String::new(),
            resources: Vec::new(),
        }
    }
}

/// Detailed breakdown of one module with time accounting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleDetails {
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,

    #[serde(deserialize_with = "lenient::string")]
    pub description: String,

    #[serde(deserialize_with = "lenient::seq")]
    pub steps: Vec<ModuleStep>,

    #[serde(deserialize_with = "lenient::string")]
    pub project_id: String,

    #[serde(deserialize_with = "lenient::string")]
    pub module_id: String,

    #[serde(deserialize_with = "lenient::int")]
    pub total_weeks: u32,

    #[serde(deserialize_with = "lenient::int")]
    pub hours_per_day: u32,

    /// `MODULE_WEEK_DAYS * hours_per_day`
    #[serde(deserialize_with = "lenient::int")]
    pub module_total_hours: u32,

    #[serde(deserialize_with = "lenient::string_list")]
    pub days: Vec<String>,
}

// ============================================================================
// Domain Result
// ============================================================================

/// Typed output of one generation task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "task", content = "result", rename_all = "snake_case")]
pub enum DomainResult {
    Suggestions(Vec<ProjectSuggestion>),
    Details(ProjectDetails),
    Overview(Overview),
    Modules(Vec<ProjectModule>),
    ModuleDetails(ModuleDetails),
    Resources(ResourceList),
    Diagrams(DiagramDetails),
}

impl DomainResult {
    pub fn kind(&self) -> TaskKind {
        match self {
            DomainResult::Suggestions(_) => TaskKind::Suggestions,
            DomainResult::Details(_) => TaskKind::Details,
            DomainResult::Overview(_) => TaskKind::Overview,
            DomainResult::Modules(_) => TaskKind::Modules,
            DomainResult::ModuleDetails(_) => TaskKind::ModuleDetails,
            DomainResult::Resources(_) => TaskKind::Resources,
            DomainResult::Diagrams(_) => TaskKind::Diagrams,
        }
    }

    /// Project the result belongs to, when it carries one
    pub fn project_id(&self) -> Option<&str> {
        match self {
            DomainResult::Modules(modules) => modules.first().map(|m| m.project_id.as_str()),
            DomainResult::ModuleDetails(details) => Some(details.project_id.as_str()),
            _ => None,
        }
    }

    pub fn into_modules(self) -> Option<Vec<ProjectModule>> {
        match self {
            DomainResult::Modules(modules) => Some(modules),
            _ => None,
        }
    }

    pub fn into_module_details(self) -> Option<ModuleDetails> {
        match self {
            DomainResult::ModuleDetails(details) => Some(details),
            _ => None,
        }
    }
}
