//! Prompt templates for every generation task
//!
//! Each prompt names the exact keys the mapper looks up and embeds one worked
//! example of the target structure; the example is what keeps the model's
//! output in shape.

use super::types::{
    GenerationRequest, ModuleDetailsParams, ModulePlanParams, SuggestionParams, TaskKind,
    MODULE_WEEK_DAYS,
};

// ============================================================================
// Key Lists
// ============================================================================

pub const SUGGESTION_KEYS: &[&str] = &["Title", "Description", "Difficulty"];

pub const DETAILS_KEYS: &[&str] = &["title", "roadmap", "tech_stack", "diagrams", "resources"];

pub const OVERVIEW_KEYS: &[&str] = &[
    "project_title",
    "description",
    "technologies_used",
    "is_industrial_level",
    "technologies_you_will_learn",
    "prerequisites",
    "estimated_time",
    "modular_division",
    "learning_outcomes",
];

pub const MODULE_KEYS: &[&str] = &[
    "module_title",
    "summary",
    "steps",
    "prerequisites",
    "tentative_duration",
];

pub const MODULE_DETAILS_KEYS: &[&str] = &["title", "description", "steps"];

pub const RESOURCE_KEYS: &[&str] = &["resources"];

pub const DIAGRAM_KEYS: &[&str] = &["title", "description", "diagrams"];

// ============================================================================
// Worked Examples
// ============================================================================

pub const SUGGESTIONS_EXAMPLE: &str = "- **Title**: Recipe Finder - **Description**: A web app that searches recipes by the ingredients you already have, with saved favourites and a weekly shopping list. - **Difficulty**: Beginner";

pub const DETAILS_EXAMPLE: &str = r#"{
  "title": "Recipe Finder",
  "roadmap": [
    {"step": 1, "description": "Set up the project repository and tooling"},
    {"step": 2, "description": "Build the ingredient search API"}
  ],
  "tech_stack": {
    "Languages": ["TypeScript"],
    "Frameworks": ["React", "Express"],
    "Databases": ["PostgreSQL"]
  },
  "diagrams": {
    "UML": {
      "description": "Core domain classes",
      "classes": [
        {"name": "User", "attributes": ["userId", "email"], "methods": ["login()"]},
        {"name": "Recipe", "attributes": ["recipeId", "title"], "methods": ["matches()"]}
      ],
      "relationships": [
        {"source": "User", "target": "Recipe", "type": "association"}
      ]
    },
    "Flowchart": {
      "description": "Searching for a recipe",
      "elements": [
        {"type": "start", "id": "start", "text": "Start"},
        {"type": "process", "id": "search", "text": "Enter ingredients"},
        {"type": "decision", "id": "found", "text": "Recipes found?"},
        {"type": "end", "id": "end", "text": "End"}
      ],
      "connections": [
        {"source": "start", "destination": "search", "label": "open app"},
        {"source": "search", "destination": "found", "label": "submit"},
        {"source": "found", "destination": "end", "label": "yes"}
      ]
    },
    "DFD": {
      "description": "Data moving between user and system",
      "entities": [{"name": "User"}, {"name": "Recipe Service"}],
      "data_flows": [
        {"source": "User", "destination": "Recipe Service", "data": "ingredient list"}
      ]
    }
  },
  "resources": [
    {"type": "documentation", "name": "React Docs", "url": "https://react.dev/learn", "description": "Official React guide."}
  ]
}"#;

pub const OVERVIEW_EXAMPLE: &str = r#"{
  "project_title": "Recipe Finder",
  "description": "A web app that matches recipes to the ingredients a user already owns.",
  "technologies_used": ["React", "Express", "PostgreSQL"],
  "is_industrial_level": false,
  "technologies_you_will_learn": ["REST API design", "SQL joins"],
  "prerequisites": ["JavaScript basics", "HTML and CSS"],
  "estimated_time": {
    "frontend_hours": 20,
    "backend_hours": 25,
    "api_integration_hours": 10,
    "testing_hours": 8,
    "total_estimated_days": 14
  },
  "modular_division": {
    "Frontend": 20,
    "Backend": 25,
    "API Integration": 10,
    "Testing": 8
  },
  "learning_outcomes": ["Designing a relational schema", "Building a search endpoint"]
}"#;

pub const MODULES_EXAMPLE: &str = r#"[
  {
    "module_title": "Week 1: Foundations",
    "summary": "Set up the repository, tooling and the first API endpoint.",
    "steps": ["Initialise the project", "Create the database schema", "Expose a health endpoint"],
    "prerequisites": ["Git", "Node.js", "SQL basics"],
    "tentative_duration": "5 days"
  }
]"#;

pub const MODULE_DETAILS_EXAMPLE: &str = r#"{
  "title": "Week 1: Foundations",
  "description": "Prepare the codebase and data model for the rest of the project.",
  "steps": [
    {
      "title": "Create the database schema",
      "explanation": "Model recipes and ingredients as two tables joined by a link table.",
      "example": "A recipe 'Pancakes' links to 'flour', 'milk' and 'eggs'.",
      "code": "CREATE TABLE recipe (id SERIAL PRIMARY KEY, title TEXT NOT NULL);",
      "algorithm": "",
      "resources": ["https://www.postgresql.org/docs/current/ddl.html"]
    }
  ]
}"#;

pub const RESOURCES_EXAMPLE: &str = r#"{
  "resources": [
    {
      "type": "video",
      "name": "Express.js Crash Course",
      "url": "https://www.youtube.com/watch?v=L72fhGm1tfE",
      "description": "Covers routing and middleware in Express.",
      "estimated_time": 90
    }
  ]
}"#;

pub const DIAGRAMS_EXAMPLE: &str = r#"{
  "title": "Recipe Finder",
  "description": "Matches recipes to available ingredients.",
  "diagrams": {
    "UML": {
      "description": "Core domain classes",
      "classes": [
        {"name": "User", "attributes": ["userId", "email"], "methods": ["login()"]}
      ],
      "relationships": [
        {"source": "User", "target": "Recipe", "type": "association"}
      ]
    },
    "Flowchart": {
      "description": "Searching for a recipe",
      "elements": [
        {"type": "start", "id": "start", "text": "Start"},
        {"type": "process", "id": "process1", "text": "Enter ingredients"},
        {"type": "end", "id": "end", "text": "End"}
      ],
      "connections": [
        {"source": "start", "destination": "process1", "label": "Start process"}
      ]
    },
    "DFD": {
      "description": "Data moving between user and system",
      "entities": [{"name": "User"}, {"name": "System"}],
      "data_flows": [
        {"source": "User", "destination": "System", "data": "ingredient list"}
      ]
    }
  }
}"#;

/// Worked example embedded in the prompt for `kind`
pub fn worked_example(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::Suggestions => SUGGESTIONS_EXAMPLE,
        TaskKind::Details => DETAILS_EXAMPLE,
        TaskKind::Overview => OVERVIEW_EXAMPLE,
        TaskKind::Modules => MODULES_EXAMPLE,
        TaskKind::ModuleDetails => MODULE_DETAILS_EXAMPLE,
        TaskKind::Resources => RESOURCES_EXAMPLE,
        TaskKind::Diagrams => DIAGRAMS_EXAMPLE,
    }
}

/// Keys the model must populate for `kind`
pub fn required_keys(kind: TaskKind) -> &'static [&'static str] {
    match kind {
        TaskKind::Suggestions => SUGGESTION_KEYS,
        TaskKind::Details => DETAILS_KEYS,
        TaskKind::Overview => OVERVIEW_KEYS,
        TaskKind::Modules => MODULE_KEYS,
        TaskKind::ModuleDetails => MODULE_DETAILS_KEYS,
        TaskKind::Resources => RESOURCE_KEYS,
        TaskKind::Diagrams => DIAGRAM_KEYS,
    }
}

// ============================================================================
// Builders
// ============================================================================

/// Build the instruction text for `request`
pub fn build(request: &GenerationRequest) -> String {
    let kind = request.kind();
    let body = match request {
        GenerationRequest::Suggestions(params) => suggestions_prompt(params),
        GenerationRequest::Details { project_title } => details_prompt(project_title),
        GenerationRequest::Overview { project_title } => overview_prompt(project_title),
        GenerationRequest::Modules(params) => modules_prompt(params),
        GenerationRequest::ModuleDetails(params) => module_details_prompt(params),
        GenerationRequest::Resources { title, overview } => resources_prompt(title, overview),
        GenerationRequest::Diagrams { project_title } => diagrams_prompt(project_title),
    };

    format!("{}\n\n{}", body, output_rules(kind))
}

fn output_rules(kind: TaskKind) -> String {
    let keys = required_keys(kind).join(", ");

    if kind == TaskKind::Suggestions {
        return format!(
            r#"Example of one correctly formatted line:
{}

Output rules:
- Use exactly these labels, spelled and capitalised as shown: {}.
- Put each project on a single line, separated by " - " exactly as in the example.
- Do not wrap the answer in markdown code fences.
- Do not add any introduction, explanation or closing remarks."#,
            SUGGESTIONS_EXAMPLE, keys
        );
    }

    let example = worked_example(kind);
    let key_rule = if example.trim_start().starts_with('[') {
        "Return a JSON array; every element must use exactly these keys (case-sensitive)"
    } else {
        "Use exactly these top-level keys (case-sensitive)"
    };

    format!(
        r#"Example of the expected structure:
{}

Output rules:
- Respond with valid JSON only, using double quotes for every key and string.
- {}: {}.
- Do not wrap the answer in markdown code fences.
- Do not add any introduction, explanation or closing remarks."#,
        example, key_rule, keys
    )
}

fn suggestions_prompt(params: &SuggestionParams) -> String {
    let mut prompt = format!(
        "Suggest exactly 3 innovative and well-defined coding project ideas for a {} developer \
         interested in a {} project using {}.\n",
        params.skill_level, params.project_type, params.technology
    );

    if let Some(duration) = &params.duration {
        prompt.push_str(&format!(
            "The project should be suitable for a {}-term duration.\n",
            duration
        ));
    }
    if let Some(domain) = &params.domain {
        prompt.push_str(&format!(
            "Focus on the {} domain and ensure real-world applicability.\n",
            domain
        ));
    }
    if let Some(commitment) = &params.time_commitment {
        prompt.push_str(&format!(
            "The student has a time commitment of {}. Scope each project so it can realistically \
             be completed within that daily time budget.\n",
            commitment
        ));
    }

    prompt.push_str(
        "Each project should include:\n\
         1. A clear and concise title that reflects the core concept.\n\
         2. A brief description (3-5 sentences) of the objectives, key features and impact.\n\
         3. A difficulty level: Beginner, Intermediate or Advanced.\n\
         Format every project EXACTLY as:\n\
         - **Title**: [title] - **Description**: [description] - **Difficulty**: [difficulty]",
    );
    prompt
}

fn details_prompt(project_title: &str) -> String {
    format!(
        r#"Provide a structured JSON description of the project "{}" with these keys:
- title: string
- roadmap: ordered list of {{"step": number, "description": string}} actions
- tech_stack: object mapping Languages, Frameworks and Databases to lists of names
- diagrams: object with UML, Flowchart and DFD entries shaped exactly like the example
- resources: list of {{"type", "name", "url", "description"}} learning resources"#,
        project_title
    )
}

fn overview_prompt(project_title: &str) -> String {
    format!(
        r#"Generate a detailed project overview for the project titled "{}". Include:
- A descriptive summary of the project.
- Technologies used.
- Whether it is an industrial-level project (true/false).
- Technologies someone would learn from this project.
- Prerequisites (concepts, tools, frameworks).
- Estimated hours for frontend, backend, API integration and testing.
- Approximate number of days to complete the project.
- Modular time division in hours as an object.
- Key learning outcomes."#,
        project_title
    )
}

fn modules_prompt(params: &ModulePlanParams) -> String {
    format!(
        r#"You are a project planner. Create a weekly modular breakdown for the project titled "{title}".
The project lasts {weeks} weeks and the student can dedicate about {hours} hours per day.
Break the project into exactly {weeks} weekly modules, one per week, logically ordered and
together covering the whole project.

For each module provide:
- module_title: a short, clear title for the week's focus
- summary: what will be accomplished that week
- steps: list of action items for the week
- prerequisites: technologies, tools or knowledge needed before starting the module
- tentative_duration: estimated duration in days, e.g. "5 days"

Return a JSON array with one object per module."#,
        title = params.project_title,
        weeks = params.total_weeks,
        hours = params.hours_per_day
    )
}

fn module_details_prompt(params: &ModuleDetailsParams) -> String {
    let module = &params.module;
    let module_total_hours = params.module_total_hours();

    let mut prompt = format!(
        "You are an expert educator helping a beginner understand the following module.\n\n\
         Title: {}\nSummary: {}\nSteps:\n",
        module.title, module.summary
    );

    for (i, step) in module.steps.iter().enumerate() {
        if step.description.is_empty() {
            prompt.push_str(&format!("{}. {}\n", i + 1, step.title));
        } else {
            prompt.push_str(&format!("{}. {}: {}\n", i + 1, step.title, step.description));
        }
    }

    prompt.push_str(&format!(
        "\nThe student has {} weeks in total and can dedicate {} hours per day across the whole \
         project. Plan this module within one week ({} days) and a total of {} hours.\n\
         For every step give a title, an explanation, a concrete example, a code snippet \
         (empty string if not applicable), the algorithm used (empty string if not applicable) \
         and a list of resource URLs.",
        params.total_weeks, params.hours_per_day, MODULE_WEEK_DAYS, module_total_hours
    ));
    prompt
}

fn resources_prompt(title: &str, overview: &str) -> String {
    format!(
        r#"Provide learning resources for the following project:
- Title: {}
- Overview: {}

Return an object with a "resources" list. Each resource has:
- type: article, video, course or documentation
- name: name of the resource
- url: a valid link on a trusted platform (official docs, YouTube, blogs)
- description: one or two sentences
- estimated_time: minutes needed to read or watch it"#,
        title, overview
    )
}

fn diagrams_prompt(project_title: &str) -> String {
    format!(
        r#"Create a structured JSON description of the diagrams for the project titled "{}".
The JSON has these keys:
- title: string
- description: short string about the project
- diagrams: object with UML (classes and relationships), Flowchart (elements and
  connections) and DFD (entities and data_flows), shaped exactly like the example"#,
        project_title
    )
}
