//! Response normalization: model text to [`NormalizedDocument`]
//!
//! Model output is supposed to be JSON but often arrives fenced in markdown,
//! wrapped in prose, or written with single quotes, trailing commas and
//! bareword keys. Parsing is attempted in increasingly forgiving passes:
//!
//! 1. strict parse of the fence-stripped text (clean JSON is never rewritten)
//! 2. strict parse after [`repair`]
//! 3. the outermost `{...}` / `[...]` span, strict then repaired
//!
//! Suggestions use the legacy bullet format and go through
//! [`extract_suggestions`] first.

use once_cell::sync::Lazy;
use project_planner_sdk::{log_degraded, log_repaired};
use regex::Regex;
use serde_json::{json, Value};

use super::types::{GenerationRequest, NormalizedDocument, Overview, TaskKind};
use crate::error::{PlannerError, PlannerResult};
use crate::oracle::RawCompletion;

static TRAILING_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",(\s*[}\]])").expect("trailing comma pattern"));

static BARE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([{,]\s*)([A-Za-z_]\w*)(\s*:)").expect("bare key pattern"));

// Captures stop at the next `**` label so a line missing a label never
// swallows the following one.
static SUGGESTION_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)\*\*Title\*\*:\s*([^*\n]*?)(?:\s*-\s*\*\*Description|$)")
        .expect("title pattern")
});

static SUGGESTION_DESCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)\*\*Description\*\*:\s*([^*\n]*?)(?:\s*-\s*\*\*Difficulty|$)")
        .expect("description pattern")
});

static SUGGESTION_DIFFICULTY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)\*\*Difficulty\*\*:\s*([^*\n]*?)(?:\s*-\s*\*\*|$)")
        .expect("difficulty pattern")
});

// ============================================================================
// Text Repair
// ============================================================================

/// Remove a surrounding markdown code fence (optionally tagged `json`)
///
/// A fenced block embedded in prose is extracted; text without a fence is
/// returned trimmed and otherwise untouched.
pub fn strip_code_fence(text: &str) -> String {
    let text = text.trim();

    let inner = if let Some(rest) = text.strip_prefix("```") {
        let rest = rest
            .strip_prefix("json")
            .or_else(|| rest.strip_prefix("JSON"))
            .unwrap_or(rest);
        rest.strip_suffix("```").unwrap_or(rest)
    } else if let Some(start) = text.find("```json") {
        // Fenced block surrounded by prose
        let body_start = start + 7;
        let body_end = text[body_start..]
            .rfind("```")
            .map(|pos| pos + body_start)
            .unwrap_or(text.len());
        &text[body_start..body_end]
    } else {
        text.strip_suffix("```").unwrap_or(text)
    };

    inner.trim().to_string()
}

/// Best-effort textual repair of near-JSON
///
/// Applies, in order: fence stripping, single to double quotes, trailing
/// comma removal, bareword key quoting. Each step is idempotent. Apostrophes
/// inside string values are not preserved.
pub fn repair(text: &str) -> String {
    let text = strip_code_fence(text);
    let text = text.replace('\'', "\"");
    let text = TRAILING_COMMA.replace_all(&text, "$1");
    let text = BARE_KEY.replace_all(&text, "${1}\"${2}\"${3}");
    text.into_owned()
}

// ============================================================================
// Parsing
// ============================================================================

/// How a document was finally parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseRoute {
    Strict,
    Repaired,
    Span,
}

impl ParseRoute {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseRoute::Strict => "strict",
            ParseRoute::Repaired => "repaired",
            ParseRoute::Span => "outermost_span",
        }
    }
}

fn parse_structured(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(|value| value.is_object() || value.is_array())
}

/// Outermost `{...}` or `[...]` slice of `text`
fn outermost_span(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let close = if text[start..].starts_with('{') { '}' } else { ']' };
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

/// Parse model text into a JSON tree, repairing it if needed
pub fn parse_document(text: &str) -> PlannerResult<(Value, ParseRoute)> {
    let stripped = strip_code_fence(text);
    if stripped.is_empty() {
        return Err(PlannerError::malformed("empty response", text));
    }

    if let Some(value) = parse_structured(&stripped) {
        return Ok((value, ParseRoute::Strict));
    }

    if let Some(value) = parse_structured(&repair(&stripped)) {
        return Ok((value, ParseRoute::Repaired));
    }

    if let Some(span) = outermost_span(&stripped) {
        if let Some(value) = parse_structured(span).or_else(|| parse_structured(&repair(span))) {
            return Ok((value, ParseRoute::Span));
        }
    }

    Err(PlannerError::malformed("not parseable as JSON after repair", &stripped))
}

// ============================================================================
// Bullet Extraction
// ============================================================================

fn captures(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Pull `Title / Description / Difficulty` triples out of bullet text
///
/// Lines outside the pattern are ignored. When the three counts differ only
/// the first `min` entries are kept.
pub fn extract_suggestions(text: &str) -> Vec<Value> {
    let titles = captures(&SUGGESTION_TITLE, text);
    let descriptions = captures(&SUGGESTION_DESCRIPTION, text);
    let difficulties = captures(&SUGGESTION_DIFFICULTY, text);

    titles
        .into_iter()
        .zip(descriptions)
        .zip(difficulties)
        .map(|((title, description), difficulty)| {
            json!({
                "title": title,
                "description": description,
                "difficulty": difficulty,
            })
        })
        .collect()
}

// ============================================================================
// Normalize
// ============================================================================

fn normalize_suggestions(text: &str) -> PlannerResult<NormalizedDocument> {
    let triples = extract_suggestions(text);
    if !triples.is_empty() {
        return Ok(NormalizedDocument::new(Value::Array(triples)));
    }

    let (value, _) = parse_document(text)?;
    let entries = match value {
        Value::Object(map) if map.contains_key("title") => vec![Value::Object(map)],
        other => NormalizedDocument::new(other)
            .items(&["suggestions", "projects"])
            .to_vec(),
    };

    if entries.is_empty() {
        return Err(PlannerError::malformed("no suggestions found", text));
    }
    Ok(NormalizedDocument::new(Value::Array(entries)))
}

/// Parse a raw completion for `request` without any fallback
///
/// Reports [`PlannerError::MalformedResponse`] for absent or unusable text.
pub fn parse_response(
    raw: &RawCompletion,
    request: &GenerationRequest,
) -> PlannerResult<NormalizedDocument> {
    let task = request.kind();
    let text = raw.text().unwrap_or("");

    if task == TaskKind::Suggestions {
        return normalize_suggestions(text);
    }

    let (value, route) = parse_document(text)?;
    if route != ParseRoute::Strict {
        log_repaired!(task, route.as_str());
    }
    Ok(NormalizedDocument::new(value))
}

/// Document used in place of an unusable response
///
/// Overview has a fixed fallback; every other task maps from an empty
/// document to its defaults.
pub fn fallback_document(request: &GenerationRequest) -> NormalizedDocument {
    match request {
        GenerationRequest::Overview { project_title } => NormalizedDocument::new(
            serde_json::to_value(Overview::fallback(project_title)).unwrap_or_default(),
        ),
        _ => NormalizedDocument::empty(),
    }
}

/// Turn a raw completion into a generic document for `request`
///
/// Overview never fails: unparseable text yields its fallback document.
/// Every other task reports [`PlannerError::MalformedResponse`], which the
/// pipeline turns into a degraded result.
pub fn normalize(
    raw: &RawCompletion,
    request: &GenerationRequest,
) -> PlannerResult<NormalizedDocument> {
    match parse_response(raw, request) {
        Err(err) if request.kind() == TaskKind::Overview => {
            log_degraded!(request.kind(), err);
            Ok(fallback_document(request))
        }
        other => other,
    }
}
