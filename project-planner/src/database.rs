//! SQLite cache for generated results
//!
//! Results are stored by natural key: the human-meaningful request fields
//! (project title, or the whole parameter tuple for suggestions) rather than
//! a generated identifier. The pipeline treats the cache as optional; a miss
//! or an error only means the oracle gets called.
//!
//! # Database Schema
//!
//! 1. **generations** - one row per `(task, natural_key)`, payload as JSON
//! 2. **schema_version** - schema version for migrations
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use project_planner::database::{CacheGateway, SqliteCache};
//! use project_planner::planner::GenerationRequest;
//!
//! # fn main() -> anyhow::Result<()> {
//! let cache = SqliteCache::new(dirs::home_dir().unwrap().join(".project-planner/cache.db"))?;
//! cache.initialize_schema()?;
//!
//! let request = GenerationRequest::Overview { project_title: "Chat App".to_string() };
//! if let Some(result) = cache.lookup(&request.natural_key())? {
//!     println!("{}", serde_json::to_string_pretty(&result)?);
//! }
//! # Ok(())
//! # }
//! ```

use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::error::{PlannerError, PlannerResult};
use crate::planner::types::{
    module_plan_title, DomainResult, NaturalKey, ProjectModule, Resource, TaskKind,
};

/// Lookup/store boundary between the pipeline and any result store
pub trait CacheGateway: Send + Sync {
    fn lookup(&self, key: &NaturalKey) -> PlannerResult<Option<DomainResult>>;
    fn store(&self, key: &NaturalKey, result: &DomainResult) -> PlannerResult<()>;
}

/// A stored module plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredProject {
    pub project_title: String,
    pub project_id: Option<String>,
    pub stored_at: String,
    pub modules: Vec<ProjectModule>,
}

/// SQLite-backed [`CacheGateway`]
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    /// Open (or create) the cache database at `path`
    pub fn new(path: PathBuf) -> PlannerResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PlannerError::Cache(format!("{}: {}", parent.display(), e)))?;
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrent access
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory cache (tests and `--no-cache` dry runs)
    pub fn new_in_memory() -> PlannerResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> PlannerResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| PlannerError::Cache("connection lock poisoned".to_string()))
    }

    /// Create tables and indexes
    pub fn initialize_schema(&self) -> PlannerResult<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS generations (
                task TEXT NOT NULL,
                natural_key TEXT NOT NULL,

                -- Set for module plans and module details
                project_id TEXT,

                payload TEXT NOT NULL,
                stored_at TEXT NOT NULL,

                PRIMARY KEY (task, natural_key)
            );

            CREATE INDEX IF NOT EXISTS idx_generations_project_id ON generations(project_id);

            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );

            INSERT OR IGNORE INTO schema_version (version) VALUES (1);
            "#,
        )?;

        Ok(())
    }

    /// Get current schema version
    pub fn get_schema_version(&self) -> PlannerResult<i32> {
        let version: i32 =
            self.conn()?
                .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
                    row.get(0)
                })?;
        Ok(version)
    }

    /// Number of stored results, optionally for one task
    pub fn count(&self, task: Option<TaskKind>) -> PlannerResult<usize> {
        let conn = self.conn()?;
        let count: i64 = match task {
            Some(task) => conn.query_row(
                "SELECT COUNT(*) FROM generations WHERE task = ?1",
                params![task.as_str()],
                |row| row.get(0),
            )?,
            None => conn.query_row("SELECT COUNT(*) FROM generations", [], |row| row.get(0))?,
        };
        Ok(count as usize)
    }

    /// Every stored module plan, newest first
    pub fn list_projects(&self) -> PlannerResult<Vec<StoredProject>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT natural_key, project_id, payload, stored_at FROM generations
             WHERE task = ?1
             ORDER BY stored_at DESC",
        )?;

        let rows = stmt.query_map(params![TaskKind::Modules.as_str()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut projects = Vec::new();
        for row in rows {
            let (natural_key, project_id, payload, stored_at) = row?;
            let modules = serde_json::from_str::<DomainResult>(&payload)?
                .into_modules()
                .unwrap_or_default();
            projects.push(StoredProject {
                project_title: module_plan_title(&natural_key).to_string(),
                project_id,
                stored_at,
                modules,
            });
        }

        Ok(projects)
    }

    /// Step resource URLs of every stored module of a project
    pub fn collect_module_resources(&self, project_id: &str) -> PlannerResult<Vec<Resource>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT payload FROM generations
             WHERE task = ?1 AND project_id = ?2
             ORDER BY natural_key",
        )?;

        let payloads = stmt
            .query_map(
                params![TaskKind::ModuleDetails.as_str(), project_id],
                |row| row.get::<_, String>(0),
            )?
            .collect::<Result<Vec<_>, _>>()?;

        let mut resources = Vec::new();
        for payload in payloads {
            let Some(details) = serde_json::from_str::<DomainResult>(&payload)?.into_module_details()
            else {
                continue;
            };

            for url in details.steps.iter().flat_map(|step| step.resources.iter()) {
                if url.trim().is_empty() {
                    continue;
                }
                resources.push(resource_from_url(url, &details.title));
            }
        }

        Ok(resources)
    }
}

fn resource_from_url(url: &str, module_title: &str) -> Resource {
    let name = url
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or("Resource");

    Resource {
        kind: "article".to_string(),
        name: name.to_string(),
        url: url.to_string(),
        description: format!("Resource related to {}", module_title),
        estimated_time: None,
    }
}

impl CacheGateway for SqliteCache {
    fn lookup(&self, key: &NaturalKey) -> PlannerResult<Option<DomainResult>> {
        let payload: Option<String> = self
            .conn()?
            .query_row(
                "SELECT payload FROM generations WHERE task = ?1 AND natural_key = ?2",
                params![key.task.as_str(), key.key],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    fn store(&self, key: &NaturalKey, result: &DomainResult) -> PlannerResult<()> {
        let payload = serde_json::to_string(result)?;
        let stored_at = Local::now().to_rfc3339();

        self.conn()?.execute(
            r#"
            INSERT INTO generations (task, natural_key, project_id, payload, stored_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(task, natural_key) DO UPDATE SET
                project_id = excluded.project_id,
                payload = excluded.payload,
                stored_at = excluded.stored_at
            "#,
            params![
                key.task.as_str(),
                key.key,
                result.project_id(),
                payload,
                stored_at
            ],
        )?;

        Ok(())
    }
}
