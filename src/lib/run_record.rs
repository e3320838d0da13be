//! Run tracking
//!
//! Each launch writes one JSON record under the application folder:
//!
//! - uuid: unique identifier for the launch
//! - pid: launcher process id
//! - status: "executing" or "executed"
//! - exitCode: the tool's exit code (null while executing)
//! - image, projectRoot, runtime: what was launched, where, and with what
//! - startTime / endTime: RFC 3339 timestamps
//!
//! Tracking is best-effort: persistence failures are reported as warnings
//! and never change the outcome of the launch.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use uuid::Uuid;

/// Default application folder name under the user's home directory.
const DEFAULT_APP_FOLDER_NAME: &str = ".draft-paper";
/// Subdirectory holding one JSON file per run.
const RUNS_DIR_NAME: &str = "runs";

/// Lifecycle state of a launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Executing,
    Executed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Executing => "executing",
            RunStatus::Executed => "executed",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record of a single launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub uuid: String,
    pub pid: Option<u32>,
    pub status: RunStatus,
    pub exit_code: Option<i32>,
    pub image: String,
    pub project_root: String,
    pub runtime: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub platform: String,
}

impl RunRecord {
    /// Create a record for a launch that is about to start.
    pub fn new(image: &str, project_root: &Path, runtime: &str) -> Self {
        RunRecord {
            uuid: Uuid::new_v4().to_string(),
            pid: Some(process::id()),
            status: RunStatus::Executing,
            exit_code: None,
            image: image.to_string(),
            project_root: project_root.to_string_lossy().to_string(),
            runtime: runtime.to_string(),
            start_time: Utc::now().to_rfc3339(),
            end_time: None,
            platform: env::consts::OS.to_string(),
        }
    }

    /// Mark the launch finished with the tool's exit code.
    pub fn complete(&mut self, exit_code: i32) {
        self.status = RunStatus::Executed;
        self.exit_code = Some(exit_code);
        self.end_time = Some(Utc::now().to_rfc3339());
    }
}

/// Options for creating a [`RunStore`].
#[derive(Debug, Clone, Default)]
pub struct RunStoreOptions {
    /// Application folder; defaults to `~/.draft-paper`.
    pub app_folder: Option<PathBuf>,
    /// Print warnings when persistence fails.
    pub verbose: bool,
}

/// Per-run JSON file storage under `<app_folder>/runs/`.
#[derive(Debug, Clone)]
pub struct RunStore {
    runs_dir: PathBuf,
    verbose: bool,
}

impl RunStore {
    pub fn with_options(options: RunStoreOptions) -> Self {
        let app_folder = options.app_folder.unwrap_or_else(default_app_folder);
        RunStore {
            runs_dir: app_folder.join(RUNS_DIR_NAME),
            verbose: options.verbose,
        }
    }

    /// Path of the record file for a run.
    pub fn record_path(&self, uuid: &str) -> PathBuf {
        self.runs_dir.join(format!("{}.json", uuid))
    }

    /// Write (or overwrite) the record for a run.
    pub fn save(&self, record: &RunRecord) -> io::Result<()> {
        fs::create_dir_all(&self.runs_dir)?;
        let mut payload = serde_json::to_string_pretty(record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        payload.push('\n');
        fs::write(self.record_path(&record.uuid), payload)
    }

    /// Load the record for a run.
    pub fn get(&self, uuid: &str) -> io::Result<RunRecord> {
        let raw = fs::read_to_string(self.record_path(uuid))?;
        serde_json::from_str(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

fn default_app_folder() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(env::temp_dir)
        .join(DEFAULT_APP_FOLDER_NAME)
}
