//! Container invocation construction
//!
//! Assembles the complete argument vector for the container runtime:
//! auto-removal, the project-root bind mount, the numeric user spec, the
//! environment assignments, and the tool image — in that order. Arguments
//! are passed as a vector (never through a shell), so paths containing
//! spaces survive intact.

use std::collections::BTreeMap;
use std::path::Path;

use crate::identity::Identity;

/// In-container path the project root is mounted at. The tool reads its
/// inputs from and writes its outputs into this directory.
pub const CONTAINER_DATA_DIR: &str = "/data";

/// Image of the containerized paper-compilation tool.
pub const TOOL_IMAGE: &str = "openjournals/inara:latest";

/// Environment variable selecting the tool's output profile.
pub const JOURNAL_ENV_VAR: &str = "JOURNAL";

/// Output profile the tool compiles the paper for.
pub const DEFAULT_JOURNAL: &str = "joss";

/// Container runtime used when `DRAFT_PAPER_RUNTIME` is not set.
pub const DEFAULT_RUNTIME: &str = "docker";

/// Environment assignments injected into the container.
///
/// Keys are known at build time; values are opaque strings handed to the
/// child unmodified. A `BTreeMap` keeps the assignment order stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub env: BTreeMap<String, String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let mut env = BTreeMap::new();
        env.insert(JOURNAL_ENV_VAR.to_string(), DEFAULT_JOURNAL.to_string());
        RuntimeConfig { env }
    }
}

/// The fully assembled runtime command. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSpec {
    /// Container runtime executable name or path.
    pub program: String,
    /// Complete argument vector, image last.
    pub args: Vec<String>,
}

impl InvocationSpec {
    /// Build the runtime invocation for one launch.
    ///
    /// The mount is read-write: the tool writes the compiled paper back
    /// into the project root.
    pub fn build(
        runtime: &str,
        root: &Path,
        identity: Identity,
        config: &RuntimeConfig,
    ) -> Self {
        let mut args = vec![
            "run".to_string(),
            "--rm".to_string(),
            "-v".to_string(),
            format!("{}:{}", root.display(), CONTAINER_DATA_DIR),
            "--user".to_string(),
            identity.spec(),
        ];

        for (key, value) in &config.env {
            args.push("--env".to_string());
            args.push(format!("{}={}", key, value));
        }

        args.push(TOOL_IMAGE.to_string());

        InvocationSpec {
            program: runtime.to_string(),
            args,
        }
    }

    /// Human-readable command line for logs and verbose output.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.contains(' ') {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}
