//! Per-launch metadata log
//!
//! Every launch writes a small log file recording what was run, where,
//! as whom, and how it ended. The tool's own output is not captured here;
//! it streams through to the caller untouched.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use crate::identity::Identity;

/// Generate timestamp for logging
pub fn get_timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}

/// Generate unique log filename
pub fn generate_log_filename() -> String {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("draft-paper-{}-{}.log", timestamp, std::process::id())
}

/// Get log directory from environment or use system temp
pub fn get_log_dir() -> PathBuf {
    env::var("DRAFT_PAPER_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir())
}

/// Create log file path
pub fn create_log_path() -> PathBuf {
    get_log_dir().join(generate_log_filename())
}

/// Launch metadata recorded in the log header
#[derive(Debug)]
pub struct LogHeaderParams<'a> {
    pub command_line: &'a str,
    pub image: &'a str,
    pub project_root: &'a str,
    pub identity: Identity,
    pub start_time: &'a str,
}

/// Create log content header
pub fn create_log_header(params: &LogHeaderParams) -> String {
    let mut content = String::new();
    content.push_str("=== Draft Paper Log ===\n");
    content.push_str(&format!("Timestamp: {}\n", params.start_time));
    content.push_str(&format!("Command: {}\n", params.command_line));
    content.push_str(&format!("Image: {}\n", params.image));
    content.push_str(&format!("Project Root: {}\n", params.project_root));
    content.push_str(&format!("User: {}\n", params.identity.spec()));
    content.push_str(&format!("Platform: {}\n", std::env::consts::OS));
    content.push_str(&format!("{}\n\n", "=".repeat(50)));
    content
}

/// Create log content footer
pub fn create_log_footer(end_time: &str, exit_code: i32) -> String {
    let mut content = String::new();
    content.push_str(&format!("\n{}\n", "=".repeat(50)));
    content.push_str(&format!("Finished: {}\n", end_time));
    content.push_str(&format!("Exit Code: {}\n", exit_code));
    content
}

/// Write log file
pub fn write_log_file(log_path: &PathBuf, content: &str) -> bool {
    match File::create(log_path) {
        Ok(mut file) => file.write_all(content.as_bytes()).is_ok(),
        Err(e) => {
            eprintln!("\nWarning: Could not save log file: {}", e);
            false
        }
    }
}
