//! draft-paper CLI
//!
//! Compiles the paper in the directory this launcher is installed in, by
//! running the Open Journals toolchain in a container:
//! - the launcher's own (symlink-resolved) parent directory is mounted
//!   read-write at /data
//! - the tool runs as the invoking user's uid:gid, so output files are
//!   owned by the caller
//! - the tool's streams pass through untouched and its exit code becomes
//!   the launcher's exit code
//!
//! Takes no arguments; all knobs are DRAFT_PAPER_* environment variables.

use std::env;
use std::path::PathBuf;
use std::process;

use draft_paper::{
    clear_current_run, create_log_footer, create_log_header, create_log_path, exit_codes,
    get_timestamp, locator, runner, set_current_run, setup_signal_handlers, write_log_file,
    Identity, InvocationSpec, LogHeaderParams, RunRecord, RunStore, RunStoreOptions,
    RuntimeConfig, DEFAULT_RUNTIME, TOOL_IMAGE,
};

/// Configuration from environment variables
struct Config {
    /// Container runtime executable (tests substitute a stub here)
    runtime: String,
    /// Verbose mode
    verbose: bool,
    /// Disable run tracking
    disable_tracking: bool,
    /// Custom app folder for run tracking
    app_folder: Option<String>,
}

impl Config {
    fn from_env() -> Self {
        Self {
            runtime: env::var("DRAFT_PAPER_RUNTIME")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_RUNTIME.to_string()),
            verbose: env_bool("DRAFT_PAPER_VERBOSE"),
            disable_tracking: env_bool("DRAFT_PAPER_DISABLE_TRACKING"),
            app_folder: env::var("DRAFT_PAPER_APP_FOLDER").ok(),
        }
    }

    /// Create a run store based on config
    fn create_run_store(&self) -> Option<RunStore> {
        if self.disable_tracking {
            return None;
        }

        Some(RunStore::with_options(RunStoreOptions {
            app_folder: self.app_folder.as_ref().map(PathBuf::from),
            verbose: self.verbose,
        }))
    }
}

fn env_bool(name: &str) -> bool {
    env::var(name).is_ok_and(|v| v == "1" || v == "true")
}

fn main() {
    // Set up signal handlers so an interrupted launcher tears down the
    // container instead of orphaning it
    setup_signal_handlers();

    let config = Config::from_env();

    let root = match locator::resolve() {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(exit_codes::RESOLUTION_FAILURE);
        }
    };

    let identity = match Identity::current() {
        Ok(identity) => identity,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(exit_codes::IDENTITY_FAILURE);
        }
    };

    let spec = InvocationSpec::build(&config.runtime, &root, identity, &RuntimeConfig::default());
    let command_line = spec.command_line();

    if config.verbose {
        eprintln!("[Launch] {}", command_line);
    }

    let start_time = get_timestamp();
    let log_path = create_log_path();
    let mut log_content = create_log_header(&LogHeaderParams {
        command_line: &command_line,
        image: TOOL_IMAGE,
        project_root: &root.to_string_lossy(),
        identity,
        start_time: &start_time,
    });

    // Run tracking: save the initial record and register it for
    // signal-time finalization
    let store = config.create_run_store();
    let mut record = RunRecord::new(TOOL_IMAGE, &root, &config.runtime);
    if let Some(ref store) = store {
        if let Err(e) = store.save(&record) {
            if config.verbose {
                eprintln!("[Tracking] Warning: Failed to save initial record: {}", e);
            }
        } else {
            if config.verbose {
                eprintln!("[Tracking] Run ID: {}", record.uuid);
            }
            set_current_run(record.clone(), store.clone());
        }
    }

    let exit_code = match runner::run(&spec) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);

            let end_time = get_timestamp();
            log_content.push_str(&format!("{}\n", e));
            log_content.push_str(&create_log_footer(&end_time, exit_codes::RUNTIME_FAILURE));
            write_log_file(&log_path, &log_content);

            finalize_record(
                store.as_ref(),
                &mut record,
                exit_codes::RUNTIME_FAILURE,
                config.verbose,
            );
            process::exit(exit_codes::RUNTIME_FAILURE);
        }
    };

    let end_time = get_timestamp();
    log_content.push_str(&create_log_footer(&end_time, exit_code));
    write_log_file(&log_path, &log_content);

    finalize_record(store.as_ref(), &mut record, exit_code, config.verbose);

    // The tool's exit code, verbatim
    process::exit(exit_code);
}

/// Complete and save the run record after the runtime has exited
fn finalize_record(store: Option<&RunStore>, record: &mut RunRecord, exit_code: i32, verbose: bool) {
    if let Some(store) = store {
        record.complete(exit_code);
        if let Err(e) = store.save(record) {
            if verbose {
                eprintln!(
                    "[Tracking] Warning: Failed to save completion record: {}",
                    e
                );
            }
        }
        // Signal cleanup no longer needed once completion is recorded
        clear_current_run();
    }
}
