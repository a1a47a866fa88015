//! Run Logger Module
//!
//! Tracks each service run in a JSONL `run.log` file: start/end timestamps,
//! final status, and any errors recorded along the way. Only the most
//! recent runs are kept so the file stays small.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{error, info};

use crate::fs_manager::PortablePathManager;

/// Maximum number of runs kept in the log file
const MAX_RUNS: usize = 10;

/// Name of the run log file
const RUN_LOG_FILENAME: &str = "run.log";

/// One recorded service run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEntry {
    pub run_id: String,
    pub start_time: DateTime<Local>,
    pub end_time: Option<DateTime<Local>>,
    /// "running", "success" or "failure"
    pub status: String,
    pub errors: Vec<ErrorEntry>,
}

/// One error recorded during a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

/// Global run logger instance
static GLOBAL_LOGGER: Mutex<Option<RunLogger>> = Mutex::new(None);

/// Tracks the current run and persists it to `run.log`.
pub struct RunLogger {
    current_run: RunEntry,
    log_path: PathBuf,
}

impl RunLogger {
    /// Starts tracking a new run under the standard logs directory.
    pub fn start_run() -> Self {
        Self::start_run_at(PortablePathManager::logs_dir())
    }

    fn start_run_at(logs_dir: PathBuf) -> Self {
        let now = Local::now();
        let run_id = format!("run_{}", now.format("%Y%m%d_%H%M%S"));

        if let Err(e) = fs::create_dir_all(&logs_dir) {
            error!("Failed to create logs directory: {}", e);
        }

        let logger = Self {
            current_run: RunEntry {
                run_id: run_id.clone(),
                start_time: now,
                end_time: None,
                status: "running".to_string(),
                errors: Vec::new(),
            },
            log_path: logs_dir.join(RUN_LOG_FILENAME),
        };
        logger.write_to_file();

        info!(run_id = %run_id, log = %logger.log_path.display(), "run logger started");
        logger
    }

    /// Initializes the global run logger. Call once at startup.
    pub fn init_global() {
        if let Ok(mut global) = GLOBAL_LOGGER.lock() {
            if global.is_none() {
                *global = Some(Self::start_run());
            }
        }
    }

    /// Records an error for the current run.
    pub fn log_error(&mut self, message: &str) {
        self.current_run.errors.push(ErrorEntry {
            timestamp: Local::now(),
            message: message.to_string(),
        });
        self.write_to_file();
    }

    /// Records an error on the global logger. Safe before initialization.
    pub fn global_log_error(message: &str) {
        if let Ok(mut global) = GLOBAL_LOGGER.lock() {
            if let Some(logger) = global.as_mut() {
                logger.log_error(message);
            }
        }
    }

    /// Marks the current run finished.
    pub fn complete_run(&mut self, success: bool) {
        self.current_run.end_time = Some(Local::now());
        self.current_run.status = if success { "success" } else { "failure" }.to_string();
        self.write_to_file();
        info!(
            run_id = %self.current_run.run_id,
            status = %self.current_run.status,
            "run completed"
        );
    }

    /// Completes the global run logger.
    pub fn complete_global(success: bool) {
        if let Ok(mut global) = GLOBAL_LOGGER.lock() {
            if let Some(logger) = global.as_mut() {
                logger.complete_run(success);
            }
        }
    }

    /// Writes the run file, keeping only the last `MAX_RUNS` entries.
    fn write_to_file(&self) {
        let mut runs = self.read_existing_runs();

        match runs.iter_mut().find(|r| r.run_id == self.current_run.run_id) {
            Some(run) => *run = self.current_run.clone(),
            None => runs.push(self.current_run.clone()),
        }
        while runs.len() > MAX_RUNS {
            runs.remove(0);
        }

        let write = || -> std::io::Result<()> {
            let mut file = fs::File::create(&self.log_path)?;
            writeln!(file, "# CharmForge run log - one JSON object per line")?;
            for run in &runs {
                match serde_json::to_string(run) {
                    Ok(json) => writeln!(file, "{}", json)?,
                    Err(e) => error!("Failed to serialize run entry: {}", e),
                }
            }
            Ok(())
        };
        if let Err(e) = write() {
            error!("Failed to write run log: {}", e);
        }
    }

    /// Reads existing run entries, skipping comments and broken lines.
    fn read_existing_runs(&self) -> Vec<RunEntry> {
        let file = match fs::File::open(&self.log_path) {
            Ok(file) => file,
            Err(_) => return Vec::new(),
        };

        BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter(|line| {
                let trimmed = line.trim();
                !trimmed.is_empty() && !trimmed.starts_with('#')
            })
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect()
    }

    /// The current run entry (for inspection/testing).
    #[allow(dead_code)]
    pub fn current_run(&self) -> &RunEntry {
        &self.current_run
    }
}
