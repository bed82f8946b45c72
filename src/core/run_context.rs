//! Run-scoped log and failure accumulator
//!
//! Every phase appends to one `RunContext`. Lines are echoed to the console
//! as they happen and written to the log file in order exactly once when the
//! run finishes, so a partially failed run still leaves a complete record.

use crate::core::error::RemoteError;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Default log file, overwritten on every run
pub const DEFAULT_LOG_FILE: &str = "PreviousUploadLog.txt";

/// Accumulator for one publish run.
///
/// Holds the ordered log lines and the run-wide failure flag. The final
/// status is derived solely from whether the flag was ever set, not from a
/// count.
pub struct RunContext {
    run_id: Uuid,
    started_at: DateTime<Utc>,
    log_path: PathBuf,
    lines: Vec<String>,
    hit_errors: bool,
}

impl RunContext {
    pub fn new<P: AsRef<Path>>(log_path: P) -> Self {
        let mut ctx = Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            log_path: log_path.as_ref().to_path_buf(),
            lines: Vec::new(),
            hit_errors: false,
        };
        ctx.info(format!(
            "Upload run {} started at {}",
            ctx.run_id,
            ctx.started_at.to_rfc3339()
        ));
        ctx
    }

    /// Plain progress line
    pub fn info(&mut self, message: impl AsRef<str>) {
        self.push(message.as_ref().to_string());
    }

    /// Success line; does not touch the failure flag
    pub fn success(&mut self, message: impl AsRef<str>) {
        self.push(format!("✅ {}", message.as_ref()));
    }

    /// Notable but non-failing condition (e.g. conflict fallback, skipped phase)
    pub fn warn(&mut self, message: impl AsRef<str>) {
        self.push(format!("⚠️  {}", message.as_ref()));
    }

    /// Local failure (missing file, parse error). Sets the run failure flag.
    pub fn local_failure(&mut self, message: impl AsRef<str>) {
        self.hit_errors = true;
        self.push(format!("❌ {}", message.as_ref()));
    }

    /// Structured backend failure. Sets the run failure flag and records the
    /// full `[code] -- message: field: issue, ...` line.
    pub fn remote_failure(&mut self, context: &str, error: &RemoteError) {
        self.hit_errors = true;
        self.push(format!("❌ An error occurred during: {}", context));
        self.push(format!("   {}", error));
    }

    pub fn hit_errors(&self) -> bool {
        self.hit_errors
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Append the final status line and flush everything to the log file.
    ///
    /// Returns `true` when the run finished without any failure.
    pub async fn finish(mut self) -> Result<bool, std::io::Error> {
        let status = if self.hit_errors {
            format!(
                "content-publisher ended with errors. See {} for details",
                self.log_path.display()
            )
        } else {
            "content-publisher ended successfully!".to_string()
        };
        let marker = if self.hit_errors { "❌" } else { "✅" };
        self.push(format!("{} {}", marker, status));

        fs::write(&self.log_path, self.lines.join("\n") + "\n").await?;

        Ok(!self.hit_errors)
    }

    fn push(&mut self, line: String) {
        println!("{}", line);
        self.lines.push(line);
    }
}
