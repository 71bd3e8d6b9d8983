use std::io;

use tracing_subscriber::{EnvFilter, Layer};
use tracing_subscriber::fmt::TestWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable with the filter directives for console output.
pub const CONSOLE_LOG_VAR: &str = "CONSOLE_LOG";
/// Environment variable with the filter directives for log file output.
#[cfg(feature = "app_tracing_file")]
pub const FILE_LOG_VAR: &str = "FILE_LOG";

#[derive(Default)]
pub struct AppTracingBuilder {
  console_filter: Option<EnvFilter>,
  console_test_writer: bool,
  #[cfg(feature = "app_tracing_file")]
  log_file_path: Option<std::path::PathBuf>,
  #[cfg(feature = "app_tracing_file")]
  file_filter: Option<EnvFilter>,
}
impl AppTracingBuilder {
  pub fn with_console_filter(mut self, console_filter: EnvFilter) -> Self {
    self.console_filter = Some(console_filter);
    self
  }
  /// Writes console output through the test harness' captured output instead of stderr.
  pub fn with_test_writer(mut self) -> Self {
    self.console_test_writer = true;
    self
  }

  #[cfg(feature = "app_tracing_file")]
  pub fn with_log_file_path(mut self, log_file_path: impl Into<std::path::PathBuf>) -> Self {
    self.log_file_path = Some(log_file_path.into());
    self
  }
  #[cfg(feature = "app_tracing_file")]
  pub fn with_log_file_path_opt(mut self, log_file_path: Option<impl Into<std::path::PathBuf>>) -> Self {
    self.log_file_path = log_file_path.map(|p| p.into());
    self
  }
  #[cfg(feature = "app_tracing_file")]
  pub fn with_file_filter(mut self, file_filter: EnvFilter) -> Self {
    self.file_filter = Some(file_filter);
    self
  }

  /// Installs the global subscriber. When a global subscriber is already installed, nothing is installed and
  /// [`AppTracing::is_installed`] returns `false`.
  pub fn build(self) -> AppTracing {
    let console_filter = self.console_filter.unwrap_or_else(|| filter_from_env(CONSOLE_LOG_VAR));
    let console_writer = if self.console_test_writer {
      BoxMakeWriter::new(TestWriter::new())
    } else {
      BoxMakeWriter::new(io::stderr)
    };
    let layered = tracing_subscriber::registry().with(
      tracing_subscriber::fmt::layer()
        .with_writer(console_writer)
        .with_filter(console_filter)
    );

    #[cfg(feature = "app_tracing_file")]
    if let Some(file_path) = self.log_file_path {
      let file_filter = self.file_filter.unwrap_or_else(|| filter_from_env(FILE_LOG_VAR));
      return match create_log_file(&file_path) {
        Err(e) => {
          let installed = layered.try_init().is_ok();
          tracing::warn!("Cannot log to file; could not truncate/create and open log file '{}' for writing: {}", file_path.display(), e);
          AppTracing { installed, _file_tracing: FileTracing::default() }
        }
        Ok(log_file) => {
          let (non_blocking, guard) = tracing_appender::non_blocking(io::BufWriter::new(log_file));
          let installed = layered.with(
            tracing_subscriber::fmt::layer()
              .with_writer(non_blocking)
              .with_ansi(false)
              .with_filter(file_filter)
          ).try_init().is_ok();
          AppTracing { installed, _file_tracing: FileTracing { _guard: Some(guard) } }
        }
      };
    }

    let installed = layered.try_init().is_ok();
    AppTracing { installed, _file_tracing: FileTracing::default() }
  }
}

/// Keeps file logging alive; dropping it flushes and stops the log file writer.
pub struct AppTracing {
  installed: bool,
  _file_tracing: FileTracing,
}
impl AppTracing {
  /// Whether [`AppTracingBuilder::build`] installed the global subscriber.
  #[inline]
  pub fn is_installed(&self) -> bool { self.installed }
}

#[cfg(feature = "app_tracing_file")]
#[derive(Default)]
struct FileTracing {
  _guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}
#[cfg(not(feature = "app_tracing_file"))]
#[derive(Default)]
struct FileTracing;

fn filter_from_env(var: &str) -> EnvFilter {
  EnvFilter::try_from_env(var).unwrap_or_default()
}

#[cfg(feature = "app_tracing_file")]
fn create_log_file(file_path: &std::path::Path) -> Result<std::fs::File, io::Error> {
  if let Some(parent) = file_path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::File::create(file_path)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_one_global_subscriber_is_installed() {
    let first = AppTracingBuilder::default()
      .with_console_filter(EnvFilter::new("debug"))
      .with_test_writer()
      .build();
    let second = AppTracingBuilder::default()
      .with_test_writer()
      .build();
    drop(first);
    assert!(!second.is_installed());
  }

  #[cfg(feature = "app_tracing_file")]
  #[test]
  fn log_file_is_created_with_its_directories() {
    let dir = std::env::temp_dir().join(format!("duo_core_tracing_test_{}", std::process::id()));
    let path = dir.join("logs").join("duo.log");
    let tracing = AppTracingBuilder::default()
      .with_test_writer()
      .with_log_file_path(&path)
      .with_file_filter(EnvFilter::new("trace"))
      .build();
    assert!(path.is_file());
    drop(tracing);
    std::fs::remove_dir_all(&dir).unwrap();
  }
}
