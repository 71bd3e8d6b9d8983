use std::fmt::{Display, Formatter};
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Scheduling policy of the [`ActionEngine`](super::ActionEngine).
#[derive(Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ProcessingOrder {
  /// One action at a time, in list order.
  #[default]
  Sequential,
  /// Concurrently, in no particular order.
  Parallel,
}
impl ProcessingOrder {
  pub const fn as_str(&self) -> &'static str {
    match self {
      ProcessingOrder::Sequential => "sequential",
      ProcessingOrder::Parallel => "parallel",
    }
  }
}
impl Display for ProcessingOrder {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[error("unknown processing order '{0}'; expected 'sequential' or 'parallel'")]
pub struct ParseProcessingOrderError(pub String);

impl FromStr for ProcessingOrder {
  type Err = ParseProcessingOrderError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("sequential") {
      Ok(ProcessingOrder::Sequential)
    } else if s.eq_ignore_ascii_case("parallel") {
      Ok(ProcessingOrder::Parallel)
    } else {
      Err(ParseProcessingOrderError(s.to_string()))
    }
  }
}


/// Environment variable that overrides [`EngineConfig::max_concurrency`].
pub const MAX_CONCURRENCY_VAR: &str = "DUO_MAX_CONCURRENCY";
/// Environment variable that overrides [`EngineConfig::default_order`].
pub const PROCESSING_ORDER_VAR: &str = "DUO_PROCESSING_ORDER";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("invalid value '{value}' for '{key}'; expected a positive integer")]
  InvalidMaxConcurrency { key: &'static str, value: String },
  #[error("invalid value for '{key}'")]
  InvalidProcessingOrder { key: &'static str, #[source] source: ParseProcessingOrderError },
}

/// Configuration of an [`ActionEngine`](super::ActionEngine).
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct EngineConfig {
  /// Maximum number of actions in flight during a parallel run.
  pub max_concurrency: NonZeroUsize,
  /// Order used when a caller does not choose one.
  pub default_order: ProcessingOrder,
}
impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      max_concurrency: available_parallelism(),
      default_order: ProcessingOrder::default(),
    }
  }
}
impl EngineConfig {
  /// Creates a configuration from the process environment, falling back to [defaults](Self::default) for unset
  /// variables. Load a `.env` file beforehand to have its variables take part.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Creates a configuration from variables returned by `lookup`, falling back to [defaults](Self::default) for
  /// variables it does not return.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    let mut config = Self::default();
    if let Some(value) = lookup(MAX_CONCURRENCY_VAR) {
      config.max_concurrency = value.trim().parse()
        .map_err(|_| ConfigError::InvalidMaxConcurrency { key: MAX_CONCURRENCY_VAR, value })?;
    }
    if let Some(value) = lookup(PROCESSING_ORDER_VAR) {
      config.default_order = value.parse()
        .map_err(|source| ConfigError::InvalidProcessingOrder { key: PROCESSING_ORDER_VAR, source })?;
    }
    Ok(config)
  }

  #[inline]
  pub fn with_max_concurrency(mut self, max_concurrency: NonZeroUsize) -> Self {
    self.max_concurrency = max_concurrency;
    self
  }
  #[inline]
  pub fn with_default_order(mut self, default_order: ProcessingOrder) -> Self {
    self.default_order = default_order;
    self
  }
}

/// Number of available processing units, or one if that cannot be determined.
pub fn available_parallelism() -> NonZeroUsize {
  std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}
