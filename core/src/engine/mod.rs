//! Runs batches of effectful [actions](Action) against a shared input, either one at a time in list order or
//! concurrently, with cooperative [cancellation](CancellationSignal).
//!
//! Threading: a [sequential](ActionEngine::run_sequential) run executes every action inline on the calling task,
//! whether the action is synchronous or asynchronous. A [parallel](ActionEngine::run_parallel) run spawns every
//! action as a task onto the current tokio runtime, and therefore must be called from within a tokio runtime.

use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, trace, warn};

pub use action::{Action, ActionResult, Actions};
pub use cancellation::CancellationSignal;
pub use config::{available_parallelism, ConfigError, EngineConfig, MAX_CONCURRENCY_VAR, ParseProcessingOrderError, PROCESSING_ORDER_VAR, ProcessingOrder};

use crate::unit::Unit;

mod action;
mod cancellation;
mod config;

/// Executes [`Actions`]. Holds no state besides its configuration; every run is independent.
#[derive(Default, Clone, Copy, Eq, PartialEq, Debug)]
pub struct ActionEngine {
  config: EngineConfig,
}
impl ActionEngine {
  #[inline]
  pub fn new(config: EngineConfig) -> Self { Self { config } }

  /// Creates an engine configured from the process environment, see [`EngineConfig::from_env`].
  #[inline]
  pub fn from_env() -> Result<Self, ConfigError> { Ok(Self::new(EngineConfig::from_env()?)) }

  #[inline]
  pub fn config(&self) -> &EngineConfig { &self.config }
  #[inline]
  pub fn max_concurrency(&self) -> NonZeroUsize { self.config.max_concurrency }
  #[inline]
  pub fn default_order(&self) -> ProcessingOrder { self.config.default_order }


  /// Runs `actions` with the algorithm selected by `order`.
  pub async fn run<I, E>(
    &self,
    order: ProcessingOrder,
    input: I,
    actions: Actions<I, E>,
    cancellation: Option<&CancellationSignal>,
  ) -> Result<Unit, E> where
    I: Clone + Send + 'static,
    E: Send + 'static,
  {
    match order {
      ProcessingOrder::Sequential => self.run_sequential(input, actions, cancellation).await,
      ProcessingOrder::Parallel => self.run_parallel(input, actions, cancellation).await,
    }
  }

  /// Runs `actions` with the algorithm selected by the [default order](Self::default_order).
  #[inline]
  pub async fn run_default<I, E>(
    &self,
    input: I,
    actions: Actions<I, E>,
    cancellation: Option<&CancellationSignal>,
  ) -> Result<Unit, E> where
    I: Clone + Send + 'static,
    E: Send + 'static,
  {
    self.run(self.default_order(), input, actions, cancellation).await
  }

  /// Runs `actions` one at a time in list order, each receiving a clone of `input`. Action *i* completes before
  /// action *i + 1* starts.
  ///
  /// `cancellation` is checked before each action; once set, the remaining actions are skipped and `Ok(Unit)` is
  /// returned. Effects of actions that already ran are kept. The first error returned by an action is returned
  /// immediately, skipping the remaining actions; panics are not caught.
  pub async fn run_sequential<I, E>(
    &self,
    input: I,
    actions: Actions<I, E>,
    cancellation: Option<&CancellationSignal>,
  ) -> Result<Unit, E> where
    I: Clone,
  {
    let total = actions.len();
    for (index, action) in actions.into_dyn_iter().enumerate() {
      if cancellation.is_some_and(CancellationSignal::is_cancelled) {
        debug!(completed = index, total, "sequential run was cancelled; skipping remaining actions");
        return Ok(Unit);
      }
      trace!(index, total, "running action");
      action.run_boxed(input.clone()).await?;
    }
    Ok(Unit)
  }

  /// Runs `actions` concurrently, each receiving a clone of `input`, with at most
  /// [`max_concurrency`](Self::max_concurrency) actions in flight, capped at [`Semaphore::MAX_PERMITS`]. No ordering is
  /// guaranteed.
  ///
  /// `cancellation` is checked once per action chosen for dispatch and while waiting for actions to complete. Once
  /// set, no more actions are dispatched, the engine stops waiting, and `Ok(Unit)` is returned. Actions that were
  /// already dispatched are detached and may still run to completion.
  ///
  /// The first error returned by an action is returned; actions still in flight at that point are aborted. A panic in
  /// an action is resumed on the caller. An action task cancelled by the runtime itself, which only happens while the
  /// runtime shuts down, is logged as a warning and counted as completed.
  ///
  /// # Panics
  ///
  /// Panics when called outside of a tokio runtime and `actions` is not empty.
  pub async fn run_parallel<I, E>(
    &self,
    input: I,
    actions: Actions<I, E>,
    cancellation: Option<&CancellationSignal>,
  ) -> Result<Unit, E> where
    I: Clone + Send + 'static,
    E: Send + 'static,
  {
    let total = actions.len();
    let permits = self.max_concurrency().get().min(Semaphore::MAX_PERMITS);
    let limit = Arc::new(Semaphore::new(permits));
    let mut running = JoinSet::new();
    let mut dispatched = 0;

    for action in actions.into_dyn_iter() {
      let permit = loop {
        tokio::select! {
          biased;
          _ = Self::cancelled(cancellation) => {
            Self::detach_on_cancel(running, dispatched, total);
            return Ok(Unit);
          }
          Some(joined) = running.join_next(), if !running.is_empty() => Self::handle_joined(joined)?,
          permit = limit.clone().acquire_owned() => match permit {
            Ok(permit) => break permit,
            Err(_) => unreachable!("semaphore of a parallel run is never closed"),
          },
        }
      };
      let input = input.clone();
      running.spawn(async move {
        let result = action.run_boxed(input).await;
        drop(permit);
        result
      });
      dispatched += 1;
      trace!(dispatched, total, "dispatched action");
    }

    loop {
      tokio::select! {
        biased;
        _ = Self::cancelled(cancellation) => {
          Self::detach_on_cancel(running, dispatched, total);
          return Ok(Unit);
        }
        joined = running.join_next() => match joined {
          Some(joined) => Self::handle_joined(joined)?,
          None => break,
        },
      }
    }
    Ok(Unit)
  }


  async fn cancelled(cancellation: Option<&CancellationSignal>) {
    match cancellation {
      Some(cancellation) => cancellation.cancelled().await,
      None => std::future::pending().await,
    }
  }

  fn handle_joined<E>(joined: Result<ActionResult<E>, JoinError>) -> ActionResult<E> {
    match joined {
      Ok(result) => result,
      Err(join_error) => match join_error.try_into_panic() {
        Ok(panic) => std::panic::resume_unwind(panic),
        Err(join_error) => {
          warn!(%join_error, "an action task was cancelled by the runtime");
          Ok(())
        }
      },
    }
  }

  fn detach_on_cancel<E: 'static>(mut running: JoinSet<ActionResult<E>>, dispatched: usize, total: usize) {
    debug!(dispatched, in_flight = running.len(), total, "parallel run was cancelled; no longer waiting for in-flight actions");
    running.detach_all();
  }
}
