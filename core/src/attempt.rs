//! Boundary where uncontrolled faults enter the domain model.
//!
//! Code run through [`attempt`] and friends cannot fault past the call: a panic, or an error returned by the
//! fallible variants, becomes the [failure](Outcome::Failure) of an [`Attempt`]. Everywhere else in this crate,
//! panics raised inside caller-supplied functions propagate.

use std::any::Any;
use std::error::Error;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;
use tracing::debug;

use crate::outcome::Outcome;

/// Fault captured at the [`attempt`] boundary.
#[derive(Debug, thiserror::Error)]
pub enum Fault {
  #[error("panicked: {0}")]
  Panic(String),
  #[error(transparent)]
  Error(Box<dyn Error + Send + Sync + 'static>),
}
impl Fault {
  /// Creates a fault from the payload of a caught panic.
  pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
    let message = match payload.downcast::<String>() {
      Ok(message) => *message,
      Err(payload) => match payload.downcast::<&'static str>() {
        Ok(message) => message.to_string(),
        Err(_) => "panic with a non-string payload".to_string(),
      },
    };
    Self::Panic(message)
  }

  #[inline]
  pub fn is_panic(&self) -> bool { matches!(self, Self::Panic(_)) }

  /// Message of the panic, if this fault is a panic.
  #[inline]
  pub fn panic_message(&self) -> Option<&str> {
    match self {
      Self::Panic(message) => Some(message.as_str()),
      Self::Error(_) => None,
    }
  }

  /// Error that was returned, if this fault is an error.
  #[inline]
  pub fn error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
    match self {
      Self::Panic(_) => None,
      Self::Error(error) => Some(error.as_ref()),
    }
  }
}

/// Outcome whose failure is a [`Fault`].
pub type Attempt<T> = Outcome<T, Fault>;

/// Runs `f`, lifting a panic into a [`Fault::Panic`] failure.
pub fn attempt<T>(f: impl FnOnce() -> T) -> Attempt<T> {
  match panic::catch_unwind(AssertUnwindSafe(f)) {
    Ok(value) => Outcome::Success(value),
    Err(payload) => lift_panic(payload),
  }
}

/// Runs `f`, lifting a panic into a [`Fault::Panic`] failure and a returned error into a [`Fault::Error`] failure.
pub fn attempt_fallible<T, E>(f: impl FnOnce() -> Result<T, E>) -> Attempt<T> where
  E: Into<Box<dyn Error + Send + Sync + 'static>>
{
  attempt(f).bind(lift_result)
}

/// Awaits `future`, lifting a panic into a [`Fault::Panic`] failure.
pub async fn attempt_async<T>(future: impl Future<Output=T>) -> Attempt<T> {
  match AssertUnwindSafe(future).catch_unwind().await {
    Ok(value) => Outcome::Success(value),
    Err(payload) => lift_panic(payload),
  }
}

/// Awaits `future`, lifting a panic into a [`Fault::Panic`] failure and a returned error into a [`Fault::Error`]
/// failure.
pub async fn attempt_fallible_async<T, E>(future: impl Future<Output=Result<T, E>>) -> Attempt<T> where
  E: Into<Box<dyn Error + Send + Sync + 'static>>
{
  attempt_async(future).await.bind(lift_result)
}


fn lift_panic<T>(payload: Box<dyn Any + Send>) -> Attempt<T> {
  let fault = Fault::from_panic(payload);
  debug!(%fault, "caught panic at attempt boundary");
  Outcome::Failure(fault)
}

fn lift_result<T, E>(result: Result<T, E>) -> Attempt<T> where
  E: Into<Box<dyn Error + Send + Sync + 'static>>
{
  match result {
    Ok(value) => Outcome::Success(value),
    Err(error) => {
      let fault = Fault::Error(error.into());
      debug!(%fault, "caught error at attempt boundary");
      Outcome::Failure(fault)
    }
  }
}
