use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;

// Public API

/// Result of running a single action. Errors propagate out of the engine to its caller.
pub type ActionResult<E> = Result<(), E>;

/// Effectful operation that consumes an input of type `I`.
///
/// Implemented for every `FnOnce(I) -> impl Future<Output=ActionResult<E>>` closure. Actions that do not need the
/// input take `()` or ignore their argument; synchronous actions are added with [`Actions::with_sync`]. Closures are
/// best added with [`Actions::with`], which lets the compiler infer their argument type.
pub trait Action<I, E>: Send + 'static {
  fn run(self, input: I) -> impl Future<Output=ActionResult<E>> + Send;
}
impl<I, E, F, Fut> Action<I, E> for F where
  F: FnOnce(I) -> Fut + Send + 'static,
  Fut: Future<Output=ActionResult<E>> + Send,
{
  #[inline]
  fn run(self, input: I) -> impl Future<Output=ActionResult<E>> + Send { self(input) }
}

/// Ordered sequence of actions that all take an input of type `I` and fail with an error of type `E`.
pub struct Actions<I, E> {
  actions: Vec<Box<dyn ActionDyn<I, E>>>,
}
impl<I: Send + 'static, E: Send + 'static> Actions<I, E> {
  #[inline]
  pub fn new() -> Self { Self::default() }

  #[inline]
  pub fn with<Fut>(mut self, action: impl FnOnce(I) -> Fut + Send + 'static) -> Self where
    Fut: Future<Output=ActionResult<E>> + Send + 'static
  {
    self.push(action);
    self
  }
  #[inline]
  pub fn push<Fut>(&mut self, action: impl FnOnce(I) -> Fut + Send + 'static) -> &mut Self where
    Fut: Future<Output=ActionResult<E>> + Send + 'static
  {
    self.push_action(action)
  }

  #[inline]
  pub fn with_action(mut self, action: impl Action<I, E>) -> Self {
    self.push_action(action);
    self
  }
  #[inline]
  pub fn push_action(&mut self, action: impl Action<I, E>) -> &mut Self {
    self.actions.push(Box::new(action));
    self
  }

  /// Adds a synchronous action. It runs wherever the engine runs asynchronous actions, see
  /// [`ActionEngine`](super::ActionEngine).
  #[inline]
  pub fn with_sync(mut self, action: impl FnOnce(I) -> ActionResult<E> + Send + 'static) -> Self {
    self.push_sync(action);
    self
  }
  #[inline]
  pub fn push_sync(&mut self, action: impl FnOnce(I) -> ActionResult<E> + Send + 'static) -> &mut Self {
    self.actions.push(Box::new(SyncAction(action)));
    self
  }
}
impl<I, E> Actions<I, E> {
  #[inline]
  pub fn len(&self) -> usize { self.actions.len() }
  #[inline]
  pub fn is_empty(&self) -> bool { self.actions.is_empty() }

  #[inline]
  pub(crate) fn into_dyn_iter(self) -> impl ExactSizeIterator<Item=Box<dyn ActionDyn<I, E>>> {
    self.actions.into_iter()
  }
}
impl<I, E> Default for Actions<I, E> {
  #[inline]
  fn default() -> Self { Self { actions: Vec::new() } }
}
impl<I: Send + 'static, E: Send + 'static, A: Action<I, E>> FromIterator<A> for Actions<I, E> {
  fn from_iter<T: IntoIterator<Item=A>>(iter: T) -> Self {
    let mut actions = Self::new();
    for action in iter {
      actions.push_action(action);
    }
    actions
  }
}
impl<I, E> std::fmt::Debug for Actions<I, E> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Actions").field("len", &self.actions.len()).finish()
  }
}

/// Creates [`Actions`] from a comma-separated list of actions, in order.
#[macro_export]
macro_rules! actions {
  () => { $crate::engine::Actions::new() };
  ($($action:expr),+ $(,)?) => {
    $crate::engine::Actions::new()$(.with($action))+
  };
}


// Internals

pub(crate) trait ActionDyn<I, E>: Send {
  fn run_boxed(self: Box<Self>, input: I) -> BoxFuture<'static, ActionResult<E>>;
}
impl<I: 'static, E: 'static, A: Action<I, E>> ActionDyn<I, E> for A {
  #[inline]
  fn run_boxed(self: Box<Self>, input: I) -> BoxFuture<'static, ActionResult<E>> {
    (*self).run(input).boxed()
  }
}

struct SyncAction<F>(F);
impl<I, E, F> Action<I, E> for SyncAction<F> where
  I: Send + 'static,
  F: FnOnce(I) -> ActionResult<E> + Send + 'static,
{
  #[inline]
  fn run(self, input: I) -> impl Future<Output=ActionResult<E>> + Send {
    async move { (self.0)(input) }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builders_keep_insertion_order() {
    let actions: Actions<u32, ()> = Actions::new()
      .with(|_| async { Ok(()) })
      .with_sync(|_| Ok(()));
    assert_eq!(actions.len(), 2);
    assert!(!actions.is_empty());

    let empty: Actions<u32, ()> = crate::actions![];
    assert!(empty.is_empty());
  }

  #[test]
  fn collects_homogeneous_actions() {
    let actions: Actions<(), ()> = (0..4).map(|_| |_: ()| async { Ok::<_, ()>(()) }).collect();
    assert_eq!(actions.len(), 4);
  }
}
