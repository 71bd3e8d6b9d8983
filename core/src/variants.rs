use std::future::Future;

use crate::engine::{ActionEngine, Actions, CancellationSignal, ProcessingOrder};
use crate::union::Union;
use crate::unit::Unit;

/// Shared combinator protocol of two-variant types.
///
/// Implementors only describe how they convert to and from a [`Union`]; matching, effects, taps, reductions,
/// variant predicates, unsafe extraction, and action-batch taps are all expressed once here in terms of that union.
/// The [first](Self::First) variant is the one that carries the "main" value: the present value of a
/// [`Maybe`](crate::maybe::Maybe) or the success value of an [`Outcome`](crate::outcome::Outcome).
pub trait Variants: Sized {
  type First;
  type Second;

  /// Name of the first variant, used in [`InvalidUnwrap`] faults.
  const FIRST_NAME: &'static str;
  /// Name of the second variant, used in [`InvalidUnwrap`] faults.
  const SECOND_NAME: &'static str;

  fn into_union(self) -> Union<Self::First, Self::Second>;
  fn as_union(&self) -> Union<&Self::First, &Self::Second>;
  fn from_union(union: Union<Self::First, Self::Second>) -> Self;

  /// Converts into another two-variant type with the same payloads, keeping the active variant. For example, a
  /// `Maybe<T>` converts into an `Outcome<T, Unit>`, and any implementor converts into a plain [`Union`].
  #[inline]
  fn convert<V>(self) -> V where
    V: Variants<First=Self::First, Second=Self::Second>
  {
    V::from_union(self.into_union())
  }

  /// Canonical extraction point: runs `on_first` or `on_second`, whichever matches the active variant, and returns
  /// its result.
  #[inline]
  fn match_with<R>(self, on_first: impl FnOnce(Self::First) -> R, on_second: impl FnOnce(Self::Second) -> R) -> R {
    self.into_union().match_with(on_first, on_second)
  }

  /// Runs the side effect belonging to the active variant.
  #[inline]
  fn effect(&self, on_first: impl FnOnce(&Self::First), on_second: impl FnOnce(&Self::Second)) -> Unit {
    self.as_union().effect(on_first, on_second)
  }

  /// Runs the side effect belonging to the active variant, then returns `self` unchanged.
  #[inline]
  fn tap(self, on_first: impl FnOnce(&Self::First), on_second: impl FnOnce(&Self::Second)) -> Self {
    self.effect(on_first, on_second);
    self
  }


  /// Returns the first payload, or `alternative`.
  #[inline]
  fn reduce(self, alternative: Self::First) -> Self::First {
    self.reduce_from(|_| alternative)
  }
  /// Returns the first payload, or the result of `alternative`, which is only called when needed.
  #[inline]
  fn reduce_with(self, alternative: impl FnOnce() -> Self::First) -> Self::First {
    self.reduce_from(|_| alternative())
  }
  /// Returns the first payload, or an alternative derived from the second payload.
  #[inline]
  fn reduce_from(self, alternative: impl FnOnce(Self::Second) -> Self::First) -> Self::First {
    self.match_with(|first| first, alternative)
  }


  #[inline]
  fn is_first(&self) -> bool { self.as_union().is_first() }
  #[inline]
  fn is_second(&self) -> bool { self.as_union().is_second() }

  /// Returns the first payload, or an [`InvalidUnwrap`] fault if the second variant is active.
  #[inline]
  fn try_first(self) -> Result<Self::First, InvalidUnwrap> {
    self.match_with(Ok, |_| Err(InvalidUnwrap::new(Self::FIRST_NAME, Self::SECOND_NAME)))
  }
  /// Returns the second payload, or an [`InvalidUnwrap`] fault if the first variant is active.
  #[inline]
  fn try_second(self) -> Result<Self::Second, InvalidUnwrap> {
    self.match_with(|_| Err(InvalidUnwrap::new(Self::SECOND_NAME, Self::FIRST_NAME)), Ok)
  }


  /// Hands the active payload to the matching batch of actions and runs that batch on `engine` in `order`. The batch
  /// of the inactive variant is dropped without running.
  fn effect_actions<'a, E>(
    self,
    engine: &'a ActionEngine,
    order: ProcessingOrder,
    on_first: Actions<Self::First, E>,
    on_second: Actions<Self::Second, E>,
    cancellation: Option<&'a CancellationSignal>,
  ) -> impl Future<Output=Result<Unit, E>> + Send + 'a where
    Self: Send + 'a,
    Self::First: Clone + Send + 'static,
    Self::Second: Clone + Send + 'static,
    E: Send + 'static,
  {
    async move {
      match self.into_union() {
        Union::First(first) => engine.run(order, first, on_first, cancellation).await,
        Union::Second(second) => engine.run(order, second, on_second, cancellation).await,
      }
    }
  }

  /// Like [`effect_actions`](Self::effect_actions), but returns `self` unchanged when the batch completes. The
  /// actions receive clones of the active payload.
  fn tap_actions<'a, E>(
    self,
    engine: &'a ActionEngine,
    order: ProcessingOrder,
    on_first: Actions<Self::First, E>,
    on_second: Actions<Self::Second, E>,
    cancellation: Option<&'a CancellationSignal>,
  ) -> impl Future<Output=Result<Self, E>> + Send + 'a where
    Self: Send + 'a,
    Self::First: Clone + Send + 'static,
    Self::Second: Clone + Send + 'static,
    E: Send + 'static,
  {
    async move {
      let payload = self.as_union().cloned();
      payload.effect_actions(engine, order, on_first, on_second, cancellation).await?;
      Ok(self)
    }
  }
}

impl<A, B> Variants for Union<A, B> {
  type First = A;
  type Second = B;

  const FIRST_NAME: &'static str = "first";
  const SECOND_NAME: &'static str = "second";

  #[inline]
  fn into_union(self) -> Union<A, B> { self }
  #[inline]
  fn as_union(&self) -> Union<&A, &B> { self.as_ref() }
  #[inline]
  fn from_union(union: Union<A, B>) -> Self { union }
}


/// Programmer-error fault: a payload was extracted from a variant that is not active.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("invalid unwrap: expected the '{expected}' variant, but the '{found}' variant is active")]
pub struct InvalidUnwrap {
  pub expected: &'static str,
  pub found: &'static str,
}
impl InvalidUnwrap {
  #[inline]
  pub const fn new(expected: &'static str, found: &'static str) -> Self { Self { expected, found } }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reduce_family_on_union() {
    assert_eq!(Union::<i32, &str>::first(1).reduce(5), 1);
    assert_eq!(Union::<i32, &str>::second("x").reduce(5), 5);
    assert_eq!(Union::<i32, &str>::second("abc").reduce_from(|s| s.len() as i32), 3);

    let mut called = false;
    let value = Union::<i32, &str>::first(1).reduce_with(|| {
      called = true;
      0
    });
    assert_eq!(value, 1);
    assert!(!called);
  }

  #[test]
  fn tap_returns_value_unchanged() {
    let mut seen = None;
    let value = Union::<i32, &str>::first(7).tap(|a| seen = Some(*a), |_| unreachable!());
    assert_eq!(value, Union::First(7));
    assert_eq!(seen, Some(7));
  }

  #[test]
  fn convert_keeps_the_active_variant() {
    use crate::maybe::Maybe;
    use crate::outcome::Outcome;

    assert_eq!(Maybe::some(1).convert::<Outcome<i32, Unit>>(), Outcome::Success(1));
    assert_eq!(Maybe::<i32>::none().convert::<Outcome<i32, Unit>>(), Outcome::Failure(Unit));
    assert_eq!(Outcome::<i32, Unit>::failure(Unit).convert::<Maybe<i32>>(), Maybe::Absent);

    let union: Union<i32, &str> = Outcome::<i32, &str>::failure("e").convert();
    assert_eq!(union, Union::Second("e"));
    assert_eq!(union.convert::<Outcome<i32, &str>>(), Outcome::Failure("e"));
  }

  #[test]
  fn try_extraction_reports_variant_names() {
    assert_eq!(Union::<i32, &str>::first(1).try_first(), Ok(1));
    assert_eq!(
      Union::<i32, &str>::first(1).try_second(),
      Err(InvalidUnwrap { expected: "second", found: "first" })
    );
    let message = InvalidUnwrap::new("success", "failure").to_string();
    assert_eq!(message, "invalid unwrap: expected the 'success' variant, but the 'failure' variant is active");
  }
}
