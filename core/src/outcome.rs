use crate::union::Union;
use crate::variants::{InvalidUnwrap, Variants};

/// Result value: either [`Success`](Outcome::Success) with a value, or [`Failure`](Outcome::Failure) with
/// diagnostic information.
///
/// Matching, effects, taps, and reductions come from the [`Variants`] protocol, with `Success` as the first variant
/// and `Failure` as the second. Converts to and from [`Result`].
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use = "this `Outcome` may be a `Failure`, which should be handled"]
pub enum Outcome<T, E> {
  Success(T),
  Failure(E),
}

impl<T, E> Outcome<T, E> {
  #[inline]
  pub const fn success(value: T) -> Self { Self::Success(value) }
  #[inline]
  pub const fn failure(error: E) -> Self { Self::Failure(error) }

  #[inline]
  pub const fn is_success(&self) -> bool { matches!(self, Self::Success(_)) }
  #[inline]
  pub const fn is_failure(&self) -> bool { matches!(self, Self::Failure(_)) }

  #[inline]
  pub const fn as_ref(&self) -> Outcome<&T, &E> {
    match self {
      Self::Success(value) => Outcome::Success(value),
      Self::Failure(error) => Outcome::Failure(error),
    }
  }


  /// Transforms the success value with `f`; a failure passes through unchanged.
  #[inline]
  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U, E> {
    self.match_with(|value| Outcome::Success(f(value)), Outcome::Failure)
  }

  /// Transforms the failure value with `f`; a success passes through unchanged.
  #[inline]
  pub fn map_error<F>(self, f: impl FnOnce(E) -> F) -> Outcome<T, F> {
    self.match_with(Outcome::Success, |error| Outcome::Failure(f(error)))
  }

  /// Chains a computation that depends on the success value. A failure short-circuits without calling `f`, and its
  /// error is kept as is.
  #[inline]
  pub fn bind<U>(self, f: impl FnOnce(T) -> Outcome<U, E>) -> Outcome<U, E> {
    self.match_with(f, Outcome::Failure)
  }

  /// Combines `outcomes` without short-circuiting: every element is classified first. Returns the success values in
  /// order if every element succeeded (including when there are no elements), or else every failure value in order.
  pub fn bind_all(outcomes: impl IntoIterator<Item=Self>) -> Outcome<Vec<T>, Vec<E>> {
    let mut successes = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
      match outcome {
        Self::Success(value) => successes.push(value),
        Self::Failure(error) => failures.push(error),
      }
    }
    if failures.is_empty() {
      Outcome::Success(successes)
    } else {
      Outcome::Failure(failures)
    }
  }


  /// Returns the success value.
  ///
  /// # Panics
  ///
  /// Panics with an [`InvalidUnwrap`] message on a failure. Check with [`is_success`](Self::is_success) first, or
  /// use [`try_unwrap`](Self::try_unwrap).
  #[inline]
  #[track_caller]
  pub fn unwrap(self) -> T {
    match self.try_unwrap() {
      Ok(value) => value,
      Err(invalid) => panic!("{}", invalid),
    }
  }
  /// Returns the failure value.
  ///
  /// # Panics
  ///
  /// Panics with an [`InvalidUnwrap`] message on a success. Check with [`is_failure`](Self::is_failure) first, or
  /// use [`try_unwrap_error`](Self::try_unwrap_error).
  #[inline]
  #[track_caller]
  pub fn unwrap_error(self) -> E {
    match self.try_unwrap_error() {
      Ok(error) => error,
      Err(invalid) => panic!("{}", invalid),
    }
  }
  #[inline]
  pub fn try_unwrap(self) -> Result<T, InvalidUnwrap> { self.try_first() }
  #[inline]
  pub fn try_unwrap_error(self) -> Result<E, InvalidUnwrap> { self.try_second() }

  #[inline]
  pub fn into_result(self) -> Result<T, E> {
    self.match_with(Ok, Err)
  }
}

impl<T, E> Variants for Outcome<T, E> {
  type First = T;
  type Second = E;

  const FIRST_NAME: &'static str = "success";
  const SECOND_NAME: &'static str = "failure";

  #[inline]
  fn into_union(self) -> Union<T, E> {
    match self {
      Self::Success(value) => Union::First(value),
      Self::Failure(error) => Union::Second(error),
    }
  }
  #[inline]
  fn as_union(&self) -> Union<&T, &E> {
    match self {
      Self::Success(value) => Union::First(value),
      Self::Failure(error) => Union::Second(error),
    }
  }
  #[inline]
  fn from_union(union: Union<T, E>) -> Self {
    union.match_with(Self::Success, Self::Failure)
  }
}

impl<T, E> FromIterator<Outcome<T, E>> for Outcome<Vec<T>, Vec<E>> {
  /// Collects with [`Outcome::bind_all`].
  #[inline]
  fn from_iter<I: IntoIterator<Item=Outcome<T, E>>>(iter: I) -> Self { Outcome::bind_all(iter) }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
  #[inline]
  fn from(result: Result<T, E>) -> Self {
    match result {
      Ok(value) => Self::Success(value),
      Err(error) => Self::Failure(error),
    }
  }
}
impl<T, E> From<Outcome<T, E>> for Result<T, E> {
  #[inline]
  fn from(outcome: Outcome<T, E>) -> Self { outcome.into_result() }
}
