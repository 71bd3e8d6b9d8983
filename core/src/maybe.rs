use crate::union::Union;
use crate::unit::Unit;
use crate::variants::{InvalidUnwrap, Variants};

/// Optional value: either [`Present`](Maybe::Present) with a value, or [`Absent`](Maybe::Absent).
///
/// Absence is structural; there is no sentinel value inside `Present`. Transformations never mutate, they produce
/// a new `Maybe`. Matching, effects, taps, and reductions come from the [`Variants`] protocol, with `Present` as the
/// first variant and `Absent` (carrying [`Unit`]) as the second.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Maybe<T> {
  Present(T),
  Absent,
}

impl<T> Maybe<T> {
  /// Creates a present value.
  #[inline]
  pub const fn some(value: T) -> Self { Self::Present(value) }
  /// Creates an absent value.
  #[inline]
  pub const fn none() -> Self { Self::Absent }
  /// Lifts a nullable value: `None` becomes [`Absent`](Self::Absent), `Some(value)` becomes
  /// [`Present(value)`](Self::Present).
  #[inline]
  pub fn from_nullable(value: Option<T>) -> Self {
    match value {
      Some(value) => Self::Present(value),
      None => Self::Absent,
    }
  }

  #[inline]
  pub const fn is_present(&self) -> bool { matches!(self, Self::Present(_)) }
  #[inline]
  pub const fn is_absent(&self) -> bool { matches!(self, Self::Absent) }

  #[inline]
  pub const fn as_ref(&self) -> Maybe<&T> {
    match self {
      Self::Present(value) => Maybe::Present(value),
      Self::Absent => Maybe::Absent,
    }
  }


  /// Transforms the present value with `f`. `f` is never called on an absent value.
  ///
  /// The result is always present, even when `U` is itself an [`Option`]; use [`map_nullable`](Self::map_nullable)
  /// to turn a `None` result into [`Absent`](Self::Absent).
  #[inline]
  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Maybe<U> {
    self.match_with(|value| Maybe::Present(f(value)), |_| Maybe::Absent)
  }

  /// Transforms the present value with `f`, lifting its nullable result: when `f` returns `None` the result is
  /// [`Absent`](Self::Absent), never `Present(None)`.
  #[inline]
  pub fn map_nullable<U>(self, f: impl FnOnce(T) -> Option<U>) -> Maybe<U> {
    self.bind(|value| Maybe::from_nullable(f(value)))
  }

  /// Keeps the present value only if it satisfies `predicate`.
  #[inline]
  pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
    self.bind(|value| if predicate(&value) { Maybe::Present(value) } else { Maybe::Absent })
  }

  /// Replaces the present value with the result of `f`. An absent value short-circuits without calling `f`.
  #[inline]
  pub fn bind<U>(self, f: impl FnOnce(T) -> Maybe<U>) -> Maybe<U> {
    self.match_with(f, |_| Maybe::Absent)
  }


  /// Returns the present value.
  ///
  /// # Panics
  ///
  /// Panics with an [`InvalidUnwrap`] message when absent. Check with [`is_present`](Self::is_present) first, or use
  /// [`try_unwrap`](Self::try_unwrap).
  #[inline]
  #[track_caller]
  pub fn unwrap(self) -> T {
    match self.try_unwrap() {
      Ok(value) => value,
      Err(invalid) => panic!("{}", invalid),
    }
  }
  #[inline]
  pub fn try_unwrap(self) -> Result<T, InvalidUnwrap> { self.try_first() }

  /// Lowers into a nullable value.
  #[inline]
  pub fn into_nullable(self) -> Option<T> {
    self.match_with(Some, |_| None)
  }
}

impl<T> Variants for Maybe<T> {
  type First = T;
  type Second = Unit;

  const FIRST_NAME: &'static str = "present";
  const SECOND_NAME: &'static str = "absent";

  #[inline]
  fn into_union(self) -> Union<T, Unit> {
    match self {
      Self::Present(value) => Union::First(value),
      Self::Absent => Union::Second(Unit),
    }
  }
  #[inline]
  fn as_union(&self) -> Union<&T, &Unit> {
    match self {
      Self::Present(value) => Union::First(value),
      Self::Absent => Union::Second(&Unit),
    }
  }
  #[inline]
  fn from_union(union: Union<T, Unit>) -> Self {
    union.match_with(Self::Present, |_| Self::Absent)
  }
}

impl<T> Default for Maybe<T> {
  #[inline]
  fn default() -> Self { Self::Absent }
}
impl<T> From<Option<T>> for Maybe<T> {
  #[inline]
  fn from(value: Option<T>) -> Self { Self::from_nullable(value) }
}
impl<T> From<Maybe<T>> for Option<T> {
  #[inline]
  fn from(value: Maybe<T>) -> Self { value.into_nullable() }
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;

  use super::*;

  #[test]
  fn reduce_extracts_value_or_alternative() {
    for x in [-1, 0, 42] {
      assert_eq!(Maybe::some(x).reduce(7), x);
    }
    assert_eq!(Maybe::none().reduce(7), 7);
    assert_eq!(Maybe::<i32>::none().reduce_with(|| 8), 8);
    assert_eq!(Maybe::<i32>::none().reduce_from(|Unit| 9), 9);
  }

  #[test]
  fn reduce_with_does_not_evaluate_unneeded_alternative() {
    let mut evaluated = false;
    let value = Maybe::some("cheap").reduce_with(|| {
      evaluated = true;
      "expensive"
    });
    assert_eq!(value, "cheap");
    assert!(!evaluated);
  }

  #[test]
  fn map_obeys_functor_laws() {
    let f = |x: i32| x + 1;
    let g = |x: i32| x * 10;
    for maybe in [Maybe::some(3), Maybe::none()] {
      assert_eq!(maybe.map(|x| x), maybe);
      assert_eq!(maybe.map(f).map(g), maybe.map(|x| g(f(x))));
    }
  }

  #[test]
  fn map_nullable_lifts_none_to_absent() {
    assert_eq!(Maybe::some(2).map(|_| None::<i32>), Maybe::Present(None));
    assert_eq!(Maybe::some(2).map_nullable(|_| None::<i32>), Maybe::Absent);
    assert_eq!(Maybe::some(4).map_nullable(|x| if x > 3 { Some(x) } else { None }), Maybe::Present(4));
    assert_eq!(Maybe::some(2).map_nullable(|x| if x > 3 { Some(x) } else { None }), Maybe::Absent);
  }

  #[test]
  fn absent_short_circuits() {
    let mut calls = 0;
    let absent: Maybe<i32> = Maybe::none();
    assert_eq!(absent.map(|x| { calls += 1; x }), Maybe::Absent);
    assert_eq!(absent.bind(|x| { calls += 1; Maybe::some(x) }), Maybe::Absent);
    assert_eq!(absent.filter(|_| { calls += 1; true }), Maybe::Absent);
    assert_eq!(calls, 0);
  }

  #[test]
  fn filter_and_bind() {
    assert_eq!(Maybe::some(4).filter(|x| x % 2 == 0), Maybe::Present(4));
    assert_eq!(Maybe::some(5).filter(|x| x % 2 == 0), Maybe::Absent);
    assert_eq!(Maybe::some(5).bind(|x| Maybe::some(x.to_string())), Maybe::Present("5".to_string()));
    assert_eq!(Maybe::some(5).bind(|_| Maybe::<()>::none()), Maybe::Absent);
  }

  #[test]
  fn match_and_effect() {
    assert_eq!(Maybe::some(2).match_with(|x| x * 2, |_| 0), 4);
    assert_eq!(Maybe::<i32>::none().match_with(|x| x * 2, |_| 0), 0);

    let log = RefCell::new(Vec::new());
    let record_present = |x: &i32| log.borrow_mut().push(format!("present {x}"));
    let record_absent = |_: &Unit| log.borrow_mut().push("absent".to_string());
    Maybe::some(1).effect(record_present, record_absent);
    let tapped = Maybe::<i32>::none().tap(record_present, record_absent);
    assert_eq!(tapped, Maybe::Absent);
    assert_eq!(log.into_inner(), ["present 1", "absent"]);
  }

  #[test]
  fn nullable_conversions() {
    assert_eq!(Maybe::from_nullable(Some(1)), Maybe::Present(1));
    assert_eq!(Maybe::<i32>::from(None), Maybe::Absent);
    assert_eq!(Option::<i32>::from(Maybe::some(1)), Some(1));
    assert_eq!(Maybe::<i32>::default().into_nullable(), None);
  }

  #[test]
  fn try_unwrap_reports_absence() {
    assert_eq!(Maybe::some(1).try_unwrap(), Ok(1));
    assert_eq!(Maybe::<i32>::none().try_unwrap(), Err(InvalidUnwrap::new("present", "absent")));
  }

  #[test]
  #[should_panic(expected = "invalid unwrap: expected the 'present' variant")]
  fn unwrap_absent_panics() {
    Maybe::<i32>::none().unwrap();
  }
}
