use crate::unit::Unit;

/// Closed sum of two slots: holds either a `First(A)` or a `Second(B)`, never both and never neither.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Union<A, B> {
  First(A),
  Second(B),
}

impl<A, B> Union<A, B> {
  #[inline]
  pub const fn first(value: A) -> Self { Self::First(value) }
  #[inline]
  pub const fn second(value: B) -> Self { Self::Second(value) }

  /// Discriminant of the active slot: `1` for [`First`](Self::First), `2` for [`Second`](Self::Second).
  #[inline]
  pub const fn discriminant(&self) -> u8 {
    match self {
      Self::First(_) => 1,
      Self::Second(_) => 2,
    }
  }
  #[inline]
  pub const fn is_first(&self) -> bool { matches!(self, Self::First(_)) }
  #[inline]
  pub const fn is_second(&self) -> bool { matches!(self, Self::Second(_)) }

  /// Runs exactly one of the handlers, the one belonging to the active slot, and returns its result.
  #[inline]
  pub fn match_with<R>(self, on_first: impl FnOnce(A) -> R, on_second: impl FnOnce(B) -> R) -> R {
    match self {
      Self::First(a) => on_first(a),
      Self::Second(b) => on_second(b),
    }
  }

  /// Side-effecting counterpart of [`match_with`](Self::match_with).
  #[inline]
  pub fn effect(self, on_first: impl FnOnce(A), on_second: impl FnOnce(B)) -> Unit {
    self.match_with(on_first, on_second);
    Unit
  }

  #[inline]
  pub const fn as_ref(&self) -> Union<&A, &B> {
    match self {
      Self::First(a) => Union::First(a),
      Self::Second(b) => Union::Second(b),
    }
  }

  #[inline]
  pub fn flip(self) -> Union<B, A> {
    self.match_with(Union::Second, Union::First)
  }
}

impl<A: Clone, B: Clone> Union<&A, &B> {
  #[inline]
  pub fn cloned(self) -> Union<A, B> {
    self.match_with(|a| Union::First(a.clone()), |b| Union::Second(b.clone()))
  }
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;

  use super::*;

  #[test]
  fn match_runs_only_the_active_handler() {
    let mut second_ran = false;
    let value: Union<i32, &str> = Union::first(20);
    let result = value.match_with(|a| a * 2, |_| {
      second_ran = true;
      0
    });
    assert_eq!(result, 40);
    assert!(!second_ran);

    let value: Union<i32, &str> = Union::second("abc");
    assert_eq!(value.match_with(|a| a as usize, |b| b.len()), 3);
  }

  #[test]
  fn effect_communicates_through_mutation() {
    let seen = RefCell::new(Vec::new());
    let unit = Union::<u8, char>::second('x').effect(|_| seen.borrow_mut().push("first"), |_| seen.borrow_mut().push("second"));
    assert_eq!(unit, Unit);
    assert_eq!(seen.into_inner(), ["second"]);
  }

  #[test]
  fn discriminant_and_flip() {
    let value = Union::<u8, char>::first(1);
    assert_eq!(value.discriminant(), 1);
    assert!(value.is_first());
    let flipped = value.flip();
    assert_eq!(flipped.discriminant(), 2);
    assert_eq!(flipped, Union::Second(1));
    assert_eq!(flipped.as_ref(), Union::Second(&1));
  }
}
