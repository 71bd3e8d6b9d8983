/// Value without information, returned by operations that only have effects.
///
/// All instances are interchangeable.
#[derive(Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit;

impl From<()> for Unit {
  #[inline]
  fn from(_: ()) -> Self { Unit }
}
impl From<Unit> for () {
  #[inline]
  fn from(_: Unit) -> Self {}
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn all_units_are_equal() {
    assert_eq!(Unit, Unit::default());
    assert_eq!(Unit::from(()), Unit);
    assert_eq!(std::mem::size_of::<Unit>(), 0);
  }
}
