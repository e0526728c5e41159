use crate::arch::AccPlane;
use serde::{Deserialize, Serialize};

/// Ordered sequence of accumulator-plane snapshots, one per completed cycle.
///
/// Append-only while a run is in progress and read-only afterwards. Every
/// snapshot is an independently owned copy, so stepping the live grid can
/// never alter what was already recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
  snapshots: Vec<AccPlane>,
}

impl History {
  pub fn new() -> Self {
    Self { snapshots: Vec::new() }
  }

  pub fn push(&mut self, plane: AccPlane) {
    self.snapshots.push(plane);
  }

  pub fn len(&self) -> usize {
    self.snapshots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.snapshots.is_empty()
  }

  /// Snapshot recorded after the given cycle, if it has completed.
  pub fn get(&self, cycle: usize) -> Option<&AccPlane> {
    self.snapshots.get(cycle)
  }

  pub fn last(&self) -> Option<&AccPlane> {
    self.snapshots.last()
  }

  pub fn iter(&self) -> impl Iterator<Item = &AccPlane> {
    self.snapshots.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_append_and_read_back() {
    let mut history = History::new();
    assert!(history.is_empty());

    let mut plane = AccPlane::zero(2, 2);
    plane.set(0, 0, 7);
    history.push(plane.clone());

    assert_eq!(history.len(), 1);
    assert_eq!(history.get(0).unwrap().get(0, 0), 7);
    assert_eq!(history.last().unwrap(), history.get(0).unwrap());
    assert!(history.get(1).is_none());
  }

  #[test]
  fn test_snapshots_are_independent_of_the_source() {
    let mut history = History::new();
    let mut plane = AccPlane::zero(1, 1);
    plane.set(0, 0, 1);
    history.push(plane.clone());

    plane.set(0, 0, 999);
    assert_eq!(history.get(0).unwrap().get(0, 0), 1);
  }
}
