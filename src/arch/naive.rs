// Naive sequential model: one multiply-accumulate per cycle, walking the
// output plane in i, j, k order the way a scalar core would.

use crate::arch::matrix::{check_operands, AccPlane, AccT, Matrix};
use crate::arch::Engine;
use crate::cycle_record;
use sim::models::model_trait::Reportable;
use sim::models::ModelRecord;

#[derive(Debug)]
pub struct NaiveMac {
  a: Matrix,
  b: Matrix,
  rows: usize,
  cols: usize,
  k_dim: usize,
  acc: AccPlane,
  cycle_count: usize,
  records: Vec<ModelRecord>,
}

impl NaiveMac {
  pub fn new(a: Matrix, b: Matrix) -> Result<Self, String> {
    let (rows, k_dim, cols) = check_operands(&a, &b)?;
    Ok(Self {
      acc: AccPlane::zero(rows, cols),
      a,
      b,
      rows,
      cols,
      k_dim,
      cycle_count: 0,
      records: Vec::new(),
    })
  }
}

impl Engine for NaiveMac {
  fn name(&self) -> &'static str {
    "naive"
  }

  fn cycle(&mut self) {
    let t = self.cycle_count;
    if t < self.settle_cycles() {
      let i = t / (self.cols * self.k_dim);
      let rem = t % (self.cols * self.k_dim);
      let j = rem / self.k_dim;
      let k = rem % self.k_dim;

      let term = self.a.get(i, k) as AccT * self.b.get(k, j) as AccT;
      self.acc.accumulate(i, j, term);

      if k == self.k_dim - 1 {
        cycle_record!(self, t, "cell_complete", format!("C[{}][{}] = {}", i, j, self.acc.get(i, j)));
      }
    }
    self.cycle_count += 1;
  }

  fn cycle_count(&self) -> usize {
    self.cycle_count
  }

  fn acc_plane(&self) -> AccPlane {
    self.acc.clone()
  }

  /// One MAC per cycle: R * C * K cycles for the full product.
  fn settle_cycles(&self) -> usize {
    self.rows * self.cols * self.k_dim
  }
}

impl Reportable for NaiveMac {
  fn status(&self) -> String {
    if self.cycle_count >= self.settle_cycles() {
      "settled".to_string()
    } else {
      format!("cycle {}", self.cycle_count)
    }
  }

  fn records(&self) -> &Vec<ModelRecord> {
    &self.records
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn engine_2x2() -> NaiveMac {
    let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
    NaiveMac::new(a, b).unwrap()
  }

  #[test]
  fn test_full_product_after_settle() {
    let mut engine = engine_2x2();
    assert_eq!(engine.settle_cycles(), 8);
    for _ in 0..8 {
      engine.cycle();
    }
    let plane = engine.acc_plane();
    assert_eq!(plane.get(0, 0), 19);
    assert_eq!(plane.get(0, 1), 22);
    assert_eq!(plane.get(1, 0), 43);
    assert_eq!(plane.get(1, 1), 50);
  }

  #[test]
  fn test_one_mac_per_cycle() {
    let mut engine = engine_2x2();
    engine.cycle();
    // Cycle 0 folds A[0][0] * B[0][0] into C[0][0] and nothing else.
    let plane = engine.acc_plane();
    assert_eq!(plane.get(0, 0), 5);
    assert_eq!(plane.get(0, 1), 0);

    engine.cycle();
    assert_eq!(engine.acc_plane().get(0, 0), 19); // + A[0][1] * B[1][0]
  }

  #[test]
  fn test_extra_cycles_do_not_change_acc() {
    let mut engine = engine_2x2();
    for _ in 0..20 {
      engine.cycle();
    }
    assert_eq!(engine.cycle_count(), 20);
    assert_eq!(engine.acc_plane().get(1, 1), 50);
  }
}
