// Parallel-reduction model: every output cell accumulates concurrently, one
// partial-product plane per cycle. This is a sequential stand-in for the
// reduction tree of massively parallel hardware; a real tree would finish in
// ceil(log2 k) steps, but the per-plane accumulation keeps every intermediate
// state visible for inspection.

use crate::arch::matrix::{check_operands, AccPlane, AccT, Matrix};
use crate::arch::Engine;
use crate::cycle_record;
use sim::models::model_trait::Reportable;
use sim::models::ModelRecord;

#[derive(Debug)]
pub struct ReductionTree {
  rows: usize,
  cols: usize,
  k_dim: usize,
  /// partials[k][i][j] = A[i][k] * B[k][j], precomputed at construction
  partials: Vec<AccPlane>,
  acc: AccPlane,
  cycle_count: usize,
  records: Vec<ModelRecord>,
}

impl ReductionTree {
  pub fn new(a: Matrix, b: Matrix) -> Result<Self, String> {
    let (rows, k_dim, cols) = check_operands(&a, &b)?;

    let mut partials = Vec::with_capacity(k_dim);
    for k in 0..k_dim {
      let mut plane = AccPlane::zero(rows, cols);
      for i in 0..rows {
        for j in 0..cols {
          plane.set(i, j, a.get(i, k) as AccT * b.get(k, j) as AccT);
        }
      }
      partials.push(plane);
    }

    Ok(Self {
      rows,
      cols,
      k_dim,
      partials,
      acc: AccPlane::zero(rows, cols),
      cycle_count: 0,
      records: Vec::new(),
    })
  }
}

impl Engine for ReductionTree {
  fn name(&self) -> &'static str {
    "reduction"
  }

  fn cycle(&mut self) {
    let t = self.cycle_count;
    if t < self.k_dim {
      for i in 0..self.rows {
        for j in 0..self.cols {
          self.acc.accumulate(i, j, self.partials[t].get(i, j));
        }
      }
      cycle_record!(self, t, "reduce_step", format!("added partial plane {} of {}", t + 1, self.k_dim));
    }
    self.cycle_count += 1;
  }

  fn cycle_count(&self) -> usize {
    self.cycle_count
  }

  fn acc_plane(&self) -> AccPlane {
    self.acc.clone()
  }

  /// One partial plane per cycle: K cycles for the full product.
  fn settle_cycles(&self) -> usize {
    self.k_dim
  }
}

impl Reportable for ReductionTree {
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

  fn engine_2x2() -> ReductionTree {
    let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
    ReductionTree::new(a, b).unwrap()
  }

  #[test]
  fn test_first_cycle_adds_plane_zero_everywhere() {
    let mut engine = engine_2x2();
    engine.cycle();
    // Every cell holds its k = 0 term after one cycle.
    let plane = engine.acc_plane();
    assert_eq!(plane.get(0, 0), 1 * 5);
    assert_eq!(plane.get(0, 1), 1 * 6);
    assert_eq!(plane.get(1, 0), 3 * 5);
    assert_eq!(plane.get(1, 1), 3 * 6);
  }

  #[test]
  fn test_settles_in_k_cycles() {
    let mut engine = engine_2x2();
    assert_eq!(engine.settle_cycles(), 2);
    engine.cycle();
    engine.cycle();
    let plane = engine.acc_plane();
    assert_eq!(plane.get(0, 0), 19);
    assert_eq!(plane.get(1, 1), 50);
  }

  #[test]
  fn test_extra_cycles_do_not_change_acc() {
    let mut engine = engine_2x2();
    for _ in 0..7 {
      engine.cycle();
    }
    assert_eq!(engine.cycle_count(), 7);
    assert_eq!(engine.acc_plane().get(0, 1), 22);
  }

  #[test]
  fn test_rectangular_reduction() {
    let a = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    let b = Matrix::from_rows(vec![vec![7, 8], vec![9, 10], vec![11, 12]]).unwrap();
    let mut engine = ReductionTree::new(a, b).unwrap();

    assert_eq!(engine.settle_cycles(), 3);
    for _ in 0..3 {
      engine.cycle();
    }
    let plane = engine.acc_plane();
    assert_eq!(plane.get(0, 0), 58);
    assert_eq!(plane.get(1, 1), 154);
  }
}
