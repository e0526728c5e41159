// Systolic array model for matrix multiplication, after the classic
// Kung-Leiserson design: operands enter skewed at the left and top edges and
// ripple through the grid one hop per cycle while every PE accumulates.

use super::feeder::Feeder;
use super::pe::Grid;
use crate::arch::matrix::{check_operands, AccPlane, Matrix};
use crate::arch::Engine;
use crate::cycle_record;
use sim::models::model_trait::Reportable;
use sim::models::ModelRecord;

#[derive(Debug)]
pub struct SystolicArray {
  rows: usize,
  cols: usize,
  /// Inner dimension (A columns = B rows), also the skew window width
  k_dim: usize,
  feeder: Feeder,
  grid: Grid,
  cycle_count: usize,
  records: Vec<ModelRecord>,
}

impl SystolicArray {
  /// Build an R x C grid for the product A(R x K) * B(K x C).
  pub fn new(a: Matrix, b: Matrix) -> Result<Self, String> {
    let (rows, k_dim, cols) = check_operands(&a, &b)?;
    Ok(Self {
      rows,
      cols,
      k_dim,
      feeder: Feeder::new(a, b, k_dim),
      grid: Grid::zero(rows, cols),
      cycle_count: 0,
      records: Vec::new(),
    })
  }

  /// Current register state, for inspection.
  pub fn grid(&self) -> &Grid {
    &self.grid
  }
}

impl Engine for SystolicArray {
  fn name(&self) -> &'static str {
    "systolic"
  }

  fn cycle(&mut self) {
    let t = self.cycle_count;
    let left_in = self.feeder.left_in(t);
    let top_in = self.feeder.top_in(t);

    // Synchronous update: the whole grid is replaced at once, derived from
    // the previous state and this cycle's edge vectors.
    self.grid = self.grid.step(&left_in, &top_in);
    self.cycle_count += 1;

    if left_in.iter().any(|&v| v != 0) || top_in.iter().any(|&v| v != 0) {
      cycle_record!(self, t, "inject", format!("left={:?} top={:?}", left_in, top_in));
    }
    if self.cycle_count == self.settle_cycles() {
      cycle_record!(
        self,
        t,
        "settled",
        format!("accumulator holds the full {}x{} product", self.rows, self.cols)
      );
    }
  }

  fn cycle_count(&self) -> usize {
    self.cycle_count
  }

  fn acc_plane(&self) -> AccPlane {
    self.grid.acc_plane()
  }

  /// The last term reaches PE (R-1, C-1) after the operand injected at cycle
  /// (R-1) + (K-1) crosses C-1 columns, so R + C + K - 2 cycles settle the
  /// whole plane.
  fn settle_cycles(&self) -> usize {
    self.rows + self.cols + self.k_dim - 2
  }
}

impl Reportable for SystolicArray {
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
