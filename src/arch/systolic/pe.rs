use crate::arch::matrix::{AccPlane, AccT, ElemT};
use serde::{Deserialize, Serialize};

/// One processing element: a running accumulator plus the two pass-through
/// registers that forward operands to the right and down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pe {
  /// Last horizontal input, forwarded to the right neighbor next cycle
  pub a_reg: ElemT,
  /// Last vertical input, forwarded to the bottom neighbor next cycle
  pub b_reg: ElemT,
  /// Running dot-product accumulator
  pub acc: AccT,
}

impl Pe {
  /// Latch this cycle's inputs and fold their product into the accumulator.
  pub fn mac(prev_acc: AccT, a_in: ElemT, b_in: ElemT) -> Pe {
    Pe {
      a_reg: a_in,
      b_reg: b_in,
      acc: prev_acc + (a_in as AccT) * (b_in as AccT),
    }
  }
}

/// Register state of the full R x C grid at a cycle boundary.
///
/// A new grid is always derived from the previous one; neighbors never
/// observe a partially updated cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
  rows: usize,
  cols: usize,
  pes: Vec<Vec<Pe>>,
}

impl Grid {
  /// All-zero grid, the state before the first cycle.
  pub fn zero(rows: usize, cols: usize) -> Self {
    Self {
      rows,
      cols,
      pes: vec![vec![Pe::default(); cols]; rows],
    }
  }

  pub fn rows(&self) -> usize {
    self.rows
  }

  pub fn cols(&self) -> usize {
    self.cols
  }

  pub fn pe(&self, row: usize, col: usize) -> &Pe {
    &self.pes[row][col]
  }

  /// Advance the grid by exactly one synchronous cycle.
  ///
  /// For every cell: the horizontal input is the edge vector at column 0 and
  /// the left neighbor's pass-through register everywhere else; likewise for
  /// the vertical input from the top edge and the upper neighbor. Every read
  /// targets `self` (the previous state), so the cells can be computed in
  /// any order.
  pub fn step(&self, left_in: &[ElemT], top_in: &[ElemT]) -> Grid {
    debug_assert_eq!(left_in.len(), self.rows);
    debug_assert_eq!(top_in.len(), self.cols);

    let mut next = Vec::with_capacity(self.rows);
    for i in 0..self.rows {
      let mut row = Vec::with_capacity(self.cols);
      for j in 0..self.cols {
        let a_in = if j == 0 { left_in[i] } else { self.pes[i][j - 1].a_reg };
        let b_in = if i == 0 { top_in[j] } else { self.pes[i - 1][j].b_reg };
        row.push(Pe::mac(self.pes[i][j].acc, a_in, b_in));
      }
      next.push(row);
    }

    Grid {
      rows: self.rows,
      cols: self.cols,
      pes: next,
    }
  }

  /// Independent copy of the accumulator plane.
  pub fn acc_plane(&self) -> AccPlane {
    let mut plane = AccPlane::zero(self.rows, self.cols);
    for i in 0..self.rows {
      for j in 0..self.cols {
        plane.set(i, j, self.pes[i][j].acc);
      }
    }
    plane
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_pe_mac() {
    let pe = Pe::mac(0, 3, 4);
    assert_eq!(pe.acc, 12);
    assert_eq!(pe.a_reg, 3);
    assert_eq!(pe.b_reg, 4);

    let pe = Pe::mac(pe.acc, 5, 6);
    assert_eq!(pe.acc, 12 + 30);
  }

  #[test]
  fn test_step_reads_previous_state_only() {
    // Feed (1, 1) into the corner; the inner cell must see zeros this cycle
    // because its neighbors' registers were zero in the previous state.
    let grid = Grid::zero(2, 2);
    let next = grid.step(&[1, 0], &[1, 0]);

    assert_eq!(next.pe(0, 0).acc, 1);
    assert_eq!(next.pe(0, 1).acc, 0);
    assert_eq!(next.pe(1, 0).acc, 0);
    assert_eq!(next.pe(1, 1).acc, 0);

    // One cycle later the registered values have moved one hop.
    let after = next.step(&[0, 2], &[0, 3]);
    assert_eq!(after.pe(0, 1).acc, 1 * 3); // a from the left, b from the top edge
    assert_eq!(after.pe(1, 0).acc, 2 * 1); // a from the left edge, b from above
  }

  #[test]
  fn test_acc_plane_is_independent_copy() {
    let grid = Grid::zero(2, 2);
    let stepped = grid.step(&[7, 0], &[8, 0]);
    let plane = stepped.acc_plane();
    assert_eq!(plane.get(0, 0), 56);

    // Stepping further must not alter the snapshot taken earlier.
    let _ = stepped.step(&[1, 1], &[1, 1]);
    assert_eq!(plane.get(0, 0), 56);
  }
}
