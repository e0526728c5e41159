use crate::arch::matrix::{ElemT, Matrix};
use serde::{Deserialize, Serialize};

/// Skewed edge feeding for the systolic grid.
///
/// Row i of A is delayed by i cycles and column j of B by j cycles, so the
/// operands for output cell (i, j) meet at that PE exactly when its partial
/// products are due. Each row's feeding window is k cycles wide; outside the
/// window the edge contributes zero, which never perturbs an accumulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feeder {
  a: Matrix,
  b: Matrix,
  k_dim: usize,
}

impl Feeder {
  pub fn new(a: Matrix, b: Matrix, k_dim: usize) -> Self {
    Self { a, b, k_dim }
  }

  /// Values entering the left edge at cycle t: `left_in[i] = A[i][t - i]`
  /// while `i <= t < i + k`, zero otherwise.
  pub fn left_in(&self, t: usize) -> Vec<ElemT> {
    (0..self.a.rows())
      .map(|i| {
        if t >= i && t < i + self.k_dim {
          self.a.get(i, t - i)
        } else {
          0
        }
      })
      .collect()
  }

  /// Values entering the top edge at cycle t: `top_in[j] = B[t - j][j]`
  /// while `j <= t < j + k`, zero otherwise.
  pub fn top_in(&self, t: usize) -> Vec<ElemT> {
    (0..self.b.cols())
      .map(|j| {
        if t >= j && t < j + self.k_dim {
          self.b.get(t - j, j)
        } else {
          0
        }
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn feeder_8x8() -> Feeder {
    Feeder::new(Matrix::ramp8(), Matrix::checkerboard(8, 8), 8)
  }

  #[test]
  fn test_cycle_zero_feeds_only_first_row_and_column() {
    let feeder = feeder_8x8();
    let left = feeder.left_in(0);
    let top = feeder.top_in(0);

    assert_eq!(left[0], 1); // A[0][0]
    assert!(left[1..].iter().all(|&v| v == 0));
    assert_eq!(top[0], 1); // B[0][0]
    assert!(top[1..].iter().all(|&v| v == 0));
  }

  #[test]
  fn test_full_diagonal_at_cycle_seven() {
    let feeder = feeder_8x8();
    let left = feeder.left_in(7);
    // Every row is inside its window at t = 7: left_in[i] = A[i][7 - i].
    for i in 0..8 {
      assert_eq!(left[i], Matrix::ramp8().get(i, 7 - i));
    }
  }

  #[test]
  fn test_window_closes() {
    let feeder = feeder_8x8();
    // Row 0's window is cycles 0..8; at t = 8 only rows 1..8 still feed.
    let left = feeder.left_in(8);
    assert_eq!(left[0], 0);
    assert_eq!(left[1], Matrix::ramp8().get(1, 7));
    // Far past every window the edges settle to zero.
    assert!(feeder.left_in(30).iter().all(|&v| v == 0));
    assert!(feeder.top_in(30).iter().all(|&v| v == 0));
  }

  #[test]
  fn test_rectangular_windows_use_inner_dimension() {
    // A is 2x3, B is 3x2: the window width is k = 3 for both edges.
    let a = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    let b = Matrix::from_rows(vec![vec![7, 8], vec![9, 10], vec![11, 12]]).unwrap();
    let feeder = Feeder::new(a, b, 3);

    assert_eq!(feeder.left_in(2), vec![3, 5]); // A[0][2], A[1][1]
    assert_eq!(feeder.top_in(2), vec![11, 10]); // B[2][0], B[1][1]
    assert_eq!(feeder.left_in(4), vec![0, 0]);
    assert_eq!(feeder.top_in(3), vec![0, 12]);
  }
}
