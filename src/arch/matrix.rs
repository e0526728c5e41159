use serde::{Deserialize, Serialize};

/// Operand element type
pub type ElemT = i32;
/// Accumulator type, wide enough to hold k * max(A) * max(B)
pub type AccT = i64;

/// Immutable integer operand matrix, fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix {
  data: Vec<Vec<ElemT>>,
  rows: usize,
  cols: usize,
}

impl Matrix {
  /// Build a matrix from explicit rows. Empty or ragged input is rejected.
  pub fn from_rows(data: Vec<Vec<ElemT>>) -> Result<Self, String> {
    if data.is_empty() || data[0].is_empty() {
      return Err("matrix cannot be empty".to_string());
    }
    let rows = data.len();
    let cols = data[0].len();
    for (i, row) in data.iter().enumerate() {
      if row.len() != cols {
        return Err(format!("row {} has {} columns, expected {}", i, row.len(), cols));
      }
    }
    Ok(Self { data, rows, cols })
  }

  /// All-ones matrix of the given shape.
  pub fn ones(rows: usize, cols: usize) -> Self {
    Self {
      data: vec![vec![1; cols]; rows],
      rows,
      cols,
    }
  }

  /// The 8x8 ramp operand from the original Verilog testbench.
  pub fn ramp8() -> Self {
    let data = vec![
      vec![1, 2, 3, 4, 5, 6, 7, 8],
      vec![8, 7, 6, 5, 4, 3, 2, 1],
      vec![1, 3, 5, 7, 9, 11, 13, 15],
      vec![2, 4, 6, 8, 10, 12, 14, 16],
      vec![16, 14, 12, 10, 8, 6, 4, 2],
      vec![15, 13, 11, 9, 7, 5, 3, 1],
      vec![1, 1, 2, 2, 3, 3, 4, 4],
      vec![4, 4, 3, 3, 2, 2, 1, 1],
    ];
    Self { data, rows: 8, cols: 8 }
  }

  /// Alternating 0/1 matrix, 1 on the even diagonals.
  pub fn checkerboard(rows: usize, cols: usize) -> Self {
    let data = (0..rows)
      .map(|i| (0..cols).map(|j| if (i + j) % 2 == 0 { 1 } else { 0 }).collect())
      .collect();
    Self { data, rows, cols }
  }

  /// Value at (row, col), or 0 if out of bounds.
  pub fn get(&self, row: usize, col: usize) -> ElemT {
    if row < self.rows && col < self.cols {
      self.data[row][col]
    } else {
      0
    }
  }

  pub fn rows(&self) -> usize {
    self.rows
  }

  pub fn cols(&self) -> usize {
    self.cols
  }
}

/// Check that two operands form a valid product A(m x k) * B(k x n).
///
/// Returns (m, k, n) on success.
pub fn check_operands(a: &Matrix, b: &Matrix) -> Result<(usize, usize, usize), String> {
  if a.cols() != b.rows() {
    return Err(format!(
      "matrix dimensions mismatch: A has {} columns, B has {} rows",
      a.cols(),
      b.rows()
    ));
  }
  Ok((a.rows(), a.cols(), b.cols()))
}

/// One R x C accumulator plane: the per-PE running sums at a cycle boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccPlane {
  data: Vec<Vec<AccT>>,
  rows: usize,
  cols: usize,
}

impl AccPlane {
  pub fn zero(rows: usize, cols: usize) -> Self {
    Self {
      data: vec![vec![0; cols]; rows],
      rows,
      cols,
    }
  }

  pub fn get(&self, row: usize, col: usize) -> AccT {
    if row < self.rows && col < self.cols {
      self.data[row][col]
    } else {
      0
    }
  }

  pub fn set(&mut self, row: usize, col: usize, value: AccT) {
    if row < self.rows && col < self.cols {
      self.data[row][col] = value;
    }
  }

  /// Fold one product term into a cell.
  pub fn accumulate(&mut self, row: usize, col: usize, term: AccT) {
    if row < self.rows && col < self.cols {
      self.data[row][col] += term;
    }
  }

  pub fn as_rows(&self) -> &Vec<Vec<AccT>> {
    &self.data
  }

  pub fn rows(&self) -> usize {
    self.rows
  }

  pub fn cols(&self) -> usize {
    self.cols
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_rows_rejects_empty() {
    assert!(Matrix::from_rows(vec![]).is_err());
    assert!(Matrix::from_rows(vec![vec![]]).is_err());
  }

  #[test]
  fn test_from_rows_rejects_ragged() {
    let err = Matrix::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
    assert!(err.contains("row 1"), "unexpected error: {}", err);
  }

  #[test]
  fn test_matrix_access() {
    let m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    assert_eq!(m.rows(), 2);
    assert_eq!(m.cols(), 3);
    assert_eq!(m.get(0, 0), 1);
    assert_eq!(m.get(1, 2), 6);
    assert_eq!(m.get(2, 0), 0); // out of bounds
  }

  #[test]
  fn test_checkerboard_pattern() {
    let b = Matrix::checkerboard(3, 3);
    assert_eq!(b.get(0, 0), 1);
    assert_eq!(b.get(0, 1), 0);
    assert_eq!(b.get(1, 0), 0);
    assert_eq!(b.get(1, 1), 1);
  }

  #[test]
  fn test_ramp8_matches_testbench() {
    let a = Matrix::ramp8();
    assert_eq!(a.rows(), 8);
    assert_eq!(a.get(0, 7), 8);
    assert_eq!(a.get(4, 0), 16);
    assert_eq!(a.get(7, 7), 1);
  }

  #[test]
  fn test_check_operands() {
    let a = Matrix::ones(2, 3);
    let b = Matrix::ones(3, 4);
    assert_eq!(check_operands(&a, &b).unwrap(), (2, 3, 4));

    let bad = Matrix::ones(2, 4);
    let err = check_operands(&a, &bad).unwrap_err();
    assert!(err.contains("mismatch"), "unexpected error: {}", err);
  }

  #[test]
  fn test_acc_plane() {
    let mut plane = AccPlane::zero(2, 2);
    assert_eq!(plane.get(0, 0), 0);
    plane.set(0, 1, 42);
    plane.accumulate(0, 1, 8);
    assert_eq!(plane.get(0, 1), 50);
    assert_eq!(plane.get(5, 5), 0); // out of bounds reads as zero
  }
}
