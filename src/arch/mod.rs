pub mod matrix;
pub mod naive;
pub mod reduction;
pub mod systolic;

pub use matrix::{AccPlane, AccT, ElemT, Matrix};

use crate::simulator::mode::ArchType;
use sim::models::model_trait::Reportable;

/// One cycle-steppable matrix-multiplication model.
///
/// All three architectures share this contract: advance by exactly one
/// synchronous cycle and expose the current accumulator plane. The driver
/// and the history recorder work against it, so the models can be compared
/// side by side without duplicating any of the run machinery.
pub trait Engine: Reportable {
  /// Short architecture name used in traces and reports.
  fn name(&self) -> &'static str;

  /// Advance the model by exactly one cycle.
  ///
  /// Stepping past the settle point is legal; the accumulator simply stops
  /// changing once all product terms have been folded in.
  fn cycle(&mut self);

  /// Number of cycles executed so far.
  fn cycle_count(&self) -> usize;

  /// Snapshot of the current accumulator plane (an independent copy).
  fn acc_plane(&self) -> AccPlane;

  /// Cycles after which the accumulator equals the full product.
  fn settle_cycles(&self) -> usize;
}

/// Instantiate the engine for an architecture from a pair of operands.
///
/// Fails fast on incompatible dimensions, before any cycle executes.
pub fn create_engine(arch: ArchType, a: Matrix, b: Matrix) -> Result<Box<dyn Engine>, String> {
  match arch {
    ArchType::Naive => Ok(Box::new(naive::NaiveMac::new(a, b)?)),
    ArchType::Reduction => Ok(Box::new(reduction::ReductionTree::new(a, b)?)),
    ArchType::Systolic => Ok(Box::new(systolic::SystolicArray::new(a, b)?)),
  }
}
