use crate::arch::{AccPlane, Engine};
use sim::models::model_trait::Reportable;

/// Print the records an engine accumulated during a run.
pub fn print_engine_report(engine: &dyn Engine) {
  println!("\n--- Simulation Records ---");
  println!("\n[{}] status: {}", engine.name(), engine.status());
  for record in engine.records() {
    println!("  Cycle {:>4}: {} | {}", record.time as usize, record.action, record.subject);
  }
  println!("--- End Records ---\n");
}

/// Print an accumulator plane with aligned columns.
pub fn print_acc_plane(plane: &AccPlane) {
  let width = plane
    .as_rows()
    .iter()
    .flatten()
    .map(|v| v.to_string().len())
    .max()
    .unwrap_or(1);

  for row in plane.as_rows() {
    let line: Vec<String> = row.iter().map(|v| format!("{:>width$}", v, width = width)).collect();
    println!("  {}", line.join(" "));
  }
}
