#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchType {
  Naive,
  Reduction,
  Systolic,
}

impl ArchType {
  /// Parse an architecture name as given on the CLI or in a config file.
  pub fn parse(s: &str) -> Option<ArchType> {
    match s.to_lowercase().as_str() {
      "naive" | "cpu" => Some(ArchType::Naive),
      "reduction" | "gpu" => Some(ArchType::Reduction),
      "systolic" | "tpu" => Some(ArchType::Systolic),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      ArchType::Naive => "naive",
      ArchType::Reduction => "reduction",
      ArchType::Systolic => "systolic",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
  Continuous,
  Step,
}

#[derive(Debug, Clone)]
pub struct SimConfig {
  pub arch_type: ArchType,
  pub quiet: bool,
  pub step_mode: StepMode,
  pub trace_file: Option<String>,
  /// Cycles to run; None means run to the engine's settle point
  pub cycles: Option<usize>,
}
