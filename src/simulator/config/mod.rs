use crate::arch::matrix::{ElemT, Matrix};
use crate::simulator::mode::{ArchType, SimConfig, StepMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Simulation section of the config file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSection {
  #[serde(default = "default_arch_type")]
  pub arch_type: String,
  #[serde(default)]
  pub quiet: bool,
  #[serde(default)]
  pub step_mode: bool,
  #[serde(default)]
  pub trace_file: String,
  /// Cycles to run; omitted means run to the settle point
  #[serde(default)]
  pub cycles: Option<i64>,
}

fn default_arch_type() -> String {
  "systolic".to_string()
}

impl Default for SimulationSection {
  fn default() -> Self {
    Self {
      arch_type: default_arch_type(),
      quiet: false,
      step_mode: false,
      trace_file: String::new(),
      cycles: None,
    }
  }
}

/// Operand section of the config file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OperandSection {
  /// Rows of A (and of the output)
  #[serde(default = "default_dim")]
  pub rows: usize,
  /// Inner dimension (columns of A, rows of B)
  #[serde(default = "default_dim")]
  pub inner: usize,
  /// Columns of B (and of the output)
  #[serde(default = "default_dim")]
  pub cols: usize,
  /// "ones", "pattern" (the 8x8 testbench operands) or "inline"
  #[serde(default = "default_fill")]
  pub fill: String,
  #[serde(default)]
  pub a: Option<Vec<Vec<ElemT>>>,
  #[serde(default)]
  pub b: Option<Vec<Vec<ElemT>>>,
}

fn default_dim() -> usize {
  8
}

fn default_fill() -> String {
  "ones".to_string()
}

impl Default for OperandSection {
  fn default() -> Self {
    Self {
      rows: default_dim(),
      inner: default_dim(),
      cols: default_dim(),
      fill: default_fill(),
      a: None,
      b: None,
    }
  }
}

/// Unified application config
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
  #[serde(default)]
  pub simulation: SimulationSection,
  #[serde(default)]
  pub operands: OperandSection,
}

/// Load the shipped default.toml
pub fn load_default_config() -> io::Result<AppConfig> {
  let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  let config_path = manifest_dir
    .join("src")
    .join("simulator")
    .join("config")
    .join("default.toml");

  load_config_file(&config_path)
}

/// Load a config from a specific file
pub fn load_config_file(path: &Path) -> io::Result<AppConfig> {
  let content = fs::read_to_string(path)
    .map_err(|e| io::Error::new(io::ErrorKind::NotFound, format!("cannot read config file {:?}: {}", path, e)))?;

  parse_config(&content)
}

pub fn parse_config(content: &str) -> io::Result<AppConfig> {
  toml::from_str::<AppConfig>(content)
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("TOML parse failed: {}", e)))
}

/// Custom config files, parsed with every key optional so merging can tell
/// an omitted key from one set to its default value.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigOverride {
  #[serde(default)]
  pub simulation: SimulationOverride,
  #[serde(default)]
  pub operands: OperandOverride,
}

#[derive(Debug, Default, Deserialize)]
pub struct SimulationOverride {
  pub arch_type: Option<String>,
  pub quiet: Option<bool>,
  pub step_mode: Option<bool>,
  pub trace_file: Option<String>,
  pub cycles: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OperandOverride {
  pub rows: Option<usize>,
  pub inner: Option<usize>,
  pub cols: Option<usize>,
  pub fill: Option<String>,
  pub a: Option<Vec<Vec<ElemT>>>,
  pub b: Option<Vec<Vec<ElemT>>>,
}

/// Load a custom config file on top of the defaults
pub fn load_override_file(path: &Path) -> io::Result<ConfigOverride> {
  let content = fs::read_to_string(path)
    .map_err(|e| io::Error::new(io::ErrorKind::NotFound, format!("cannot read config file {:?}: {}", path, e)))?;

  parse_override(&content)
}

pub fn parse_override(content: &str) -> io::Result<ConfigOverride> {
  toml::from_str::<ConfigOverride>(content)
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("TOML parse failed: {}", e)))
}

/// Merge a custom file onto the base config, per key
pub fn merge_config(mut base: AppConfig, override_config: ConfigOverride) -> AppConfig {
  let sim = override_config.simulation;
  if let Some(arch_type) = sim.arch_type {
    base.simulation.arch_type = arch_type;
  }
  if let Some(quiet) = sim.quiet {
    base.simulation.quiet = quiet;
  }
  if let Some(step_mode) = sim.step_mode {
    base.simulation.step_mode = step_mode;
  }
  if let Some(trace_file) = sim.trace_file {
    base.simulation.trace_file = trace_file;
  }
  if sim.cycles.is_some() {
    base.simulation.cycles = sim.cycles;
  }

  let op = override_config.operands;
  if let Some(rows) = op.rows {
    base.operands.rows = rows;
  }
  if let Some(inner) = op.inner {
    base.operands.inner = inner;
  }
  if let Some(cols) = op.cols {
    base.operands.cols = cols;
  }
  if let Some(fill) = op.fill {
    // A file that switches the fill away from the base's inline operands
    // should not drag those operands along with it.
    if fill != "inline" {
      base.operands.a = None;
      base.operands.b = None;
    }
    base.operands.fill = fill;
  }
  if op.a.is_some() {
    base.operands.a = op.a;
  }
  if op.b.is_some() {
    base.operands.b = op.b;
  }
  base
}

/// Apply CLI flags on top of the file config
pub fn apply_cli_overrides(
  config: &mut AppConfig,
  quiet: bool,
  step: bool,
  trace_file: Option<&str>,
  arch: Option<&str>,
  cycles: Option<i64>,
  dim: Option<usize>,
) {
  if quiet {
    config.simulation.quiet = true;
  }
  if step {
    config.simulation.step_mode = true;
  }
  if let Some(file) = trace_file {
    config.simulation.trace_file = file.to_string();
  }
  if let Some(arch_str) = arch {
    config.simulation.arch_type = arch_str.to_string();
  }
  if cycles.is_some() {
    config.simulation.cycles = cycles;
  }
  if let Some(n) = dim {
    // --dim means "square all-ones operands of this size"
    config.operands.rows = n;
    config.operands.inner = n;
    config.operands.cols = n;
    config.operands.fill = "ones".to_string();
    config.operands.a = None;
    config.operands.b = None;
  }
}

/// Validate a merged config before any cycle executes
pub fn validate_config(config: &AppConfig) -> io::Result<()> {
  if ArchType::parse(&config.simulation.arch_type).is_none() {
    return Err(io::Error::new(
      io::ErrorKind::InvalidData,
      format!("unsupported arch type: {}", config.simulation.arch_type),
    ));
  }

  if let Some(n) = config.simulation.cycles {
    if n < 0 {
      return Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("invalid cycle count: {} (must be non-negative)", n),
      ));
    }
  }

  let op = &config.operands;
  if op.rows == 0 || op.inner == 0 || op.cols == 0 {
    return Err(io::Error::new(
      io::ErrorKind::InvalidData,
      "operand dimensions must be at least 1".to_string(),
    ));
  }

  match op.fill.as_str() {
    "ones" => {},
    "pattern" => {
      if op.rows != 8 || op.inner != 8 || op.cols != 8 {
        return Err(io::Error::new(
          io::ErrorKind::InvalidData,
          "fill = \"pattern\" is the 8x8 testbench pair; set rows/inner/cols to 8".to_string(),
        ));
      }
    },
    "inline" => {
      let (a, b) = match (&op.a, &op.b) {
        (Some(a), Some(b)) => (a, b),
        _ => {
          return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "fill = \"inline\" requires both operands.a and operands.b".to_string(),
          ));
        },
      };
      if a.len() != op.rows || a.iter().any(|row| row.len() != op.inner) {
        return Err(io::Error::new(
          io::ErrorKind::InvalidData,
          format!("operands.a must be {}x{} (rows x inner)", op.rows, op.inner),
        ));
      }
      if b.len() != op.inner || b.iter().any(|row| row.len() != op.cols) {
        return Err(io::Error::new(
          io::ErrorKind::InvalidData,
          format!("operands.b must be {}x{} (inner x cols)", op.inner, op.cols),
        ));
      }
    },
    other => {
      return Err(io::Error::new(
        io::ErrorKind::InvalidData,
        format!("unsupported fill: {} (expected ones, pattern or inline)", other),
      ));
    },
  }

  Ok(())
}

/// Build the operand matrices described by the config
pub fn build_operands(op: &OperandSection) -> io::Result<(Matrix, Matrix)> {
  let invalid = |e: String| io::Error::new(io::ErrorKind::InvalidData, e);

  match op.fill.as_str() {
    "pattern" => Ok((Matrix::ramp8(), Matrix::checkerboard(8, 8))),
    "inline" => {
      let a = op
        .a
        .clone()
        .ok_or_else(|| invalid("operands.a missing".to_string()))
        .and_then(|rows| Matrix::from_rows(rows).map_err(invalid))?;
      let b = op
        .b
        .clone()
        .ok_or_else(|| invalid("operands.b missing".to_string()))
        .and_then(|rows| Matrix::from_rows(rows).map_err(invalid))?;
      Ok((a, b))
    },
    _ => Ok((Matrix::ones(op.rows, op.inner), Matrix::ones(op.inner, op.cols))),
  }
}

/// Derive the driver config from a validated AppConfig
pub fn to_sim_config(config: &AppConfig) -> io::Result<SimConfig> {
  let arch_type = ArchType::parse(&config.simulation.arch_type).ok_or_else(|| {
    io::Error::new(
      io::ErrorKind::InvalidData,
      format!("unsupported arch type: {}", config.simulation.arch_type),
    )
  })?;

  let cycles = match config.simulation.cycles {
    Some(n) if n < 0 => {
      return Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("invalid cycle count: {} (must be non-negative)", n),
      ));
    },
    Some(n) => Some(n as usize),
    None => None,
  };

  let step_mode = if config.simulation.step_mode {
    StepMode::Step
  } else {
    StepMode::Continuous
  };

  let trace_file = if config.simulation.trace_file.is_empty() {
    None
  } else {
    Some(config.simulation.trace_file.clone())
  };

  Ok(SimConfig {
    arch_type,
    quiet: config.simulation.quiet,
    step_mode,
    trace_file,
    cycles,
  })
}

/// Load and merge configs
///
/// Flow:
/// 1. load the shipped defaults
/// 2. merge a custom config file if one was given
/// 3. apply CLI overrides
/// 4. validate
pub fn load_and_merge_configs(
  custom_config_path: Option<&str>,
  quiet: bool,
  step: bool,
  trace_file: Option<&str>,
  arch: Option<&str>,
  cycles: Option<i64>,
  dim: Option<usize>,
) -> io::Result<AppConfig> {
  let mut config = load_default_config()?;

  if let Some(custom_path) = custom_config_path {
    let custom_config = load_override_file(Path::new(custom_path))?;
    config = merge_config(config, custom_config);
  }

  apply_cli_overrides(&mut config, quiet, step, trace_file, arch, cycles, dim);
  validate_config(&config)?;

  Ok(config)
}
