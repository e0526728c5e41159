use clap::Parser;
use ripple::simulator::config::{build_operands, load_and_merge_configs, to_sim_config};
use ripple::simulator::utils::log::init_log;
use ripple::simulator::Simulator;

/// Ripple - a cycle-level matrix multiplication dataflow simulator
#[derive(Parser, Debug)]
#[command(name = "ripple")]
#[command(version = "0.1.0")]
#[command(about = "Cycle-by-cycle matmul on naive, reduction and systolic models", long_about = None)]
struct Args {
  /// Enable step mode (interactive stepping)
  #[arg(short, long)]
  step: bool,

  /// Quiet mode (suppress records and result printing)
  #[arg(short, long)]
  quiet: bool,

  /// Output trace file path (JSON lines, one record per cycle)
  #[arg(long, value_name = "FILE")]
  trace_file: Option<String>,

  /// Architecture type: naive, reduction or systolic
  #[arg(short, long, value_name = "ARCH")]
  arch: Option<String>,

  /// Number of cycles to run (defaults to the settle point)
  #[arg(short, long, value_name = "N", allow_hyphen_values = true)]
  cycles: Option<i64>,

  /// Square dimension for all-ones operands (overrides [operands])
  #[arg(short, long, value_name = "DIM")]
  dim: Option<usize>,

  /// Custom config file (TOML)
  #[arg(long, value_name = "FILE")]
  config: Option<String>,
}

fn main() -> std::io::Result<()> {
  init_log();

  let args = Args::parse();

  let config = load_and_merge_configs(
    args.config.as_deref(),
    args.quiet,
    args.step,
    args.trace_file.as_deref(),
    args.arch.as_deref(),
    args.cycles,
    args.dim,
  )?;

  let (a, b) = build_operands(&config.operands)?;
  let sim_config = to_sim_config(&config)?;

  let mut simulator = Simulator::new(sim_config, a, b)?;
  simulator.run()
}
