use super::mode::{SimConfig, StepMode};
use super::shell::{self, Command};
use crate::arch::{create_engine, AccPlane, Engine, Matrix};
use crate::simulator::history::History;
use crate::simulator::utils::report;
use rustyline::DefaultEditor;
use std::fs::File;
use std::io::{self, BufWriter, Result, Write};

/// Drives one engine through its cycles and records the history.
///
/// The driver owns the single mutable state cell; each cycle is atomic: the
/// engine advances, one snapshot lands in the history, and optionally one
/// line lands in the trace file.
pub struct Simulator {
  config: SimConfig,
  engine: Box<dyn Engine>,
  history: History,
  num_cycles: usize,
  trace_writer: Option<BufWriter<File>>,
}

impl Simulator {
  /// Validate the setup and build the engine. Fails fast, before any cycle
  /// executes: incompatible operand dimensions and invalid cycle counts are
  /// rejected here.
  pub fn new(config: SimConfig, a: Matrix, b: Matrix) -> Result<Self> {
    let engine =
      create_engine(config.arch_type, a, b).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let num_cycles = config.cycles.unwrap_or_else(|| engine.settle_cycles());

    let trace_writer = match &config.trace_file {
      Some(path) => Some(BufWriter::new(File::create(path)?)),
      None => None,
    };

    let plane = engine.acc_plane();
    log::info!(
      "{} engine ready: {}x{} output, settle point {} cycle(s), running {}",
      engine.name(),
      plane.rows(),
      plane.cols(),
      engine.settle_cycles(),
      num_cycles
    );

    Ok(Self {
      config,
      engine,
      history: History::new(),
      num_cycles,
      trace_writer,
    })
  }

  pub fn run(&mut self) -> Result<()> {
    match self.config.step_mode {
      StepMode::Continuous => self.run_continuous()?,
      StepMode::Step => self.run_step_mode()?,
    }

    if let Some(writer) = &mut self.trace_writer {
      writer.flush()?;
    }

    if !self.config.quiet {
      report::print_engine_report(self.engine.as_ref());
      println!("Final accumulator plane after {} cycle(s):", self.history.len());
      report::print_acc_plane(&self.final_plane());
    }

    Ok(())
  }

  fn run_continuous(&mut self) -> Result<()> {
    while self.history.len() < self.num_cycles {
      self.step()?;
    }
    Ok(())
  }

  fn run_step_mode(&mut self) -> Result<()> {
    println!("Step mode - Enter to step, 'si 10' to step N times, 'p' to print, 'c' to continue, 'q' to quit");
    let mut editor =
      DefaultEditor::new().map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    loop {
      match shell::read_command(&mut editor)? {
        Command::Step(n) => {
          // Stepping past the cycle target is allowed; the accumulator just
          // stops changing once the engine has settled.
          for _ in 0..n {
            self.step()?;
          }
          println!("cycle {} done ({})", self.history.len(), self.engine.status());
        },
        Command::Print => {
          report::print_acc_plane(&self.engine.acc_plane());
        },
        Command::Continue => {
          self.run_continuous()?;
          break;
        },
        Command::Quit => break,
      }
    }
    Ok(())
  }

  /// Execute exactly one cycle: advance the engine, trace, snapshot.
  fn step(&mut self) -> Result<()> {
    self.engine.cycle();
    let plane = self.engine.acc_plane();

    if let Some(writer) = &mut self.trace_writer {
      let entry = serde_json::json!({
        "cycle": self.history.len(),
        "arch": self.engine.name(),
        "acc": plane.as_rows(),
      });
      writeln!(writer, "{}", entry)?;
    }

    log::debug!("cycle {} complete", self.history.len());
    self.history.push(plane);
    Ok(())
  }

  /// Recorded snapshots, one per completed cycle. Safe to read while the
  /// run is still in progress.
  pub fn history(&self) -> &History {
    &self.history
  }

  /// The accumulator plane after the last executed cycle (all-zero if no
  /// cycle ran).
  pub fn final_plane(&self) -> AccPlane {
    match self.history.last() {
      Some(plane) => plane.clone(),
      None => self.engine.acc_plane(),
    }
  }

  pub fn cycles_executed(&self) -> usize {
    self.history.len()
  }

  pub fn engine(&self) -> &dyn Engine {
    self.engine.as_ref()
  }
}
