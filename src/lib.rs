pub mod arch;
pub mod simulator;

pub use arch::{create_engine, AccPlane, AccT, ElemT, Engine, Matrix};
pub use simulator::history::History;
pub use simulator::mode::{ArchType, SimConfig, StepMode};
pub use simulator::utils::log;
pub use simulator::Simulator;
