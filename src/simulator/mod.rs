pub mod config;
pub mod history;
pub mod mode;
pub mod records;
pub mod shell;
pub mod simulator;
pub mod utils;

pub use simulator::Simulator;
pub use utils::log;
