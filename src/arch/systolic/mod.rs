pub mod array;
pub mod feeder;
pub mod pe;

pub use array::SystolicArray;
pub use feeder::Feeder;
pub use pe::{Grid, Pe};
