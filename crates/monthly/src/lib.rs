mod aggregate;
mod log;

pub use aggregate::*;
pub use log::*;
