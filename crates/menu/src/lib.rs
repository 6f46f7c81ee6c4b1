mod order;
mod weekly;

pub use order::*;
pub use weekly::*;
