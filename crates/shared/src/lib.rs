mod quantity;
mod week;

pub use quantity::*;
pub use week::*;
