mod error;
mod rows;
mod workbook;

pub use error::*;
pub use rows::*;
pub use workbook::*;
