mod catalog;
mod import;
mod store;
mod types;

pub use catalog::*;
pub use import::*;
pub use store::*;
pub use types::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod sqlite;

        pub use sqlite::*;
    }
}
