pub mod order;
pub mod server;
