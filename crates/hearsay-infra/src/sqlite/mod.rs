//! SQLite adapters: the shared pool and the message audit repository.

pub mod audit;
pub mod pool;
