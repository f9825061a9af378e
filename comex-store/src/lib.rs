pub mod app_config;
pub mod fault;
pub mod memory;

pub use app_config::Config;
pub use fault::{FaultStore, StoreOp};
pub use memory::MemoryStore;
