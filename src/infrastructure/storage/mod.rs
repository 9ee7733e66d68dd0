//! Store trait and implementations

mod json_file;
mod memory;
mod traits;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::Store;
