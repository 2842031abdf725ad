//! Storage slot backings and the JSON record store built on them

pub mod file;
pub mod in_memory;
pub mod json;

pub use file::FileSlot;
pub use in_memory::InMemorySlot;
pub use json::JsonRecordStore;
