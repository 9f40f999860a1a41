//! # autoguide-storage
//!
//! [`SessionStorage`](autoguide_core::traits::SessionStorage) backends:
//! a JSON-file store for the real client and an in-memory store for tests.

pub mod file;
pub mod memory;

pub use file::FileSessionStorage;
pub use memory::MemorySessionStorage;
