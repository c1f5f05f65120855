//! Storage implementations for offline development and tests

pub mod in_memory;

pub use in_memory::InMemoryRepository;
