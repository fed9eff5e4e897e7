//! Toast delivery.

mod memory;

pub use memory::InMemoryToastSink;
