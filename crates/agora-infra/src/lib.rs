//! # Agora Infrastructure
//!
//! Concrete implementations of the ports defined in `agora-core`.
//! Everything here lives in process memory: the mock fixtures the pages seed
//! from, the delayed profile loader and the toast sink.

pub mod fixtures;
pub mod profile;
pub mod toast;

pub use fixtures::StaticFixtures;
pub use profile::MockProfileSource;
pub use toast::InMemoryToastSink;
