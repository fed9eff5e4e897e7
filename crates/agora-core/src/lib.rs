//! # Agora Core
//!
//! The domain layer of the Agora board.
//! Entities, the in-memory collections that own every mutating board
//! operation, and the ports the console talks to. No I/O lives here.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::DomainError;
