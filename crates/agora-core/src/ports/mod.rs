//! Ports - trait definitions for everything the board reads from or pushes to.
//! Infrastructure provides the implementations.

mod fixtures;
mod profile;
mod toast;

pub use fixtures::{BoardFixtures, FixtureError};
pub use profile::{ProfileError, ProfileSource};
pub use toast::{Toast, ToastError, ToastSink, ToastVariant};
