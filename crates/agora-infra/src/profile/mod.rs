//! Profile loading.

mod mock;

pub use mock::MockProfileSource;
