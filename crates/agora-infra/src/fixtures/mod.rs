//! Mock board data.

mod embedded;

pub use embedded::StaticFixtures;
