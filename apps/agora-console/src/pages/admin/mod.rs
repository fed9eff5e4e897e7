//! Administrator tabs.

mod blinded;
mod categories;
mod logs;
mod reports;
mod settings;
pub mod stats;
mod users;

pub use blinded::BlindPage;
pub use categories::CategoriesPage;
pub use logs::LogsPage;
pub use reports::ReportsPage;
pub use settings::SettingsPage;
pub use users::UsersPage;
