//! Page controllers. Each one owns the state its screen mutates and turns
//! commands into [`Reply`](crate::reply::Reply) values.

pub mod admin;
mod comments;
mod editor;
mod notifications;
mod posts;
mod profile;
mod trash;

pub use comments::CommentsPage;
pub use editor::EditorPage;
pub use notifications::NotificationsPage;
pub use posts::PostsPage;
pub use profile::ProfilePage;
pub use trash::{Stash, TrashPage};
