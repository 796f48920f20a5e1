//! Subcommand handlers.

mod add;
mod delete;
mod list;

pub use add::add;
pub use delete::{delete, mass_delete};
pub use list::list;
