//! Command implementations for gcloud-switcher.
//!
//! Each command is a thin caller of the store and/or the switch workflow.
//! The cloud SDK and the interactive input source are injected so every
//! command can be exercised in tests without gcloud or a terminal.

pub mod add;
pub mod current;
pub mod edit;
pub mod list;
pub mod remove;
pub mod switch;
pub mod version;

pub use add::add_configuration;
pub use current::show_current;
pub use edit::edit_configuration;
pub use list::list_configurations;
pub use remove::remove_configuration;
pub use switch::switch_command;
pub use version::{BuildInfo, print_version};
