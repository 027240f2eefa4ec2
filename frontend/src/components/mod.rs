//! UI components of the Anagrams shell.
//!
//! - [`App`] - router root and entry component of the composition
//! - [`Lobby`] - landing screen
//! - [`Footer`] - page footer
//!
//! The game itself mounts below [`App`]; the bootstrapper only relies on
//! [`App`] rendering into a Leptos `View`.

mod app;
mod footer;
mod lobby;

pub use app::*;
pub use footer::*;
pub use lobby::*;
