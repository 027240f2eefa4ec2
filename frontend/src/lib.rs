//! Anagrams - Frontend Rust/Leptos Application
//!
//! The WebAssembly client of the Anagrams word game. This crate owns the
//! startup sequence: build the root composition, install the cookie
//! capability, apply global styles, and mount onto `#app`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  start()                                                     │
//! │   ├── BrowserHost (document)      BootConfig (#anagrams-config)│
//! │   └── Bootstrapper::initialize                               │
//! │        ├── 1. Composition::new(Entry "App")                  │
//! │        ├── 2. CookiePlugin  -> Registry["$cookie"]           │
//! │        ├── 3. global <style>                                 │
//! │        └── 4. attach to #app -> MountHandle                  │
//! ├──────────────────────────────────────────────────────────────┤
//! │  App (black box)                                             │
//! │   └── use_cookies() / use_app_context()                      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`boot`] - the one-shot bootstrapper and mount handle
//! - [`composition`] - entry component + capability registry
//! - [`registry`] - capability registry, plugins and context lookup
//! - [`cookies`] - cookie-access capability and its stores
//! - [`host`] - browser and in-memory documents
//! - [`session`] - client id cookie set by the game server
//! - [`components`] - UI shell
//! - [`config`] - constants and boot configuration
//! - [`error`] - error types

use std::rc::Rc;

use leptos::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod boot;
pub mod components;
pub mod composition;
pub mod config;
pub mod cookies;
pub mod error;
pub mod host;
pub mod registry;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use boot::{BootOutcome, Bootstrapper, MountHandle};
pub use components::*;
pub use composition::{Composition, Entry, RenderFn};
pub use config::*;
pub use cookies::{
    BrowserCookieStore, CookieDefaults, CookieOptions, CookieStore, Cookies, Expiry,
    MemoryCookieStore, SameSite,
};
pub use error::{BootError, BootResult, CookieError, CookieResult};
pub use host::{BrowserHost, Host, MemoryHost};
pub use registry::{use_app_context, use_cookies, AppContext, CookiePlugin, Plugin, Registry};

// =============================================================================
// Application Entry Point
// =============================================================================

/// Boot the application in the current page.
///
/// Returns an error only under the `throw` mount-error policy (or when the
/// page has no document / an unreadable config block).
pub fn start() -> BootResult<()> {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    let host = BrowserHost::new()?;
    let config = host.read_config()?;

    _ = console_log::init_with_level(config.log_level());

    log::info!("🦀 {} - Starting Leptos App", APP_NAME);

    let store = BrowserCookieStore::new(host.document())?;
    let bootstrapper = Bootstrapper::new(host, config);
    let entry = Entry::new("App", |_| view! { <App/> }.into_view());

    match bootstrapper.initialize(entry, Rc::new(store))? {
        BootOutcome::Mounted(handle) => handle.forget(),
        BootOutcome::AlreadyMounted => log::warn!("{} is already running on this page", APP_NAME),
        BootOutcome::Suppressed(_) => {}
    }

    Ok(())
}
