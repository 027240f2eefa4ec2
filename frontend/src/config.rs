//! Application configuration.
//!
//! Fixed identifiers live here as constants. The tunable part of startup is
//! [`BootConfig`], which the page may override with a JSON block:
//!
//! ```html
//! <script type="application/json" id="anagrams-config">
//!   { "onMountError": "silent-log", "logLevel": "info", "cookies": { "expire": "7d" } }
//! </script>
//! ```

use serde::{Deserialize, Serialize};

use crate::cookies::CookieDefaults;
use crate::error::BootResult;

/// Application name, used in the document title and logs.
pub const APP_NAME: &str = "Anagrams";

/// Source repository, linked from the footer.
pub const REPOSITORY_URL: &str = env!("CARGO_PKG_REPOSITORY");

/// Id of the element the composition is mounted into.
pub const ANCHOR_ID: &str = "app";

/// Id given to the injected global `<style>` element.
pub const STYLE_ELEMENT_ID: &str = "anagrams-global-style";

/// Id of the optional JSON configuration block.
pub const CONFIG_ELEMENT_ID: &str = "anagrams-config";

/// Registry key of the cookie capability.
pub const COOKIE_PLUGIN_KEY: &str = "$cookie";

/// Attribute set on the anchor while a composition is mounted into it.
pub const MOUNTED_ATTR: &str = "data-anagrams-mounted";

/// Attribute naming the composition on its mounted container.
pub const COMPOSITION_ATTR: &str = "data-composition";

/// Cookie the game server uses to recognise a returning browser.
pub const CLIENT_ID_COOKIE: &str = "client_id";

/// Global style sheet applied at boot.
pub const GLOBAL_STYLESHEET: &str = include_str!("../styles/index.css");

/// What `initialize` does when mounting fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MountErrorPolicy {
    /// Return the error to the caller (the wasm entry point throws it).
    #[default]
    Throw,
    /// Log the error and carry on with nothing mounted.
    SilentLog,
}

/// Startup configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BootConfig {
    pub anchor_id: String,
    pub on_mount_error: MountErrorPolicy,
    pub log_level: String,
    pub cookies: CookieDefaults,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            anchor_id: ANCHOR_ID.to_string(),
            on_mount_error: MountErrorPolicy::default(),
            log_level: "debug".to_string(),
            cookies: CookieDefaults::default(),
        }
    }
}

impl BootConfig {
    pub fn from_json(raw: &str) -> BootResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Configured log level; unknown names fall back to `Debug`.
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Debug)
    }
}
