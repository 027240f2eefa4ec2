//! Cookie-access capability.
//!
//! [`Cookies`] is the service installed into every composition at boot. It
//! offers `get` / `set` / `remove` over a [`CookieStore`], which is either the
//! browser's `document.cookie` ([`BrowserCookieStore`]) or an in-memory jar
//! with the same semantics ([`MemoryCookieStore`]).
//!
//! ```rust,ignore
//! let cookies = use_cookies().expect("cookie capability installed at boot");
//! cookies.set("player", "Ada", &CookieOptions::default().expires(Expiry::Never))?;
//! assert_eq!(cookies.get("player").as_deref(), Some("Ada"));
//! ```
//!
//! When the host has cookies disabled, reads return `None` and writes are
//! silently dropped. Callers must not assume a write persisted.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CookieError, CookieResult};

pub mod codec;
mod store;

pub use store::*;

/// Attribute names a cookie may not be called.
const RESERVED_NAMES: &[&str] = &["expires", "max-age", "path", "domain", "secure", "samesite"];

// =============================================================================
// Options
// =============================================================================

/// When a cookie stops being sent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Expiry {
    /// Dropped when the browser session ends.
    Session,
    /// Relative lifetime, written as `max-age`.
    In(Duration),
    /// Absolute expiry, written as `expires`.
    At(DateTime<Utc>),
    /// Written as the far-future `expires` date.
    Never,
}

impl FromStr for Expiry {
    type Err = String;

    /// Accepts `"0"` (session), `"Infinity"`, an HTTP date, a bare number of
    /// seconds, or a number with a unit: `s`, `min`, `h`, `d`, `m` (30 days),
    /// `y` (365 days).
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("infinity") {
            return Ok(Expiry::Never);
        }
        if let Some(at) = codec::parse_http_date(raw) {
            return Ok(Expiry::At(at));
        }

        let split = raw
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(raw.len());
        let (digits, unit) = raw.split_at(split);
        let amount: i64 = digits
            .parse()
            .map_err(|_| format!("invalid expiry {:?}", raw))?;

        let duration = match unit.to_ascii_lowercase().as_str() {
            "" | "s" => Duration::try_seconds(amount),
            "min" => Duration::try_minutes(amount),
            "h" => Duration::try_hours(amount),
            "d" => Duration::try_days(amount),
            "m" => amount.checked_mul(30).and_then(Duration::try_days),
            "y" => amount.checked_mul(365).and_then(Duration::try_days),
            other => return Err(format!("unknown expiry unit {:?} in {:?}", other, raw)),
        }
        .ok_or_else(|| format!("expiry out of range: {:?}", raw))?;

        if duration.num_seconds() == 0 {
            Ok(Expiry::Session)
        } else {
            Ok(Expiry::In(duration))
        }
    }
}

impl TryFrom<String> for Expiry {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<Expiry> for String {
    fn from(expiry: Expiry) -> Self {
        expiry.to_string()
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expiry::Session => write!(f, "0"),
            Expiry::In(duration) => write!(f, "{}s", duration.num_seconds()),
            Expiry::At(at) => write!(f, "{}", codec::format_http_date(at)),
            Expiry::Never => write!(f, "Infinity"),
        }
    }
}

/// `SameSite` cookie attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// Per-call cookie attributes. Anything left `None` falls back to the
/// capability's [`CookieDefaults`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CookieOptions {
    pub expires: Option<Expiry>,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: Option<bool>,
    pub same_site: Option<SameSite>,
}

impl CookieOptions {
    pub fn expires(mut self, expires: Expiry) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }
}

/// Defaults applied to every write, configurable through `BootConfig`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CookieDefaults {
    pub expire: Expiry,
    pub path: String,
    pub domain: Option<String>,
    pub secure: bool,
    pub same_site: Option<SameSite>,
}

impl Default for CookieDefaults {
    fn default() -> Self {
        Self {
            expire: Expiry::In(Duration::days(1)),
            path: "/".to_string(),
            domain: None,
            secure: false,
            same_site: None,
        }
    }
}

/// Options after merging a call's [`CookieOptions`] over [`CookieDefaults`].
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedOptions {
    pub expires: Expiry,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: bool,
    pub same_site: Option<SameSite>,
}

impl CookieDefaults {
    pub fn resolve(&self, options: &CookieOptions) -> ResolvedOptions {
        ResolvedOptions {
            expires: options.expires.clone().unwrap_or_else(|| self.expire.clone()),
            path: options.path.clone().or_else(|| Some(self.path.clone())),
            domain: options.domain.clone().or_else(|| self.domain.clone()),
            secure: options.secure.unwrap_or(self.secure),
            same_site: options.same_site.or(self.same_site),
        }
    }
}

// =============================================================================
// Capability
// =============================================================================

/// The cookie-access capability shared by every component of a composition.
///
/// Cloning is cheap; all clones talk to the same store. There is no write
/// arbitration beyond the store's own last-write-wins behavior.
#[derive(Clone)]
pub struct Cookies {
    store: Rc<dyn CookieStore>,
    defaults: Rc<CookieDefaults>,
}

impl Cookies {
    pub fn new(store: Rc<dyn CookieStore>, defaults: CookieDefaults) -> Self {
        Self {
            store,
            defaults: Rc::new(defaults),
        }
    }

    pub fn defaults(&self) -> &CookieDefaults {
        &self.defaults
    }

    /// Value of the first cookie called `name`, if any.
    pub fn get(&self, name: &str) -> Option<String> {
        codec::parse_cookie_string(&self.store.read())
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Store `value` under `name`. Only an invalid name is an error; a store
    /// that ignores the write (cookies disabled) still returns `Ok`.
    pub fn set(&self, name: &str, value: &str, options: &CookieOptions) -> CookieResult<()> {
        validate_name(name)?;
        let resolved = self.defaults.resolve(options);
        self.store.write(&codec::set_directive(name, value, &resolved));
        Ok(())
    }

    /// Delete `name` using the default path and domain.
    pub fn remove(&self, name: &str) {
        self.remove_with(name, &CookieOptions::default());
    }

    /// Delete `name` within an explicit path/domain.
    pub fn remove_with(&self, name: &str, options: &CookieOptions) {
        if validate_name(name).is_err() {
            log::warn!("🍪 Ignoring remove of invalid cookie name {:?}", name);
            return;
        }
        let resolved = self.defaults.resolve(options);
        self.store.write(&codec::remove_directive(
            name,
            resolved.path.as_deref(),
            resolved.domain.as_deref(),
        ));
    }

    pub fn is_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names of all readable cookies.
    pub fn keys(&self) -> Vec<String> {
        codec::parse_cookie_string(&self.store.read())
            .into_iter()
            .map(|(key, _)| key)
            .filter(|key| !key.is_empty())
            .collect()
    }
}

impl fmt::Debug for Cookies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cookies")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

fn validate_name(name: &str) -> CookieResult<()> {
    let has_separator = name
        .chars()
        .any(|c| matches!(c, '=' | ';' | ',' | ' ' | '\t' | '\r' | '\n'));
    let reserved = RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name));

    if name.is_empty() || has_separator || reserved {
        return Err(CookieError::InvalidName(name.to_string()));
    }
    Ok(())
}
