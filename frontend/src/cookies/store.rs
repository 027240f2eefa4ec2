//! Backing stores for the cookie capability.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlDocument};

use super::codec;
use crate::error::{BootError, BootResult};

/// The raw `document.cookie` contract.
///
/// `read` returns the `"; "`-joined list of currently visible `name=value`
/// pairs; `write` applies a single Set-Cookie style directive. Neither can
/// fail: a store that cannot persist simply ignores the write.
pub trait CookieStore {
    fn read(&self) -> String;
    fn write(&self, directive: &str);
}

// =============================================================================
// Browser store
// =============================================================================

/// `document.cookie` of the hosting page.
#[derive(Clone)]
pub struct BrowserCookieStore {
    document: HtmlDocument,
}

impl BrowserCookieStore {
    pub fn new(document: &Document) -> BootResult<Self> {
        let document = document
            .clone()
            .dyn_into::<HtmlDocument>()
            .map_err(|_| BootError::Js("document is not an HTML document".to_string()))?;
        Ok(Self { document })
    }
}

impl CookieStore for BrowserCookieStore {
    fn read(&self) -> String {
        match self.document.cookie() {
            Ok(raw) => raw,
            Err(e) => {
                log::debug!("🍪 document.cookie unreadable: {:?}", e);
                String::new()
            }
        }
    }

    fn write(&self, directive: &str) {
        if let Err(e) = self.document.set_cookie(directive) {
            log::warn!("🍪 Cookie write dropped: {:?}", e);
        }
    }
}

// =============================================================================
// In-memory store
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct StoredCookie {
    name: String,
    value: String,
    path: Option<String>,
    domain: Option<String>,
    expires_at: Option<chrono::DateTime<Utc>>,
}

impl StoredCookie {
    fn same_slot(&self, other: &codec::Directive) -> bool {
        self.name == other.name && self.path == other.path && self.domain == other.domain
    }

    fn is_live(&self, now: chrono::DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |at| at > now)
    }
}

/// In-memory cookie jar with browser semantics.
///
/// Cookies are keyed by (name, path, domain), reported in creation order, and
/// dropped once `max-age` / `expires` has passed. A `disabled()` jar models a
/// browser with cookies turned off: reads are empty and writes are ignored.
#[derive(Clone, Debug, Default)]
pub struct MemoryCookieStore {
    jar: Rc<RefCell<Vec<StoredCookie>>>,
    disabled: bool,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disabled() -> Self {
        Self {
            jar: Rc::default(),
            disabled: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    /// Number of live cookies across all paths and domains.
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.jar.borrow().iter().filter(|c| c.is_live(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CookieStore for MemoryCookieStore {
    fn read(&self) -> String {
        if self.disabled {
            return String::new();
        }
        let now = Utc::now();
        self.jar
            .borrow()
            .iter()
            .filter(|c| c.is_live(now))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&self, directive: &str) {
        if self.disabled {
            return;
        }
        let Some(parsed) = codec::parse_directive(directive) else {
            log::warn!("🍪 Ignoring malformed cookie directive {:?}", directive);
            return;
        };

        let now = Utc::now();
        let expires_at = parsed.expiry(now);
        let mut jar = self.jar.borrow_mut();
        jar.retain(|c| c.is_live(now));

        let slot = jar.iter().position(|c| c.same_slot(&parsed));
        if expires_at.is_some_and(|at| at <= now) {
            if let Some(index) = slot {
                jar.remove(index);
            }
            return;
        }

        let cookie = StoredCookie {
            name: parsed.name,
            value: parsed.value,
            path: parsed.path,
            domain: parsed.domain,
            expires_at,
        };
        match slot {
            Some(index) => jar[index] = cookie,
            None => jar.push(cookie),
        }
    }
}
