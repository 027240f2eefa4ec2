//! Client identity cookie.
//!
//! The game server recognises a returning browser by its `client_id` cookie.
//! A browser without one gets a fresh id pushed over the game socket as
//!
//! ```json
//! {"action": "set_cookie", "name": "client_id", "value": "9f0c…"}
//! ```
//!
//! which the client persists through the cookie capability. Only this
//! directive is handled here; every other server message belongs to the game
//! itself.

use serde::Deserialize;

use crate::config::CLIENT_ID_COOKIE;
use crate::cookies::{CookieOptions, Cookies};

/// A server message, as far as the cookie layer is concerned.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ServerDirective {
    /// Persist a cookie on the server's behalf.
    SetCookie { name: String, value: String },
    /// Anything else.
    #[serde(other)]
    Other,
}

/// Parse a raw server message and apply it if it is a `set_cookie`
/// directive. Returns whether a cookie was written.
pub fn apply_directive(cookies: &Cookies, raw: &str) -> Result<bool, serde_json::Error> {
    match serde_json::from_str::<ServerDirective>(raw)? {
        ServerDirective::SetCookie { name, value } => {
            match cookies.set(&name, &value, &CookieOptions::default()) {
                Ok(()) => {
                    log::debug!("🍪 Server set cookie '{}'", name);
                    Ok(true)
                }
                Err(e) => {
                    log::warn!("🍪 Server cookie rejected: {}", e);
                    Ok(false)
                }
            }
        }
        ServerDirective::Other => Ok(false),
    }
}

/// The id the server assigned to this browser, if one was persisted.
pub fn client_id(cookies: &Cookies) -> Option<String> {
    cookies
        .get(CLIENT_ID_COOKIE)
        .filter(|id| !id.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::{CookieDefaults, CookieStore, MemoryCookieStore};
    use std::rc::Rc;

    fn cookies(store: &MemoryCookieStore) -> Cookies {
        Cookies::new(Rc::new(store.clone()), CookieDefaults::default())
    }

    #[test]
    fn test_set_cookie_directive_persists_client_id() {
        let store = MemoryCookieStore::new();
        let cookies = cookies(&store);
        assert_eq!(client_id(&cookies), None);

        let written = apply_directive(
            &cookies,
            r#"{"action": "set_cookie", "name": "client_id", "value": "2f1e7c3a-5d6b-4c8e-9a0f-1b2c3d4e5f60"}"#,
        )
        .unwrap();

        assert!(written);
        assert_eq!(
            client_id(&cookies).as_deref(),
            Some("2f1e7c3a-5d6b-4c8e-9a0f-1b2c3d4e5f60")
        );
        assert!(store.read().starts_with("client_id="));
    }

    #[test]
    fn test_other_actions_ignored() {
        let store = MemoryCookieStore::new();
        let cookies = cookies(&store);
        let written = apply_directive(
            &cookies,
            r#"{"action": "game_state", "players": [], "letter_pool": ["A"], "game_id": "ABCD"}"#,
        )
        .unwrap();
        assert!(!written);
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_cookie_name_not_written() {
        let store = MemoryCookieStore::new();
        let written =
            apply_directive(&cookies(&store), r#"{"action": "set_cookie", "name": "", "value": "x"}"#)
                .unwrap();
        assert!(!written);
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_message_is_error() {
        let store = MemoryCookieStore::new();
        assert!(apply_directive(&cookies(&store), "not json").is_err());
        assert!(apply_directive(&cookies(&store), r#"{"name": "client_id"}"#).is_err());
    }

    #[test]
    fn test_blank_client_id_is_absent() {
        let store = MemoryCookieStore::new();
        let cookies = cookies(&store);
        cookies.set(CLIENT_ID_COOKIE, "", &CookieOptions::default()).unwrap();
        assert_eq!(client_id(&cookies), None);
    }
}
