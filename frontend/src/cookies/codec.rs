//! Cookie string encoding.
//!
//! Two directions of the `document.cookie` contract:
//!
//! - writing: a single Set-Cookie style directive
//!   (`name=value; max-age=86400; path=/; SameSite=Lax`)
//! - reading: the `"; "`-joined `name=value` list the browser hands back
//!
//! Names and values are percent-encoded with the same reserved set as
//! JavaScript's `encodeURIComponent`, so cookies written here stay readable
//! by any other script on the page.

use chrono::{DateTime, NaiveDateTime, Utc};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::{Expiry, ResolvedOptions, SameSite};

/// Characters escaped by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// HTTP date format used by the `expires` attribute.
const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// `expires` value written for [`Expiry::Never`].
pub const NEVER_EXPIRES: &str = "Fri, 31 Dec 9999 23:59:59 GMT";

/// `expires` value written when deleting a cookie.
pub const EPOCH_EXPIRES: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

pub fn encode(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

/// Decode a percent-encoded name or value. Malformed UTF-8 falls back to the
/// raw text.
pub fn decode(encoded: &str) -> String {
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| encoded.to_string())
}

pub fn format_http_date(at: &DateTime<Utc>) -> String {
    at.format(HTTP_DATE).to_string()
}

pub fn parse_http_date(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw.trim(), HTTP_DATE)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Build the directive that stores `name=value` with the given attributes.
pub fn set_directive(name: &str, value: &str, options: &ResolvedOptions) -> String {
    let mut directive = format!("{}={}", encode(name), encode(value));

    match &options.expires {
        Expiry::Session => {}
        Expiry::In(duration) => {
            directive.push_str(&format!("; max-age={}", duration.num_seconds()));
        }
        Expiry::At(at) => {
            directive.push_str(&format!("; expires={}", format_http_date(at)));
        }
        Expiry::Never => {
            directive.push_str(&format!("; expires={}", NEVER_EXPIRES));
        }
    }

    push_scope(&mut directive, options.path.as_deref(), options.domain.as_deref());

    if options.secure {
        directive.push_str("; Secure");
    }
    if let Some(same_site) = options.same_site {
        directive.push_str(&format!("; SameSite={}", same_site.as_str()));
    }

    directive
}

/// Build the directive that deletes `name` within the given path/domain.
pub fn remove_directive(name: &str, path: Option<&str>, domain: Option<&str>) -> String {
    let mut directive = format!("{}=; expires={}; max-age=0", encode(name), EPOCH_EXPIRES);
    push_scope(&mut directive, path, domain);
    directive
}

fn push_scope(directive: &mut String, path: Option<&str>, domain: Option<&str>) {
    if let Some(path) = path.filter(|p| !p.is_empty()) {
        directive.push_str(&format!("; path={}", path));
    }
    if let Some(domain) = domain.filter(|d| !d.is_empty()) {
        directive.push_str(&format!("; domain={}", domain));
    }
}

/// Split a `document.cookie` string into decoded `(name, value)` pairs, in
/// the order the store reports them.
pub fn parse_cookie_string(raw: &str) -> Vec<(String, String)> {
    raw.split(';')
        .filter_map(|pair| {
            let pair = pair.trim();
            if pair.is_empty() {
                return None;
            }
            let (name, value) = pair.split_once('=').unwrap_or(("", pair));
            Some((decode(name.trim()), decode(value.trim())))
        })
        .collect()
}

/// A directive as seen by a cookie jar.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    /// Encoded name, as it will be reported back on read.
    pub name: String,
    /// Encoded value.
    pub value: String,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub max_age: Option<i64>,
    pub expires: Option<DateTime<Utc>>,
}

impl Directive {
    /// Absolute expiry of the cookie, if it has one. `max-age` wins over
    /// `expires`, as in browsers. A `max-age` beyond the representable range
    /// saturates to the latest instant.
    pub fn expiry(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.max_age {
            Some(seconds) => Some(
                chrono::Duration::try_seconds(seconds)
                    .and_then(|age| now.checked_add_signed(age))
                    .unwrap_or(if seconds < 0 {
                        DateTime::<Utc>::MIN_UTC
                    } else {
                        DateTime::<Utc>::MAX_UTC
                    }),
            ),
            None => self.expires,
        }
    }
}

/// Parse a Set-Cookie style directive. Unknown attributes (`Secure`,
/// `SameSite`, ...) are accepted and ignored.
pub fn parse_directive(raw: &str) -> Option<Directive> {
    let mut parts = raw.split(';');
    let (name, value) = parts.next()?.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let mut directive = Directive {
        name: name.to_string(),
        value: value.trim().to_string(),
        path: None,
        domain: None,
        max_age: None,
        expires: None,
    };

    for attribute in parts {
        let (key, val) = match attribute.split_once('=') {
            Some((key, val)) => (key.trim(), val.trim()),
            None => (attribute.trim(), ""),
        };
        match key.to_ascii_lowercase().as_str() {
            "path" => directive.path = Some(val.to_string()).filter(|p| !p.is_empty()),
            "domain" => directive.domain = Some(val.to_string()).filter(|d| !d.is_empty()),
            "max-age" => directive.max_age = val.parse().ok(),
            "expires" => directive.expires = parse_http_date(val),
            _ => {}
        }
    }

    Some(directive)
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn options(expires: Expiry) -> ResolvedOptions {
        ResolvedOptions {
            expires,
            path: Some("/".into()),
            domain: None,
            secure: false,
            same_site: None,
        }
    }

    #[test]
    fn test_encode_matches_encode_uri_component() {
        assert_eq!(encode("a b;c=d"), "a%20b%3Bc%3Dd");
        assert_eq!(encode("keep-_.!~*'()"), "keep-_.!~*'()");
        assert_eq!(encode("é"), "%C3%A9");
    }

    #[test]
    fn test_decode_malformed_falls_back() {
        assert_eq!(decode("%C3%A9"), "é");
        assert_eq!(decode("%FF"), "%FF");
    }

    #[test]
    fn test_set_directive_with_max_age() {
        let directive = set_directive("session", "abc", &options(Expiry::In(Duration::days(1))));
        assert_eq!(directive, "session=abc; max-age=86400; path=/");
    }

    #[test]
    fn test_set_directive_full_attributes() {
        let at = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
        let opts = ResolvedOptions {
            expires: Expiry::At(at),
            path: Some("/play".into()),
            domain: Some("example.org".into()),
            secure: true,
            same_site: Some(SameSite::Strict),
        };
        assert_eq!(
            set_directive("k", "v", &opts),
            "k=v; expires=Wed, 02 Jan 2030 03:04:05 GMT; path=/play; domain=example.org; Secure; SameSite=Strict"
        );
    }

    #[test]
    fn test_session_and_never() {
        assert_eq!(set_directive("k", "v", &options(Expiry::Session)), "k=v; path=/");
        assert!(set_directive("k", "v", &options(Expiry::Never)).contains(NEVER_EXPIRES));
    }

    #[test]
    fn test_remove_directive() {
        assert_eq!(
            remove_directive("client_id", Some("/"), None),
            "client_id=; expires=Thu, 01 Jan 1970 00:00:00 GMT; max-age=0; path=/"
        );
    }

    #[test]
    fn test_parse_cookie_string() {
        let pairs = parse_cookie_string("a=1; b=hello%20world;  ; c=");
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "hello world".to_string()),
                ("c".to_string(), String::new()),
            ]
        );
        assert!(parse_cookie_string("").is_empty());
    }

    #[test]
    fn test_parse_directive_attributes() {
        let directive = parse_directive(
            "client_id=42; expires=Thu, 01 Jan 1970 00:00:00 GMT; max-age=0; path=/; Secure",
        )
        .unwrap();
        assert_eq!(directive.name, "client_id");
        assert_eq!(directive.value, "42");
        assert_eq!(directive.path.as_deref(), Some("/"));
        assert_eq!(directive.max_age, Some(0));
        assert_eq!(directive.expires, Some(Utc.timestamp_opt(0, 0).unwrap()));
    }

    #[test]
    fn test_max_age_wins_over_expires() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let directive = parse_directive("k=v; expires=Fri, 31 Dec 9999 23:59:59 GMT; max-age=0").unwrap();
        assert_eq!(directive.expiry(now), Some(now));
    }

    #[test]
    fn test_huge_max_age_saturates() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let far = parse_directive("k=v; max-age=8640000000000").unwrap();
        assert_eq!(far.expiry(now), Some(DateTime::<Utc>::MAX_UTC));

        let huge = parse_directive(&format!("k=v; max-age={}", i64::MAX)).unwrap();
        assert_eq!(huge.expiry(now), Some(DateTime::<Utc>::MAX_UTC));

        let past = parse_directive(&format!("k=v; max-age={}", i64::MIN)).unwrap();
        assert_eq!(past.expiry(now), Some(DateTime::<Utc>::MIN_UTC));
    }

    #[test]
    fn test_parse_directive_rejects_nameless() {
        assert!(parse_directive("=v").is_none());
        assert!(parse_directive("novalue").is_none());
    }
}
