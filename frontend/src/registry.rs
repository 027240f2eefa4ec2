//! Capability registry and plugins.
//!
//! A [`Composition`](crate::Composition) collects capabilities into a
//! [`Registry`] while it is being built. At mount time the registry is frozen
//! into an [`AppContext`] that is handed explicitly to the entry component and
//! provided as Leptos context to everything below it.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use leptos::use_context;

use crate::config::COOKIE_PLUGIN_KEY;
use crate::cookies::{CookieDefaults, CookieStore, Cookies};

/// Capabilities keyed by their conventional lookup name.
#[derive(Default)]
pub struct Registry {
    entries: HashMap<&'static str, Rc<dyn Any>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` under `key`, replacing any earlier entry.
    pub fn provide<T: 'static>(&mut self, key: &'static str, value: T) {
        if self.entries.insert(key, Rc::new(value)).is_some() {
            log::warn!("🔁 Capability '{}' registered twice, keeping the latest", key);
        }
    }

    /// Look up `key`. Returns `None` when absent or of a different type.
    pub fn resolve<T: Clone + 'static>(&self, key: &str) -> Option<T> {
        self.entries.get(key)?.downcast_ref::<T>().cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("Registry").field("keys", &keys).finish()
    }
}

/// Something that installs capabilities into a composition's registry.
pub trait Plugin {
    fn name(&self) -> &'static str;
    fn install(self: Box<Self>, registry: &mut Registry);
}

/// Installs [`Cookies`] under [`COOKIE_PLUGIN_KEY`].
pub struct CookiePlugin {
    store: Rc<dyn CookieStore>,
    defaults: CookieDefaults,
}

impl CookiePlugin {
    pub fn new(store: Rc<dyn CookieStore>, defaults: CookieDefaults) -> Self {
        Self { store, defaults }
    }
}

impl Plugin for CookiePlugin {
    fn name(&self) -> &'static str {
        "cookies"
    }

    fn install(self: Box<Self>, registry: &mut Registry) {
        let CookiePlugin { store, defaults } = *self;
        registry.provide(COOKIE_PLUGIN_KEY, Cookies::new(store, defaults));
    }
}

/// Read-only view of a mounted composition's registry.
#[derive(Clone, Debug)]
pub struct AppContext {
    component: Rc<str>,
    registry: Rc<Registry>,
}

impl AppContext {
    pub fn new(component: &str, registry: Registry) -> Self {
        Self {
            component: Rc::from(component),
            registry: Rc::new(registry),
        }
    }

    /// Name of the entry component this context belongs to.
    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn resolve<T: Clone + 'static>(&self, key: &str) -> Option<T> {
        self.registry.resolve(key)
    }

    pub fn cookies(&self) -> Option<Cookies> {
        self.resolve(COOKIE_PLUGIN_KEY)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// The [`AppContext`] of the composition currently rendering.
pub fn use_app_context() -> Option<AppContext> {
    use_context::<AppContext>()
}

/// The cookie capability, resolved from the enclosing composition.
pub fn use_cookies() -> Option<Cookies> {
    use_app_context().and_then(|cx| cx.cookies())
}
