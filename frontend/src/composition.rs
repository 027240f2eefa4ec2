//! Root composition: an entry component plus the capabilities installed for
//! it.

use std::fmt;

use crate::error::{BootError, BootResult};
use crate::registry::{AppContext, Plugin, Registry};

/// Render function of an entry component, given the mounted context.
pub type RenderFn<N> = Box<dyn FnOnce(&AppContext) -> N>;

/// The component a composition is built from.
///
/// `N` is the host's node type (`leptos::View` in the browser).
pub struct Entry<N> {
    name: String,
    render: RenderFn<N>,
}

impl<N> Entry<N> {
    pub fn new<F>(name: impl Into<String>, render: F) -> Self
    where
        F: FnOnce(&AppContext) -> N + 'static,
    {
        Self {
            name: name.into(),
            render: Box::new(render),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<N> fmt::Debug for Entry<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry").field("name", &self.name).finish_non_exhaustive()
    }
}

/// An entry component with its registry, ready to be attached.
pub struct Composition<N> {
    entry: Entry<N>,
    registry: Registry,
}

impl<N> Composition<N> {
    /// Build a composition. Fails if the entry's name is not a component
    /// identifier (`[A-Z][A-Za-z0-9_]*`).
    pub fn new(entry: Entry<N>) -> BootResult<Self> {
        validate_component_name(&entry.name)?;
        Ok(Self {
            entry,
            registry: Registry::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// Install a plugin into this composition's registry.
    pub fn use_plugin<P: Plugin + 'static>(&mut self, plugin: P) -> &mut Self {
        log::debug!("🔌 Installing plugin '{}' into {}", plugin.name(), self.entry.name);
        Box::new(plugin).install(&mut self.registry);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Freeze the registry and split off the render function.
    pub fn into_parts(self) -> (AppContext, RenderFn<N>) {
        let cx = AppContext::new(&self.entry.name, self.registry);
        (cx, self.entry.render)
    }
}

fn validate_component_name(name: &str) -> BootResult<()> {
    let reason = match name.chars().next() {
        None => Some("component name is empty"),
        Some(first) if !first.is_ascii_uppercase() => {
            Some("component name must start with an uppercase letter")
        }
        Some(_) if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') => {
            Some("component name may only contain ASCII letters, digits and '_'")
        }
        Some(_) => None,
    };

    match reason {
        Some(reason) => Err(BootError::Construction {
            component: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
