//! One-shot startup sequence.
//!
//! ```text
//! initialize(entry, store)
//!   1. Composition::new(entry)          -- malformed entry: BootError::Construction
//!   2. use_plugin(CookiePlugin)         -- "$cookie" resolvable from here on
//!   3. host.apply_stylesheet(css)       -- owned by a guard until mount succeeds
//!   4. host.find_anchor + host.attach   -- missing anchor: BootError::AnchorNotFound
//! ```
//!
//! Errors are returned or logged according to [`MountErrorPolicy`]. Any step
//! failing after 3 removes the style sheet again, so a failed boot leaves the
//! document as it found it.

use std::fmt;
use std::rc::Rc;

use crate::composition::{Composition, Entry};
use crate::config::{BootConfig, MountErrorPolicy, GLOBAL_STYLESHEET};
use crate::cookies::CookieStore;
use crate::error::{BootError, BootResult};
use crate::host::Host;
use crate::registry::{AppContext, CookiePlugin};

/// What [`Bootstrapper::initialize`] did.
pub enum BootOutcome<H: Host> {
    /// The composition is attached; dropping the handle tears it down.
    Mounted(MountHandle<H>),
    /// The anchor already holds a composition. Nothing was attached.
    AlreadyMounted,
    /// Mounting failed under [`MountErrorPolicy::SilentLog`]; the error has
    /// been logged.
    Suppressed(BootError),
}

impl<H: Host> BootOutcome<H> {
    pub fn is_mounted(&self) -> bool {
        matches!(self, BootOutcome::Mounted(_))
    }
}

impl<H: Host> fmt::Debug for BootOutcome<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootOutcome::Mounted(handle) => f.debug_tuple("Mounted").field(&handle.component()).finish(),
            BootOutcome::AlreadyMounted => f.write_str("AlreadyMounted"),
            BootOutcome::Suppressed(err) => f.debug_tuple("Suppressed").field(err).finish(),
        }
    }
}

/// Wires capability, styling and anchor together for one host.
pub struct Bootstrapper<H: Host> {
    host: H,
    config: BootConfig,
    stylesheet: String,
}

impl<H: Host> Bootstrapper<H> {
    pub fn new(host: H, config: BootConfig) -> Self {
        Self {
            host,
            config,
            stylesheet: GLOBAL_STYLESHEET.to_string(),
        }
    }

    /// Replace the bundled global style sheet.
    pub fn with_stylesheet(mut self, css: impl Into<String>) -> Self {
        self.stylesheet = css.into();
        self
    }

    pub fn config(&self) -> &BootConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Run the startup sequence once.
    pub fn initialize(
        &self,
        entry: Entry<H::Node>,
        store: Rc<dyn CookieStore>,
    ) -> BootResult<BootOutcome<H>> {
        match self.run(entry, store) {
            Ok(outcome) => Ok(outcome),
            Err(err) => match self.config.on_mount_error {
                MountErrorPolicy::Throw => Err(err),
                MountErrorPolicy::SilentLog => {
                    log::error!("❌ Mount failed: {}", err);
                    Ok(BootOutcome::Suppressed(err))
                }
            },
        }
    }

    fn run(&self, entry: Entry<H::Node>, store: Rc<dyn CookieStore>) -> BootResult<BootOutcome<H>> {
        let mut composition = Composition::new(entry)?;
        log::debug!("🧩 Composition '{}' constructed", composition.name());

        composition.use_plugin(CookiePlugin::new(store, self.config.cookies.clone()));

        let style = StyleGuard::apply(&self.host, &self.stylesheet);

        let anchor = self
            .host
            .find_anchor(&self.config.anchor_id)
            .ok_or_else(|| BootError::AnchorNotFound(self.config.anchor_id.clone()))?;

        if self.host.is_mounted(&anchor) {
            log::warn!(
                "⏭️  '#{}' already holds a composition, skipping mount",
                self.config.anchor_id
            );
            return Ok(BootOutcome::AlreadyMounted);
        }

        let (context, render) = composition.into_parts();
        let mount = self.host.attach(&anchor, context.clone(), render)?;
        log::info!("✅ {} mounted on '#{}'", context.component(), self.config.anchor_id);

        Ok(BootOutcome::Mounted(MountHandle {
            host: self.host.clone(),
            anchor,
            mount: Some(mount),
            style: style.commit(),
            context,
        }))
    }
}

/// Removes an injected style sheet unless the boot it belongs to succeeds.
struct StyleGuard<'a, H: Host> {
    host: &'a H,
    style: Option<H::Style>,
}

impl<'a, H: Host> StyleGuard<'a, H> {
    fn apply(host: &'a H, css: &str) -> Self {
        let style = host.apply_stylesheet(css);
        if style.is_some() {
            log::debug!("🎨 Global styles applied");
        }
        Self { host, style }
    }

    fn commit(mut self) -> Option<H::Style> {
        self.style.take()
    }
}

impl<H: Host> Drop for StyleGuard<'_, H> {
    fn drop(&mut self) {
        if let Some(style) = self.style.take() {
            self.host.remove_stylesheet(&style);
        }
    }
}

/// A live composition. Dropping it (or calling [`unmount`](Self::unmount))
/// detaches the composition and removes the style sheet it injected.
pub struct MountHandle<H: Host> {
    host: H,
    anchor: H::Anchor,
    mount: Option<H::Mount>,
    style: Option<H::Style>,
    context: AppContext,
}

impl<H: Host> MountHandle<H> {
    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn component(&self) -> &str {
        self.context.component()
    }

    pub fn unmount(self) {
        drop(self);
    }

    /// Keep the composition mounted for the lifetime of the page.
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl<H: Host> Drop for MountHandle<H> {
    fn drop(&mut self) {
        if let Some(mount) = self.mount.take() {
            self.host.detach(&self.anchor, mount);
            log::debug!("🧹 {} unmounted", self.context.component());
        }
        if let Some(style) = self.style.take() {
            self.host.remove_stylesheet(&style);
        }
    }
}
