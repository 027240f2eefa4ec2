//! Hosting documents the bootstrapper can drive.
//!
//! - [`BrowserHost`] - the real page, through `web_sys` and Leptos
//! - [`MemoryHost`] - an in-memory document for headless runs and tests

use crate::composition::RenderFn;
use crate::error::BootResult;
use crate::registry::AppContext;

mod browser;
mod memory;

pub use browser::*;
pub use memory::*;

/// The document side effects of bootstrapping.
///
/// Hosts are cheap handles: clones refer to the same document.
pub trait Host: Clone + 'static {
    /// Element a composition is attached to.
    type Anchor: Clone;
    /// What an entry component renders to.
    type Node: 'static;
    /// An injected style sheet owned by the caller.
    type Style;
    /// A live attachment.
    type Mount;

    /// Inject the global style sheet. Returns `None` when the document already
    /// carries it, in which case the caller owns nothing.
    fn apply_stylesheet(&self, css: &str) -> Option<Self::Style>;

    fn remove_stylesheet(&self, style: &Self::Style);

    fn find_anchor(&self, id: &str) -> Option<Self::Anchor>;

    /// Whether `anchor` already holds a composition.
    fn is_mounted(&self, anchor: &Self::Anchor) -> bool;

    /// Render the composition into `anchor`. The context is resolvable from
    /// within the render.
    fn attach(
        &self,
        anchor: &Self::Anchor,
        context: AppContext,
        render: RenderFn<Self::Node>,
    ) -> BootResult<Self::Mount>;

    fn detach(&self, anchor: &Self::Anchor, mount: Self::Mount);
}
