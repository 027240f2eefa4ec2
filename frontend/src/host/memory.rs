//! In-memory document.
//!
//! Anchors are plain ids; rendered nodes are whatever the entry component
//! returns as a `String`. Used for headless runs and for exercising the
//! bootstrap sequence off the browser.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::Host;
use crate::composition::RenderFn;
use crate::error::BootResult;
use crate::registry::AppContext;

#[derive(Debug, Clone, PartialEq)]
struct Mounted {
    id: u64,
    component: String,
    node: String,
}

#[derive(Debug, Default)]
struct MemoryDocument {
    anchors: BTreeMap<String, Vec<Mounted>>,
    styles: Vec<(u64, String)>,
    next_id: u64,
}

impl MemoryDocument {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryHost {
    document: Rc<RefCell<MemoryDocument>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty element with the given id.
    pub fn with_anchor(self, id: &str) -> Self {
        self.document
            .borrow_mut()
            .anchors
            .entry(id.to_string())
            .or_default();
        self
    }

    /// Nodes currently rendered into `id`, in attach order.
    pub fn rendered(&self, id: &str) -> Vec<String> {
        self.document
            .borrow()
            .anchors
            .get(id)
            .map(|mounted| mounted.iter().map(|m| m.node.clone()).collect())
            .unwrap_or_default()
    }

    /// Names of the compositions mounted into `id`.
    pub fn compositions(&self, id: &str) -> Vec<String> {
        self.document
            .borrow()
            .anchors
            .get(id)
            .map(|mounted| mounted.iter().map(|m| m.component.clone()).collect())
            .unwrap_or_default()
    }

    pub fn stylesheets(&self) -> Vec<String> {
        self.document
            .borrow()
            .styles
            .iter()
            .map(|(_, css)| css.clone())
            .collect()
    }
}

impl Host for MemoryHost {
    type Anchor = String;
    type Node = String;
    type Style = u64;
    type Mount = u64;

    fn apply_stylesheet(&self, css: &str) -> Option<u64> {
        let mut document = self.document.borrow_mut();
        if document.styles.iter().any(|(_, existing)| existing == css) {
            return None;
        }
        let id = document.next_id();
        document.styles.push((id, css.to_string()));
        Some(id)
    }

    fn remove_stylesheet(&self, style: &u64) {
        self.document.borrow_mut().styles.retain(|(id, _)| id != style);
    }

    fn find_anchor(&self, id: &str) -> Option<String> {
        self.document
            .borrow()
            .anchors
            .contains_key(id)
            .then(|| id.to_string())
    }

    fn is_mounted(&self, anchor: &String) -> bool {
        self.document
            .borrow()
            .anchors
            .get(anchor)
            .is_some_and(|mounted| !mounted.is_empty())
    }

    fn attach(
        &self,
        anchor: &String,
        context: AppContext,
        render: RenderFn<String>,
    ) -> BootResult<u64> {
        // Render before borrowing: the entry may read the document through
        // other handles.
        let node = render(&context);

        let mut document = self.document.borrow_mut();
        let id = document.next_id();
        document
            .anchors
            .entry(anchor.clone())
            .or_default()
            .push(Mounted {
                id,
                component: context.component().to_string(),
                node,
            });
        Ok(id)
    }

    fn detach(&self, anchor: &String, mount: u64) {
        if let Some(mounted) = self.document.borrow_mut().anchors.get_mut(anchor) {
            mounted.retain(|m| m.id != mount);
        }
    }
}
