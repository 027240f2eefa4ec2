//! The hosting page, driven through `web_sys` and mounted with Leptos.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::Host;
use crate::composition::RenderFn;
use crate::config::{COMPOSITION_ATTR, CONFIG_ELEMENT_ID, MOUNTED_ATTR, STYLE_ELEMENT_ID};
use crate::error::{BootError, BootResult};
use crate::registry::AppContext;
use crate::BootConfig;

/// The page's `document`.
#[derive(Clone)]
pub struct BrowserHost {
    document: Document,
}

impl BrowserHost {
    /// Host for the global window's document.
    pub fn new() -> BootResult<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(BootError::NoDocument)?;
        Ok(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Boot configuration from the page's JSON block, or the defaults when
    /// there is none.
    pub fn read_config(&self) -> BootResult<BootConfig> {
        match self
            .document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        {
            Some(raw) if !raw.trim().is_empty() => BootConfig::from_json(&raw),
            _ => Ok(BootConfig::default()),
        }
    }

    fn inject_style(&self, css: &str) -> BootResult<Element> {
        let style = self.document.create_element("style")?;
        style.set_id(STYLE_ELEMENT_ID);
        style.set_text_content(Some(css));

        match self.document.head() {
            Some(head) => head.append_child(&style)?,
            None => self
                .document
                .document_element()
                .ok_or(BootError::NoDocument)?
                .append_child(&style)?,
        };
        Ok(style)
    }
}

impl Host for BrowserHost {
    type Anchor = HtmlElement;
    type Node = View;
    type Style = Element;
    type Mount = HtmlElement;

    fn apply_stylesheet(&self, css: &str) -> Option<Element> {
        if self.document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
            log::debug!("🎨 Global styles already present");
            return None;
        }
        match self.inject_style(css) {
            Ok(style) => Some(style),
            Err(e) => {
                log::warn!("🎨 Could not inject global styles: {}", e);
                None
            }
        }
    }

    fn remove_stylesheet(&self, style: &Element) {
        style.remove();
    }

    fn find_anchor(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn is_mounted(&self, anchor: &HtmlElement) -> bool {
        anchor.has_attribute(MOUNTED_ATTR)
    }

    fn attach(
        &self,
        anchor: &HtmlElement,
        context: AppContext,
        render: RenderFn<View>,
    ) -> BootResult<HtmlElement> {
        let container = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| BootError::Js("created <div> is not an HtmlElement".to_string()))?;
        container.set_attribute(COMPOSITION_ATTR, context.component())?;
        insert_marked(anchor, &container, MOUNTED_ATTR, context.component())?;

        mount_to(container.clone(), move || {
            view! { <CompositionRoot context=context render=render/> }
        });

        Ok(container)
    }

    fn detach(&self, anchor: &HtmlElement, mount: HtmlElement) {
        mount.remove();
        if let Err(e) = anchor.remove_attribute(MOUNTED_ATTR) {
            log::warn!("Could not clear mount marker: {:?}", e);
        }
    }
}

/// Append `container` to `anchor` and mark the anchor as mounted. The
/// container is taken out again if the marker cannot be written.
fn insert_marked(
    anchor: &HtmlElement,
    container: &HtmlElement,
    marker: &str,
    component: &str,
) -> BootResult<()> {
    anchor.append_child(container)?;
    if let Err(e) = anchor.set_attribute(marker, component) {
        container.remove();
        return Err(e.into());
    }
    Ok(())
}

/// Makes the context available to the whole tree, then renders the entry.
#[component]
fn CompositionRoot(context: AppContext, render: RenderFn<View>) -> impl IntoView {
    provide_context(context.clone());
    render(&context)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn element(host: &BrowserHost) -> HtmlElement {
        host.document()
            .create_element("div")
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn test_insert_marked_sets_marker() {
        let host = BrowserHost::new().unwrap();
        let (anchor, container) = (element(&host), element(&host));

        insert_marked(&anchor, &container, MOUNTED_ATTR, "App").unwrap();

        assert_eq!(anchor.child_element_count(), 1);
        assert_eq!(anchor.get_attribute(MOUNTED_ATTR).as_deref(), Some("App"));
    }

    #[wasm_bindgen_test]
    fn test_failed_marker_leaves_anchor_empty() {
        let host = BrowserHost::new().unwrap();
        let (anchor, container) = (element(&host), element(&host));

        let err = insert_marked(&anchor, &container, "not a valid name", "App").unwrap_err();

        assert!(matches!(err, BootError::Js(_)));
        assert_eq!(anchor.child_element_count(), 0);
        assert!(container.parent_node().is_none());
    }
}
