//! In-browser checks of the `web_sys` backed host and cookie store.
//!
//! Run with `wasm-pack test --headless --firefox frontend`.

#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use anagrams_ui::{
    BootConfig, BootError, BootOutcome, Bootstrapper, BrowserCookieStore, BrowserHost,
    CookieDefaults, CookieOptions, Cookies, Entry, Host, MountErrorPolicy, MOUNTED_ATTR,
    STYLE_ELEMENT_ID,
};
use leptos::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn host() -> BrowserHost {
    BrowserHost::new().expect("browser document")
}

fn add_anchor(host: &BrowserHost, id: &str) -> web_sys::Element {
    let anchor = host.document().create_element("div").unwrap();
    anchor.set_id(id);
    host.document().body().unwrap().append_child(&anchor).unwrap();
    anchor
}

fn cookies(host: &BrowserHost) -> Cookies {
    let store = BrowserCookieStore::new(host.document()).unwrap();
    Cookies::new(Rc::new(store), CookieDefaults::default())
}

#[wasm_bindgen_test]
fn browser_cookie_round_trip() {
    let cookies = cookies(&host());

    cookies.set("anagrams_test", "tiles & words", &CookieOptions::default()).unwrap();
    assert_eq!(cookies.get("anagrams_test").as_deref(), Some("tiles & words"));
    assert!(cookies.keys().contains(&"anagrams_test".to_string()));

    cookies.remove("anagrams_test");
    assert_eq!(cookies.get("anagrams_test"), None);
}

#[wasm_bindgen_test]
fn missing_anchor_leaves_no_style() {
    let config = BootConfig {
        anchor_id: "no-such-anchor".into(),
        ..BootConfig::default()
    };
    let host = host();
    let store = BrowserCookieStore::new(host.document()).unwrap();
    let bootstrapper = Bootstrapper::new(host.clone(), config);

    let err = bootstrapper
        .initialize(Entry::new("App", |_| view! { <p>"unused"</p> }.into_view()), Rc::new(store))
        .unwrap_err();

    assert_eq!(err, BootError::AnchorNotFound("no-such-anchor".into()));
    assert!(host.document().get_element_by_id(STYLE_ELEMENT_ID).is_none());
}

#[wasm_bindgen_test]
fn mount_then_unmount() {
    let host = host();
    let anchor = add_anchor(&host, "mount-test");
    let config = BootConfig {
        anchor_id: "mount-test".into(),
        on_mount_error: MountErrorPolicy::Throw,
        ..BootConfig::default()
    };
    let store = BrowserCookieStore::new(host.document()).unwrap();
    let bootstrapper = Bootstrapper::new(host.clone(), config);

    let entry = Entry::new("App", |cx: &anagrams_ui::AppContext| {
        let ready = cx.cookies().is_some();
        view! { <p id="mount-test-probe">{if ready { "ready" } else { "missing" }}</p> }.into_view()
    });
    let outcome = bootstrapper.initialize(entry, Rc::new(store)).unwrap();

    let probe = host.document().get_element_by_id("mount-test-probe").unwrap();
    assert_eq!(probe.text_content().as_deref(), Some("ready"));
    assert!(anchor.has_attribute(MOUNTED_ATTR));
    assert!(host.find_anchor("mount-test").is_some_and(|a| host.is_mounted(&a)));

    let handle = match outcome {
        BootOutcome::Mounted(handle) => handle,
        other => panic!("expected a mount, got {:?}", other),
    };
    handle.unmount();

    assert!(host.document().get_element_by_id("mount-test-probe").is_none());
    assert!(!anchor.has_attribute(MOUNTED_ATTR));
    assert!(host.document().get_element_by_id(STYLE_ELEMENT_ID).is_none());
    anchor.remove();
}
