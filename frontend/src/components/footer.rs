//! Footer component

use leptos::*;

use crate::config::{APP_NAME, REPOSITORY_URL};

/// Game tagline, source link and build version.
#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <p class="tagline">{APP_NAME} " • make words from a shared pool of letters"</p>
            <p>
                <a href=REPOSITORY_URL target="_blank" rel="noopener">"Source"</a>
                " • v" {env!("CARGO_PKG_VERSION")}
            </p>
        </footer>
    }
}
