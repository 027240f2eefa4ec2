//! Landing screen.

use leptos::*;

use crate::registry::use_cookies;
use crate::session::client_id;

const TITLE_TILES: [char; 8] = ['A', 'N', 'A', 'G', 'R', 'A', 'M', 'S'];

#[component]
pub fn Lobby() -> impl IntoView {
    let returning = use_cookies().and_then(|cookies| client_id(&cookies)).is_some();
    if !returning {
        log::debug!("👋 No client id cookie yet");
    }

    view! {
        <div class="tiles">
            {TITLE_TILES
                .iter()
                .map(|letter| view! { <span class="tile">{letter.to_string()}</span> })
                .collect_view()}
        </div>
        <div class="lobby">
            <h1>"Anagrams"</h1>
            <p class="subtitle">
                {if returning {
                    "Welcome back! Rejoin your game or start a new one."
                } else {
                    "Steal words, rearrange letters, outscore your friends."
                }}
            </p>
        </div>
    }
}
