//! Root component.

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::components::{Footer, Lobby};
use crate::config::APP_NAME;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/*any" view=Lobby/>
                </Routes>
            </main>
        </Router>
        <Footer/>
    }
}
