use payloads::APIClient;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod components;
pub mod contexts;
pub mod hooks;
pub mod logs;
pub mod pages;
pub mod state;
pub mod utils;

pub use state::{AuthState, State};

use contexts::AethelgardProvider;
use hooks::DEFAULT_REFRESH_INTERVAL_MS;

// Global API client - configurable via environment or same-origin fallback
pub fn get_api_client() -> APIClient {
    // Try environment variable first (set at build time)
    let address = option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .or_else(|| web_sys::window()?.location().origin().ok())
        .unwrap_or_default();

    APIClient {
        address,
        inner_client: reqwest::Client::new(),
    }
}

/// Polling period baked in at build time, e.g.
/// `REFRESH_INTERVAL_MS=2000 trunk serve`.
fn refresh_interval_ms() -> u32 {
    option_env!("REFRESH_INTERVAL_MS")
        .and_then(|ms| ms.parse().ok())
        .unwrap_or(DEFAULT_REFRESH_INTERVAL_MS)
}

#[function_component]
pub fn App() -> Html {
    html! {
        <BrowserRouter>
            <AethelgardProvider refresh_interval_ms={refresh_interval_ms()}>
                <div class="min-h-screen bg-white dark:bg-gray-900 text-gray-900 dark:text-gray-100 transition-colors">
                    <Switch<Route> render={switch} />
                </div>
            </AethelgardProvider>
        </BrowserRouter>
    }
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! {
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <pages::HeatmapPage />
            </main>
        },
        Route::NotFound => html! {
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <div class="text-center">
                    <h1 class="text-4xl font-bold text-gray-900 dark:text-white">{"404"}</h1>
                    <p class="text-gray-600 dark:text-gray-300">{"Page not found"}</p>
                </div>
            </main>
        },
    }
}
