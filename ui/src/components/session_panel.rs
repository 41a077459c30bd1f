use payloads::RequestOptions;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::{use_api, use_auth};

/// Paste a bearer token, check it against the backend, or drop it.
#[function_component]
pub fn SessionPanel() -> Html {
    let session = use_auth();
    let api = use_api();
    let token_ref = use_node_ref();
    let status = use_state(|| None::<String>);

    let on_submit = {
        let token_ref = token_ref.clone();
        let login = session.login.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(input) = token_ref.cast::<HtmlInputElement>() {
                login.emit(input.value());
                input.set_value("");
            }
        })
    };

    let on_check = {
        let api = api.clone();
        let status = status.clone();

        Callback::from(move |_: MouseEvent| {
            let api = api.clone();
            let status = status.clone();

            yew::platform::spawn_local(async move {
                let message = match api
                    .request("/api/health_check", RequestOptions::get())
                    .await
                {
                    Ok(response) => format!("Backend answered {}", response.status()),
                    Err(e) => e.to_string(),
                };
                status.set(Some(message));
            });
        })
    };

    let on_logout = {
        let logout = session.logout.clone();
        let status = status.clone();
        Callback::from(move |_: MouseEvent| {
            status.set(None);
            logout.emit(());
        })
    };

    html! {
        <div class="flex flex-wrap items-center gap-3 text-sm">
            if api.has_token() {
                <span class="text-neutral-600 dark:text-neutral-400">{"Token set"}</span>
                <button class="px-3 py-1 rounded border" onclick={on_check}>
                    {"Check session"}
                </button>
                <button class="px-3 py-1 rounded border" onclick={on_logout}>
                    {"Log out"}
                </button>
            } else {
                <form class="flex gap-2" onsubmit={on_submit}>
                    <input
                        ref={token_ref}
                        type="password"
                        placeholder="API token"
                        class="px-2 py-1 rounded border"
                    />
                    <button type="submit" class="px-3 py-1 rounded border">
                        {"Use token"}
                    </button>
                </form>
            }
            if let Some(message) = (*status).clone() {
                <span class="text-neutral-600 dark:text-neutral-400">{message}</span>
            }
        </div>
    }
}
