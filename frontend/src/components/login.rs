use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api::auth;
use crate::hooks::use_api_client;
use crate::models::Credentials;

/// Username/password form. A successful login flips the shared session,
/// which is what moves the app past the gate.
#[function_component(LoginForm)]
pub fn login_form() -> Html {
    let client = use_api_client();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }
            let credentials = Credentials {
                username: (*username).clone(),
                password: (*password).clone(),
            };
            let client = client.clone();
            let error = error.clone();
            let loading = loading.clone();
            loading.set(true);
            error.set(None);
            spawn_local(async move {
                match auth::login(&client, &credentials).await {
                    Ok(_) => log::info!("signed in as {}", credentials.username),
                    Err(err) => {
                        log::warn!("login failed: {:?}", err);
                        error.set(Some(err.to_string()));
                    }
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-[#181a20]">
            <div class="w-full max-w-sm bg-[#23272f] border border-[#333] rounded-2xl shadow-lg p-8">
                <h1 class="text-2xl font-bold text-[#90caf9] text-center mb-6">{"Daily Task Manager"}</h1>
                <form class="space-y-4" onsubmit={on_submit}>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-slate-300">{"Username"}</label>
                        <input
                            class="w-full px-4 py-2 bg-[#181a20] border border-[#333] rounded-lg text-white focus:outline-none focus:ring-2 focus:ring-[#90caf9]"
                            value={(*username).clone()}
                            oninput={{
                                let username = username.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    username.set(input.value());
                                })
                            }}
                        />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-slate-300">{"Password"}</label>
                        <input
                            type="password"
                            class="w-full px-4 py-2 bg-[#181a20] border border-[#333] rounded-lg text-white focus:outline-none focus:ring-2 focus:ring-[#90caf9]"
                            value={(*password).clone()}
                            oninput={{
                                let password = password.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    password.set(input.value());
                                })
                            }}
                        />
                    </div>

                    if let Some(msg) = &*error {
                        <div class="text-sm text-red-500">{ msg.clone() }</div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-[#90caf9] text-[#181a20] py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity disabled:opacity-50"
                        disabled={*loading}
                    >
                        { if *loading { "Signing in..." } else { "Login" } }
                    </button>
                </form>
            </div>
        </div>
    }
}
