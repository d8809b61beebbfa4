//! Login page, one instance per session context

use crate::api;
use crate::components::{LoadingSpinner, Navbar};
use crate::state::AppState;
use crate::types::{AuthAction, AuthFailure};
use homehelp_core::{Credentials, Route, SessionContext};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

/// Login page for `context`
#[component]
pub fn LoginPage(context: SessionContext) -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    // Form state
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let is_loading = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);

    // Redirect if already logged in
    let navigate_for_redirect = navigate.clone();
    Effect::new(move |_| {
        if state.is_active(context) {
            navigate_for_redirect(&Route::dashboard(context).path(), Default::default());
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let credentials = match Credentials::new(&email.get_untracked(), &password.get_untracked()) {
            Ok(c) => c,
            Err(e) => {
                error.set(Some(AuthFailure::from(e).message(AuthAction::Login)));
                return;
            }
        };

        spawn_local(async move {
            is_loading.set(true);
            error.set(None);

            let base_url = state.api_base.get_untracked();
            let result = api::login(base_url.as_deref(), context, &credentials).await.and_then(|grant| {
                state
                    .establish(context, grant)
                    .map_err(|_| AuthFailure::InvalidResponse)
            });

            is_loading.set(false);
            if let Err(e) = result {
                tracing::warn!(%context, ?e, "login failed");
                error.set(Some(e.message(AuthAction::Login)));
            }
        });
    };

    let (title, register_route) = match context {
        SessionContext::Customer => ("Customer Login", Route::CustomerRegistration),
        SessionContext::Helper => ("Helper Login", Route::HelperRegistration),
    };

    view! {
        <div class="min-h-screen flex flex-col">
            <Navbar />

            <div class="flex-1 flex items-center justify-center px-4">
                <div class="w-full max-w-md bg-white rounded-2xl shadow-sm border border-slate-200 p-8">
                    <h1 class="text-2xl font-bold mb-1">{title}</h1>
                    <p class="text-slate-500 mb-6">"Sign in to continue"</p>

                    <Show when=move || error.get().is_some()>
                        <div class="mb-6 p-4 bg-red-50 border border-red-200 rounded-lg text-red-700 text-sm">
                            {move || error.get().unwrap_or_default()}
                        </div>
                    </Show>

                    <form on:submit=on_submit class="flex flex-col gap-4">
                        <label class="flex flex-col gap-1">
                            <span class="text-sm font-medium">"Email"</span>
                            <input
                                type="email"
                                prop:value=move || email.get()
                                on:input=move |ev| email.set(event_target_value(&ev))
                                placeholder="you@example.com"
                                class="input"
                            />
                        </label>
                        <label class="flex flex-col gap-1">
                            <span class="text-sm font-medium">"Password"</span>
                            <input
                                type="password"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                                placeholder="••••••••"
                                class="input"
                            />
                        </label>
                        <button
                            type="submit"
                            disabled=move || is_loading.get()
                            class="btn btn-primary w-full flex items-center justify-center gap-2"
                        >
                            <Show when=move || is_loading.get()>
                                <LoadingSpinner />
                            </Show>
                            {move || if is_loading.get() { "Signing in..." } else { "Sign In" }}
                        </button>
                    </form>

                    <p class="text-sm text-slate-500 mt-6 text-center">
                        "New here? "
                        <a href=register_route.path() class="text-blue-600 hover:underline">"Create an account"</a>
                    </p>
                </div>
            </div>
        </div>
    }
}
