//! Customer sign-up

use crate::api;
use crate::components::{LoadingSpinner, Navbar};
use crate::state::AppState;
use crate::types::{AuthAction, AuthFailure};
use homehelp_core::{CustomerForm, Route, SessionContext};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

#[component]
pub fn RegisterCustomerPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let is_loading = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let form = CustomerForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            phone: phone.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        let registration = match form.validate() {
            Ok(r) => r,
            Err(e) => {
                error.set(Some(AuthFailure::from(e).message(AuthAction::Register)));
                return;
            }
        };

        let navigate = navigate.clone();
        spawn_local(async move {
            is_loading.set(true);
            error.set(None);

            let base_url = state.api_base.get_untracked();
            let result = api::register(base_url.as_deref(), &registration).await.and_then(|grant| {
                state
                    .establish(SessionContext::Customer, grant)
                    .map_err(|_| AuthFailure::InvalidResponse)
            });

            is_loading.set(false);
            match result {
                Ok(()) => navigate(&Route::CustomerDashboard.path(), Default::default()),
                Err(e) => {
                    tracing::warn!(?e, "customer registration failed");
                    error.set(Some(e.message(AuthAction::Register)));
                }
            }
        });
    };

    let field = move |label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <label class="flex flex-col gap-1">
                <span class="text-sm font-medium">{label}</span>
                <input
                    type=kind
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                    class="input"
                />
            </label>
        }
    };

    view! {
        <div class="min-h-screen flex flex-col">
            <Navbar />

            <div class="flex-1 flex items-center justify-center px-4 py-10">
                <div class="w-full max-w-md bg-white rounded-2xl shadow-sm border border-slate-200 p-8">
                    <h1 class="text-2xl font-bold mb-1">"Create your account"</h1>
                    <p class="text-slate-500 mb-6">"Book services and find reliable helpers"</p>

                    <Show when=move || error.get().is_some()>
                        <div class="mb-6 p-4 bg-red-50 border border-red-200 rounded-lg text-red-700 text-sm">
                            {move || error.get().unwrap_or_default()}
                        </div>
                    </Show>

                    <form on:submit=on_submit class="flex flex-col gap-4">
                        {field("Full name", "text", name)}
                        {field("Email", "email", email)}
                        {field("Phone number", "tel", phone)}
                        {field("Password", "password", password)}
                        {field("Confirm password", "password", confirm_password)}
                        <button
                            type="submit"
                            disabled=move || is_loading.get()
                            class="btn btn-primary w-full flex items-center justify-center gap-2"
                        >
                            <Show when=move || is_loading.get()>
                                <LoadingSpinner />
                            </Show>
                            "Register"
                        </button>
                    </form>

                    <p class="text-sm text-slate-500 mt-6 text-center">
                        "Already registered? "
                        <a href=Route::login(SessionContext::Customer).path() class="text-blue-600 hover:underline">"Sign in"</a>
                    </p>
                </div>
            </div>
        </div>
    }
}
