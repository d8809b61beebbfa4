//! Helper sign-up, professional or casual

use crate::api;
use crate::components::{LoadingSpinner, Navbar};
use crate::state::AppState;
use crate::types::{AuthAction, AuthFailure};
use homehelp_core::{HelperForm, Photo, Role, Route, SessionContext};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

async fn read_photo(file: File) -> Option<Photo> {
    let buffer = JsFuture::from(file.array_buffer()).await.ok()?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let content_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };
    Some(Photo {
        file_name: file.name(),
        content_type,
        bytes,
    })
}

#[component]
pub fn RegisterHelperPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    let role = RwSignal::new(Role::ProfessionalHelper);
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let address = RwSignal::new(String::new());
    let profession = RwSignal::new(String::new());
    let identity_number = RwSignal::new(String::new());
    let photo = RwSignal::new(Option::<Photo>::None);
    let is_loading = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);

    let on_photo = move |ev: web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let Some(file) = file else {
            photo.set(None);
            return;
        };
        spawn_local(async move {
            let loaded = read_photo(file).await;
            if loaded.is_none() {
                tracing::warn!("could not read the selected photo");
            }
            photo.set(loaded);
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let form = HelperForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            phone: phone.get_untracked(),
            password: password.get_untracked(),
            address: address.get_untracked(),
            profession: profession.get_untracked(),
            identity_number: identity_number.get_untracked(),
            photo: photo.get_untracked(),
        };
        let registration = match form.validate(role.get_untracked()) {
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
                    .establish(SessionContext::Helper, grant)
                    .map_err(|_| AuthFailure::InvalidResponse)
            });

            is_loading.set(false);
            match result {
                Ok(()) => navigate(&Route::HelperDashboard.path(), Default::default()),
                Err(e) => {
                    tracing::warn!(?e, "helper registration failed");
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

    let role_button = move |option: Role| {
        view! {
            <button
                type="button"
                on:click=move |_| role.set(option)
                class=move || {
                    if role.get() == option {
                        "flex-1 py-2 rounded-lg bg-blue-600 text-white font-medium"
                    } else {
                        "flex-1 py-2 rounded-lg bg-slate-100 text-slate-700"
                    }
                }
            >
                {option.label()}
            </button>
        }
    };

    view! {
        <div class="min-h-screen flex flex-col">
            <Navbar />

            <div class="flex-1 flex items-center justify-center px-4 py-10">
                <div class="w-full max-w-lg bg-white rounded-2xl shadow-sm border border-slate-200 p-8">
                    <h1 class="text-2xl font-bold mb-1">"Become a helper"</h1>
                    <p class="text-slate-500 mb-6">"Offer your services and earn money"</p>

                    <Show when=move || error.get().is_some()>
                        <div class="mb-6 p-4 bg-red-50 border border-red-200 rounded-lg text-red-700 text-sm">
                            {move || error.get().unwrap_or_default()}
                        </div>
                    </Show>

                    <form on:submit=on_submit class="flex flex-col gap-4">
                        <div class="flex gap-2">
                            {role_button(Role::ProfessionalHelper)}
                            {role_button(Role::CasualHelper)}
                        </div>
                        {field("Full name", "text", name)}
                        {field("Email", "email", email)}
                        {field("Phone number", "tel", phone)}
                        {field("Password", "password", password)}
                        <Show when=move || role.get() == Role::ProfessionalHelper>
                            {field("Profession", "text", profession)}
                        </Show>
                        {field("Address", "text", address)}
                        {field("Aadhar number", "text", identity_number)}
                        <label class="flex flex-col gap-1">
                            <span class="text-sm font-medium">"Profile photo"</span>
                            <input type="file" accept="image/*" on:change=on_photo class="text-sm" />
                        </label>
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
                        <a href=Route::login(SessionContext::Helper).path() class="text-blue-600 hover:underline">"Sign in"</a>
                    </p>
                </div>
            </div>
        </div>
    }
}
