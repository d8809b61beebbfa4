//! Navigation bar

use crate::state::AppState;
use homehelp_core::{Route, SessionContext};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

/// Top bar. On a dashboard, pass the page's `context` to show who is
/// signed in and a sign-out button for that context only.
#[component]
pub fn Navbar(#[prop(optional)] context: Option<SessionContext>) -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    let actor_name = Signal::derive(move || {
        context
            .and_then(|ctx| state.actor(ctx))
            .map(|actor| actor.name)
    });

    view! {
        <header class="h-16 sticky top-0 z-40 bg-white border-b border-slate-200">
            <div class="h-full max-w-7xl mx-auto px-4 flex items-center justify-between">
                <a href="/" class="flex items-center gap-2 hover:opacity-80 transition-opacity">
                    <span class="text-2xl">"🏠"</span>
                    <span class="text-xl font-bold text-blue-600">"HomeHelp"</span>
                </a>

                <nav class="flex items-center gap-3">
                    {move || match (context, actor_name.get()) {
                        (Some(ctx), Some(name)) => {
                            let navigate = navigate.clone();
                            view! {
                                <span class="text-sm text-slate-600">{name}</span>
                                <button
                                    on:click=move |_| {
                                        state.logout(ctx);
                                        navigate(&Route::Landing.path(), Default::default());
                                    }
                                    class="btn btn-ghost"
                                >
                                    "Sign Out"
                                </button>
                            }
                                .into_any()
                        }
                        _ => view! {
                            <a href=Route::login(SessionContext::Customer).path() class="btn btn-ghost">
                                "Customer Login"
                            </a>
                            <a href=Route::login(SessionContext::Helper).path() class="btn btn-primary">
                                "Helper Login"
                            </a>
                        }
                            .into_any(),
                    }}
                </nav>
            </div>
        </header>
    }
}
