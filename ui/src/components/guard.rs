//! Route guard

use crate::state::AppState;
use homehelp_core::{Route, SessionContext};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

/// Render `children` only while `context` has a signed-in actor; otherwise
/// redirect to that context's login page.
#[component]
pub fn RequireSession(context: SessionContext, children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if !state.is_active(context) {
            tracing::debug!(%context, "no session, redirecting to login");
            navigate(&Route::login(context).path(), Default::default());
        }
    });

    move || state.is_active(context).then(|| children())
}
