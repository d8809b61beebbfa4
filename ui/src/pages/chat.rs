//! Chat page - simulated conversation between customer and helper

use crate::clock;
use crate::components::{ChatInput, ChatMessage, Navbar, TypingIndicator};
use crate::state::AppState;
use homehelp_core::{Conversation, Route, Sender, SessionContext};
use leptos::prelude::*;
use leptos_router::hooks::{use_params_map, use_query_map};
use rand::rngs::StdRng;
use rand::SeedableRng;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

/// Side the visitor chats as: `?as=` if given, else customer when a
/// customer is signed in, else helper.
fn viewer(state: &AppState, requested: Option<String>) -> SessionContext {
    if let Some(context) = requested.and_then(|r| r.parse::<SessionContext>().ok()) {
        return context;
    }
    if state.customer.with_untracked(|s| s.is_active()) {
        SessionContext::Customer
    } else {
        SessionContext::Helper
    }
}

/// Chat page for `/chat/:chatId`
#[component]
pub fn ChatPage() -> impl IntoView {
    let params = use_params_map();

    // Remount the conversation when the id changes
    move || {
        let id = params.with(|p| p.get("chatId")).unwrap_or_default();
        view! { <ChatRoom id=id /> }
    }
}

#[component]
fn ChatRoom(id: String) -> impl IntoView {
    let state = expect_context::<AppState>();
    let query = use_query_map();
    let viewer = viewer(&state, query.with_untracked(|q| q.get("as")));

    let seed = js_sys::Date::now() as u64;
    let conversation = RwSignal::new(Conversation::open(
        id,
        viewer,
        chrono::Utc::now(),
        state.timings.get_value(),
        StdRng::seed_from_u64(seed),
    ));
    let page_clock = clock::drive(conversation);
    on_cleanup(move || {
        conversation.try_update(|c| c.close());
    });

    let input = RwSignal::new(String::new());
    let messages_end_ref = NodeRef::<leptos::html::Div>::new();

    let counterpart = conversation.with_untracked(|c| c.counterpart());
    let own = Sender::of(viewer);
    let back = Route::dashboard(viewer).path();

    // Auto-scroll to bottom when new messages arrive
    Effect::new(move |_| {
        conversation.with(|c| c.messages().len());
        if let Some(el) = messages_end_ref.get() {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            el.scroll_into_view_with_scroll_into_view_options(&options);
        }
    });

    let on_submit = move || {
        let text = input.get_untracked();
        let mut sent = true;
        conversation.update(|c| {
            if let Err(e) = c.send(&text, page_clock.elapsed()) {
                tracing::debug!("message not sent: {}", e);
                sent = false;
            }
        });
        if sent {
            input.set(String::new());
        }
    };

    view! {
        <div class="h-screen flex flex-col">
            <Navbar />

            <div class="bg-white border-b border-slate-200">
                <div class="max-w-3xl mx-auto px-4 py-3 flex items-center gap-4">
                    <a href=back class="text-slate-500 hover:text-slate-800">"←"</a>
                    <div>
                        <p class="font-semibold">{counterpart.name}</p>
                        <p class="text-xs text-slate-500">
                            {counterpart.title} " · "
                            <span class="text-green-600">{counterpart.status}</span>
                        </p>
                    </div>
                </div>
            </div>

            <div class="flex-1 overflow-y-auto bg-slate-50">
                <div class="max-w-3xl mx-auto px-4 py-6 flex flex-col gap-4">
                    <For
                        each=move || conversation.with(|c| c.messages().to_vec())
                        key=|message| message.id
                        children=move |message| view! { <ChatMessage message=message own=own /> }
                    />
                    <Show when=move || conversation.with(|c| c.pending_replies() > 0)>
                        <TypingIndicator name=counterpart.name />
                    </Show>
                    <div node_ref=messages_end_ref></div>
                </div>
            </div>

            <div class="max-w-3xl mx-auto w-full">
                <ChatInput value=input on_submit=on_submit />
            </div>
        </div>
    }
}
