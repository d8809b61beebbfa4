//! Chat message component

use homehelp_core::{Message, MessageKind, Sender};
use leptos::prelude::*;

/// Render a single chat message. `own` is the viewer's side.
#[component]
pub fn ChatMessage(message: Message, own: Sender) -> impl IntoView {
    if message.kind == MessageKind::System {
        return view! {
            <div class="flex justify-center my-2">
                <span class="px-3 py-1 text-xs text-slate-500 bg-slate-100 rounded-full">
                    {message.body}
                </span>
            </div>
        }
        .into_any();
    }

    let is_own = message.sender == own;
    view! {
        <div class=format!(
            "flex items-start gap-3 message-appear {}",
            if is_own { "flex-row-reverse" } else { "" }
        )>
            <div class=format!(
                "flex flex-col gap-1 max-w-[80%] {}",
                if is_own { "items-end" } else { "items-start" }
            )>
                <div class=format!(
                    "px-4 py-3 rounded-2xl whitespace-pre-wrap break-words {}",
                    if is_own {
                        "bg-blue-600 text-white rounded-tr-sm"
                    } else {
                        "bg-white border border-slate-200 text-slate-800 rounded-tl-sm"
                    }
                )>
                    {message.body}
                </div>
                <span class="text-xs text-slate-400 mt-1">
                    {message
                        .created_at
                        .with_timezone(&chrono::Local)
                        .format("%H:%M")
                        .to_string()}
                </span>
            </div>
        </div>
    }
    .into_any()
}
