//! Chat input component

use leptos::prelude::*;

/// Single-line message box. Enter sends; blank input keeps the button disabled.
#[component]
pub fn ChatInput(
    /// Current input value
    value: RwSignal<String>,
    /// Called when user submits
    on_submit: impl Fn() + 'static + Clone,
    /// Placeholder text
    #[prop(default = "Type your message...")]
    placeholder: &'static str,
) -> impl IntoView {
    let is_empty = Signal::derive(move || value.get().trim().is_empty());

    let on_keydown = {
        let on_submit = on_submit.clone();
        move |ev: web_sys::KeyboardEvent| {
            if ev.key() == "Enter" && !ev.shift_key() {
                ev.prevent_default();
                if !is_empty.get_untracked() {
                    on_submit();
                }
            }
        }
    };

    let on_button_click = move |_| {
        if !is_empty.get_untracked() {
            on_submit();
        }
    };

    view! {
        <div class="flex items-end gap-3 p-4 bg-white border-t border-slate-200">
            <input
                type="text"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                on:keydown=on_keydown
                placeholder=placeholder
                class="flex-1 px-4 py-3 border border-slate-300 rounded-xl
                       focus:outline-none focus:ring-2 focus:ring-blue-500 focus:border-transparent"
            />
            <button
                on:click=on_button_click
                disabled=move || is_empty.get()
                class="px-5 py-3 bg-blue-600 hover:bg-blue-700 disabled:bg-slate-300
                       disabled:cursor-not-allowed rounded-xl text-white font-medium transition-colors"
            >
                "Send"
            </button>
        </div>
    }
}
