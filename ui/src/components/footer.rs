use homehelp_core::{Route, SessionContext};
use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="bg-slate-900 text-slate-400 py-8 mt-16">
            <div class="max-w-7xl mx-auto px-4 flex flex-col md:flex-row justify-between gap-6">
                <div>
                    <p class="text-white font-semibold">"HomeHelp"</p>
                    <p class="text-sm">"Trusted helpers for every home."</p>
                </div>
                <div class="flex gap-6 text-sm">
                    <a href=Route::CustomerRegistration.path() class="hover:text-white">"Book a helper"</a>
                    <a href=Route::HelperRegistration.path() class="hover:text-white">"Become a helper"</a>
                    <a href=Route::login(SessionContext::Helper).path() class="hover:text-white">"Helper login"</a>
                </div>
            </div>
        </footer>
    }
}
