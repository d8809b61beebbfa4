//! Landing page

use crate::components::{Footer, Navbar};
use homehelp_core::catalog::{self, HOW_IT_WORKS};
use homehelp_core::{Route, ServiceCategory};
use leptos::prelude::*;

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col">
            <Navbar />

            <section class="bg-gradient-to-br from-blue-600 to-cyan-500 text-white py-20">
                <div class="max-w-5xl mx-auto px-4 text-center">
                    <h1 class="text-4xl md:text-5xl font-bold mb-4">
                        "Book your service at your " <span class="text-yellow-300">"doorstep"</span>
                    </h1>
                    <p class="text-lg text-blue-50 mb-10">
                        "Plumbers, electricians, cleaners and more. Verified helpers near you."
                    </p>

                    <h2 class="text-xl font-semibold mb-4">"How do you want to register?"</h2>
                    <div class="grid md:grid-cols-2 gap-4 max-w-2xl mx-auto">
                        <a href=Route::CustomerRegistration.path() class="bg-white text-slate-900 rounded-2xl p-6 hover:shadow-lg transition-shadow">
                            <p class="text-3xl mb-2">"🙋"</p>
                            <p class="font-semibold">"I need help"</p>
                            <p class="text-sm text-slate-500">"Book services and find reliable helpers"</p>
                        </a>
                        <a href=Route::HelperRegistration.path() class="bg-white text-slate-900 rounded-2xl p-6 hover:shadow-lg transition-shadow">
                            <p class="text-3xl mb-2">"🧰"</p>
                            <p class="font-semibold">"I want to help"</p>
                            <p class="text-sm text-slate-500">"Offer your services and earn money"</p>
                        </a>
                    </div>
                </div>
            </section>

            <section class="max-w-7xl mx-auto px-4 py-16">
                <h2 class="text-2xl font-bold text-center mb-2">"How HomeHelp Works"</h2>
                <p class="text-center text-slate-500 mb-10">"Simple steps to get your work done"</p>
                <ol class="grid md:grid-cols-4 lg:grid-cols-7 gap-4">
                    {HOW_IT_WORKS
                        .iter()
                        .enumerate()
                        .map(|(i, (title, desc))| view! {
                            <li class="bg-white rounded-xl p-4 border border-slate-200 text-center">
                                <span class="inline-flex w-8 h-8 items-center justify-center rounded-full bg-blue-100 text-blue-700 font-semibold mb-2">
                                    {i + 1}
                                </span>
                                <h3 class="font-semibold text-sm">{*title}</h3>
                                <p class="text-xs text-slate-500">{*desc}</p>
                            </li>
                        })
                        .collect::<Vec<_>>()}
                </ol>
            </section>

            <section class="max-w-7xl mx-auto px-4 pb-8">
                <h2 class="text-2xl font-bold text-center mb-8">"Our Services"</h2>
                {ServiceCategory::ALL
                    .into_iter()
                    .map(|category| view! {
                        <h3 class="font-semibold text-slate-600 mb-3">{category.label()}</h3>
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-3 mb-8">
                            {catalog::services(category)
                                .iter()
                                .map(|service| view! {
                                    <div class="bg-white rounded-xl p-4 border border-slate-200">
                                        <p class="font-medium">{*service}</p>
                                        <p class="text-xs text-slate-500">"Professional and reliable service"</p>
                                    </div>
                                })
                                .collect::<Vec<_>>()}
                        </div>
                    })
                    .collect::<Vec<_>>()}
            </section>

            <Footer />
        </div>
    }
}
