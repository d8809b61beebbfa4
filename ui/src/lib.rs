//! HomeHelp web frontend
//!
//! Leptos client for the HomeHelp marketplace. All domain state (sessions,
//! booking wizard, simulated chat, offer inbox) comes from `homehelp-core`;
//! this crate renders it, stores tokens in `localStorage` and drives view
//! clocks with browser timers.

pub mod api;
pub mod clock;
pub mod components;
pub mod pages;
pub mod state;
pub mod types;

use homehelp_core::SessionContext;
use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

use pages::{
    book_service::BookServicePage, chat::ChatPage, customer_dashboard::CustomerDashboardPage,
    helper_dashboard::HelperDashboardPage, landing::LandingPage, login::LoginPage,
    register_customer::RegisterCustomerPage, register_helper::RegisterHelperPage,
};
use state::AppState;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    // One state object per page load, handed down through context
    provide_context(AppState::new());

    view! {
        <Router>
            <main class="min-h-screen bg-slate-50 text-slate-900">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=LandingPage />
                    <Route path=path!("/register/user") view=RegisterCustomerPage />
                    <Route path=path!("/register/helper") view=RegisterHelperPage />
                    <Route
                        path=path!("/user-login")
                        view=|| view! { <LoginPage context=SessionContext::Customer /> }
                    />
                    <Route
                        path=path!("/helper-login")
                        view=|| view! { <LoginPage context=SessionContext::Helper /> }
                    />
                    <Route path=path!("/dashboard/user") view=CustomerDashboardPage />
                    <Route path=path!("/dashboard/helper") view=HelperDashboardPage />
                    <Route path=path!("/book-service") view=BookServicePage />
                    <Route path=path!("/chat/:chatId") view=ChatPage />
                </Routes>
            </main>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-slate-400 mb-4">"404"</h1>
                <p class="text-xl text-slate-500 mb-8">"Page not found"</p>
                <a href="/" class="btn btn-primary">"Go Home"</a>
            </div>
        </div>
    }
}
