//! Customer dashboard

use crate::components::{Footer, Navbar, RequireSession};
use crate::state::AppState;
use homehelp_core::catalog::HOW_IT_WORKS;
use homehelp_core::dashboard::RequestStatus;
use homehelp_core::{CustomerDashboard, Route, ServiceCategory, SessionContext};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

/// Booking page URL with the wizard prefilled.
pub fn booking_url(service: &str, category: Option<ServiceCategory>) -> String {
    let mut url = format!(
        "{}?service={}",
        Route::BookService.path(),
        String::from(js_sys::encode_uri_component(service.trim()))
    );
    if let Some(category) = category {
        url.push_str("&category=");
        url.push_str(category.as_str());
    }
    url
}

fn status_class(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Pending => "bg-amber-100 text-amber-700",
        RequestStatus::InProgress => "bg-blue-100 text-blue-700",
        RequestStatus::Completed => "bg-green-100 text-green-700",
    }
}

#[component]
pub fn CustomerDashboardPage() -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col">
            <Navbar context=SessionContext::Customer />
            <RequireSession context=SessionContext::Customer>
                <DashboardBody />
            </RequireSession>
            <Footer />
        </div>
    }
}

#[component]
fn DashboardBody() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();
    let search = RwSignal::new(String::new());

    let Some(actor) = state.customer.with_untracked(|s| s.actor().cloned()) else {
        return ().into_any();
    };
    let dashboard = CustomerDashboard::for_actor(&actor);

    let on_search = {
        let navigate = navigate.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let query = search.get_untracked();
            if query.trim().is_empty() {
                return;
            }
            navigate(&booking_url(&query, None), Default::default());
        }
    };

    let featured = dashboard
        .featured
        .iter()
        .map(|service| {
            let navigate = navigate.clone();
            let url = booking_url(service.name, Some(service.category));
            view! {
                <button
                    on:click=move |_| navigate(&url, Default::default())
                    class="bg-white rounded-xl p-4 border border-slate-200 text-left hover:shadow-md transition-shadow"
                >
                    <p class="font-semibold">{service.name}</p>
                    <p class="text-xs text-slate-500">{service.category.label()}</p>
                    <p class="text-sm text-green-600 mt-2">{service.price.to_string()}</p>
                </button>
            }
        })
        .collect::<Vec<_>>();

    let requests = dashboard
        .recent_requests
        .iter()
        .map(|request| {
            let chat = (request.status == RequestStatus::InProgress)
                .then(|| Route::Chat(format!("request-{}", request.id)).path());
            view! {
                <tr class="border-t border-slate-100">
                    <td class="py-3">{request.service}</td>
                    <td>{request.helper}</td>
                    <td>
                        <span class=format!("px-2 py-1 rounded-full text-xs {}", status_class(request.status))>
                            {request.status.label()}
                        </span>
                    </td>
                    <td class="text-slate-500">{request.time}</td>
                    <td>
                        {chat.map(|href| view! {
                            <a href=href class="text-blue-600 hover:underline text-sm">"Chat"</a>
                        })}
                    </td>
                </tr>
            }
        })
        .collect::<Vec<_>>();

    let casual_url = format!(
        "{}?category={}",
        Route::BookService.path(),
        ServiceCategory::Casual.as_str()
    );

    view! {
        <div class="max-w-7xl mx-auto px-4 py-8 w-full flex flex-col gap-8">
            <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">{dashboard.greeting.clone()}</h1>
                    <p class="text-slate-500">"What do you need help with today?"</p>
                </div>
                <div class="bg-white rounded-xl border border-slate-200 px-5 py-3">
                    <p class="text-xs text-slate-500">"Wallet balance"</p>
                    <p class="text-2xl font-bold text-green-600">{format!("₹{}", dashboard.wallet_balance)}</p>
                </div>
            </div>

            <form on:submit=on_search class="flex gap-3">
                <input
                    type="text"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                    placeholder="Search for a service, e.g. plumbing"
                    class="input flex-1"
                />
                <button type="submit" class="btn btn-primary">"Search"</button>
            </form>

            <section>
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-xl font-semibold">"Popular services"</h2>
                    <a href=casual_url class="text-sm text-blue-600 hover:underline">"Need casual help?"</a>
                </div>
                <div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-6 gap-3">{featured}</div>
            </section>

            <div class="grid lg:grid-cols-3 gap-8">
                <section class="lg:col-span-2 bg-white rounded-xl border border-slate-200 p-6">
                    <h2 class="text-xl font-semibold mb-4">"Recent requests"</h2>
                    <table class="w-full text-sm">
                        <thead class="text-left text-slate-500">
                            <tr>
                                <th class="pb-2">"Service"</th>
                                <th>"Helper"</th>
                                <th>"Status"</th>
                                <th>"Requested"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>{requests}</tbody>
                    </table>
                </section>

                <section class="bg-white rounded-xl border border-slate-200 p-6">
                    <h2 class="text-xl font-semibold mb-4">"How it works"</h2>
                    <ol class="flex flex-col gap-3">
                        {HOW_IT_WORKS
                            .iter()
                            .enumerate()
                            .map(|(i, (title, desc))| view! {
                                <li class="flex gap-3">
                                    <span class="w-6 h-6 shrink-0 rounded-full bg-blue-100 text-blue-700 text-xs flex items-center justify-center">
                                        {i + 1}
                                    </span>
                                    <div>
                                        <p class="text-sm font-medium">{*title}</p>
                                        <p class="text-xs text-slate-500">{*desc}</p>
                                    </div>
                                </li>
                            })
                            .collect::<Vec<_>>()}
                    </ol>
                </section>
            </div>
        </div>
    }
    .into_any()
}
