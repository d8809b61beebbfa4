//! Helper dashboard with the job offer popup

use crate::clock;
use crate::components::{Footer, Navbar, NotificationPopup, RequireSession};
use crate::state::AppState;
use homehelp_core::{HelperDashboard, OfferInbox, SessionContext};
use leptos::prelude::*;

#[component]
pub fn HelperDashboardPage() -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col">
            <Navbar context=SessionContext::Helper />
            <RequireSession context=SessionContext::Helper>
                <DashboardBody />
            </RequireSession>
            <Footer />
        </div>
    }
}

#[component]
fn DashboardBody() -> impl IntoView {
    let state = expect_context::<AppState>();
    let Some(actor) = state.helper.with_untracked(|s| s.actor().cloned()) else {
        return ().into_any();
    };
    let dashboard = HelperDashboard::for_actor(&actor);

    // One simulated offer per mount, matching the helper's category
    let category = actor.role.helper_category().unwrap_or_default();
    let inbox = RwSignal::new(OfferInbox::for_helper(category, state.timings.get_value()));
    clock::drive(inbox);

    let pending = Memo::new(move |_| inbox.with(|i| i.pending().len()));
    let stats = dashboard.stats.clone();

    let stat_card = |label: &'static str, value: String| {
        view! {
            <div class="bg-white rounded-xl border border-slate-200 p-5">
                <p class="text-xs text-slate-500">{label}</p>
                <p class="text-2xl font-bold">{value}</p>
            </div>
        }
    };

    view! {
        <div class="max-w-7xl mx-auto px-4 py-8 w-full flex flex-col gap-8">
            <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">{dashboard.greeting.clone()}</h1>
                    <p class="text-slate-500">{dashboard.headline.clone()}</p>
                </div>
                <Show when=move || { pending.get() > 0 }>
                    <button
                        on:click=move |_| {
                            inbox.update(|i| {
                                i.show_next();
                            })
                        }
                        class="btn btn-primary"
                    >
                        {move || format!("Job requests ({})", pending.get())}
                    </button>
                </Show>
            </div>

            <div class="grid grid-cols-2 lg:grid-cols-5 gap-4">
                {stat_card("Total earnings", format!("₹{}", stats.total_earnings))}
                {stat_card("This month", format!("₹{}", stats.monthly_earnings))}
                {stat_card("Completed jobs", stats.completed_jobs.to_string())}
                {stat_card("Rating", format!("{:.1} ★", stats.rating))}
                {stat_card("Response time", stats.response_time.to_string())}
            </div>

            <section class="bg-white rounded-xl border border-slate-200 p-6">
                <h2 class="text-xl font-semibold mb-4">"Recent jobs"</h2>
                <table class="w-full text-sm">
                    <thead class="text-left text-slate-500">
                        <tr>
                            <th class="pb-2">"Service"</th>
                            <th>"Client"</th>
                            <th>"Amount"</th>
                            <th>"Status"</th>
                            <th>"When"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {dashboard
                            .recent_jobs
                            .iter()
                            .map(|job| view! {
                                <tr class="border-t border-slate-100">
                                    <td class="py-3">{job.service}</td>
                                    <td>{job.client}</td>
                                    <td>{format!("₹{}", job.amount)}</td>
                                    <td>{job.status.label()}</td>
                                    <td class="text-slate-500">{job.date}</td>
                                </tr>
                            })
                            .collect::<Vec<_>>()}
                    </tbody>
                </table>
            </section>

            <NotificationPopup inbox=inbox />
        </div>
    }
    .into_any()
}
