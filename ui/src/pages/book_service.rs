//! Four-step booking wizard

use crate::clock::{self, PageClock};
use crate::components::{Navbar, RequireSession};
use crate::state::AppState;
use homehelp_core::catalog::{self, NEXT_STEPS, STEP_LABELS};
use homehelp_core::{BookingFlow, BookingStep, ServiceCategory, SessionContext, Timings, Urgency};
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

#[component]
pub fn BookServicePage() -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col">
            <Navbar context=SessionContext::Customer />
            <RequireSession context=SessionContext::Customer>
                <Wizard />
            </RequireSession>
        </div>
    }
}

/// Flow for the query string: `service` preselects a service, `category`
/// (or the catalog) picks its category.
fn initial_flow(service: Option<String>, category: Option<String>, timings: Timings) -> BookingFlow {
    let category = category.and_then(|c| c.parse::<ServiceCategory>().ok());
    match service.filter(|s| !s.trim().is_empty()) {
        Some(service) => {
            let category = category
                .or_else(|| catalog::category_of(&service))
                .unwrap_or_default();
            BookingFlow::prefilled(&service, category, timings)
        }
        None => {
            let mut flow = BookingFlow::new(timings);
            if let Some(category) = category {
                if let Err(e) = flow.select_category(category) {
                    tracing::warn!(%category, "category from query ignored: {}", e);
                }
            }
            flow
        }
    }
}

#[component]
fn Wizard() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();
    let query = use_query_map();

    let (service, category) =
        query.with_untracked(|q| (q.get("service"), q.get("category")));
    let flow = RwSignal::new(initial_flow(service, category, state.timings.get_value()));
    let page_clock = clock::drive(flow);
    let error = RwSignal::new(Option::<String>::None);

    // Leave for the dashboard once the confirmation delay is over
    Effect::new(move |_| {
        if let Some(route) = flow.with(BookingFlow::redirect) {
            navigate(&route.path(), Default::default());
        }
    });

    let step = Memo::new(move |_| flow.with(BookingFlow::step));

    view! {
        <div class="max-w-3xl mx-auto px-4 py-8 w-full">
            <ProgressBar step=step />

            <Show when=move || error.get().is_some()>
                <div class="mb-6 p-4 bg-red-50 border border-red-200 rounded-lg text-red-700 text-sm">
                    {move || error.get().unwrap_or_default()}
                </div>
            </Show>

            <div class="bg-white rounded-2xl border border-slate-200 p-6">
                {move || match step.get() {
                    BookingStep::SelectingService => view! { <ServiceStep flow=flow error=error /> }.into_any(),
                    BookingStep::EnteringLocation => view! { <LocationStep flow=flow error=error /> }.into_any(),
                    BookingStep::EnteringDetails => {
                        view! { <DetailsStep flow=flow error=error page_clock=page_clock /> }.into_any()
                    }
                    BookingStep::Confirmed => view! { <Confirmation flow=flow /> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn ProgressBar(step: Memo<BookingStep>) -> impl IntoView {
    view! {
        <ol class="flex items-center gap-2 mb-8">
            {STEP_LABELS
                .iter()
                .enumerate()
                .map(|(i, label)| view! {
                    <li class="flex-1">
                        <div class=move || {
                            if i <= step.get().index() { "h-2 rounded-full bg-blue-600" } else { "h-2 rounded-full bg-slate-200" }
                        }></div>
                        <span class="text-xs text-slate-500">{*label}</span>
                    </li>
                })
                .collect::<Vec<_>>()}
        </ol>
    }
}

/// Run a flow operation, surfacing its error above the form.
fn apply(
    flow: RwSignal<BookingFlow>,
    error: RwSignal<Option<String>>,
    op: impl FnOnce(&mut BookingFlow) -> homehelp_core::Result<()>,
) {
    let mut result = Ok(());
    flow.update(|f| result = op(f));
    error.set(result.err().map(|e| e.to_string()));
}

#[component]
fn ServiceStep(flow: RwSignal<BookingFlow>, error: RwSignal<Option<String>>) -> impl IntoView {
    let category = Memo::new(move |_| flow.with(|f| f.draft().category));
    let preselected = flow.with_untracked(|f| f.draft().service.clone());

    view! {
        <h2 class="text-xl font-semibold mb-4">"What service do you need?"</h2>
        <div class="flex gap-2 mb-6">
            {ServiceCategory::ALL
                .into_iter()
                .map(|option| view! {
                    <button
                        on:click=move |_| apply(flow, error, |f| f.select_category(option))
                        class=move || {
                            if category.get() == option {
                                "flex-1 py-2 rounded-lg bg-blue-600 text-white font-medium"
                            } else {
                                "flex-1 py-2 rounded-lg bg-slate-100 text-slate-700"
                            }
                        }
                    >
                        {option.label()}
                    </button>
                })
                .collect::<Vec<_>>()}
        </div>

        {(!preselected.is_empty()).then(|| {
            let service = preselected.clone();
            view! {
                <button
                    on:click=move |_| {
                        let service = service.clone();
                        apply(flow, error, move |f| f.select_service(&service))
                    }
                    class="btn btn-primary w-full mb-6"
                >
                    {format!("Continue with {}", preselected)}
                </button>
            }
        })}

        <div class="grid grid-cols-2 md:grid-cols-3 gap-3">
            {move || {
                catalog::services(category.get())
                    .iter()
                    .map(|service| view! {
                        <button
                            on:click=move |_| apply(flow, error, |f| f.select_service(service))
                            class="p-4 rounded-xl border border-slate-200 hover:border-blue-500 text-left"
                        >
                            {*service}
                        </button>
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

#[component]
fn LocationStep(flow: RwSignal<BookingFlow>, error: RwSignal<Option<String>>) -> impl IntoView {
    let (location, address) =
        flow.with_untracked(|f| (f.draft().location.clone(), f.draft().address.clone()));
    let location = RwSignal::new(location);
    let address = RwSignal::new(address);

    view! {
        <h2 class="text-xl font-semibold mb-4">"Where do you need it?"</h2>
        <div class="flex flex-col gap-4">
            <label class="flex flex-col gap-1">
                <span class="text-sm font-medium">"City and state"</span>
                <input
                    type="text"
                    prop:value=move || location.get()
                    on:input=move |ev| location.set(event_target_value(&ev))
                    placeholder="Pune, Maharashtra"
                    class="input"
                />
            </label>
            <label class="flex flex-col gap-1">
                <span class="text-sm font-medium">"Complete address"</span>
                <textarea
                    prop:value=move || address.get()
                    on:input=move |ev| address.set(event_target_value(&ev))
                    rows="3"
                    class="input"
                ></textarea>
            </label>
            <div class="flex gap-3">
                <button on:click=move |_| apply(flow, error, BookingFlow::back) class="btn btn-ghost flex-1">
                    "Back"
                </button>
                <button
                    on:click=move |_| {
                        let (l, a) = (location.get_untracked(), address.get_untracked());
                        apply(flow, error, |f| f.submit_location(&l, &a))
                    }
                    class="btn btn-primary flex-1"
                >
                    "Next"
                </button>
            </div>
        </div>
    }
}

#[component]
fn DetailsStep(
    flow: RwSignal<BookingFlow>,
    error: RwSignal<Option<String>>,
    page_clock: PageClock,
) -> impl IntoView {
    let draft = flow.with_untracked(|f| f.draft().clone());
    let description = RwSignal::new(draft.description);
    let urgency = RwSignal::new(draft.urgency);
    let date = RwSignal::new(
        draft
            .preferred_time
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    );

    let on_submit = move |_| {
        // An empty or unparsable date means "flexible"
        let preferred = chrono::NaiveDate::parse_from_str(&date.get_untracked(), "%Y-%m-%d").ok();
        let text = description.get_untracked();
        let level = urgency.get_untracked();
        apply(flow, error, |f| {
            f.submit_details(&text, level, preferred, page_clock.elapsed())
                .map(|_| ())
        });
    };

    view! {
        <h2 class="text-xl font-semibold mb-4">"Tell us more"</h2>
        <div class="flex flex-col gap-4">
            <label class="flex flex-col gap-1">
                <span class="text-sm font-medium">"Description"</span>
                <textarea
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                    rows="4"
                    placeholder="Describe the problem"
                    class="input"
                ></textarea>
            </label>
            <label class="flex flex-col gap-1">
                <span class="text-sm font-medium">"Urgency"</span>
                <select
                    on:change=move |ev| {
                        if let Ok(level) = event_target_value(&ev).parse::<Urgency>() {
                            urgency.set(level);
                        }
                    }
                    class="input"
                >
                    {Urgency::ALL
                        .into_iter()
                        .map(|level| view! {
                            <option value=level.as_str() selected=move || urgency.get() == level>
                                {format!("{} - {}", level, level.description())}
                            </option>
                        })
                        .collect::<Vec<_>>()}
                </select>
            </label>
            <label class="flex flex-col gap-1">
                <span class="text-sm font-medium">"Preferred date (optional)"</span>
                <input
                    type="date"
                    prop:value=move || date.get()
                    on:input=move |ev| date.set(event_target_value(&ev))
                    class="input"
                />
            </label>

            <div class="bg-blue-50 rounded-xl p-4">
                <p class="text-sm font-semibold mb-2">"What happens next?"</p>
                <ul class="list-disc pl-5 text-sm text-slate-600">
                    {NEXT_STEPS.iter().map(|s| view! { <li>{*s}</li> }).collect::<Vec<_>>()}
                </ul>
            </div>

            <div class="flex gap-3">
                <button on:click=move |_| apply(flow, error, BookingFlow::back) class="btn btn-ghost flex-1">
                    "Back"
                </button>
                <button on:click=on_submit class="btn btn-primary flex-1">"Submit request"</button>
            </div>
        </div>
    }
}

#[component]
fn Confirmation(flow: RwSignal<BookingFlow>) -> impl IntoView {
    let rows = flow.with_untracked(|f| f.summary().unwrap_or_default());

    view! {
        <div class="text-center">
            <p class="text-5xl mb-4">"✅"</p>
            <h2 class="text-2xl font-bold mb-2">"Request submitted!"</h2>
            <p class="text-slate-500 mb-6">"Redirecting to your dashboard..."</p>
        </div>
        <dl class="grid grid-cols-3 gap-3 text-sm">
            {rows
                .into_iter()
                .map(|(label, value)| view! {
                    <dt class="text-slate-500">{label}</dt>
                    <dd class="col-span-2">{value}</dd>
                })
                .collect::<Vec<_>>()}
        </dl>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_flow_from_query() {
        let flow = initial_flow(None, Some("casual".into()), Timings::default());
        assert_eq!(flow.step(), BookingStep::SelectingService);
        assert_eq!(flow.draft().category, ServiceCategory::Casual);

        let flow = initial_flow(Some("Plumbing".into()), None, Timings::default());
        assert_eq!(flow.draft().service, "Plumbing");
        assert_eq!(flow.draft().category, ServiceCategory::Professional);

        let flow = initial_flow(None, Some("gardening".into()), Timings::default());
        assert_eq!(flow.draft().category, ServiceCategory::default());
    }
}
