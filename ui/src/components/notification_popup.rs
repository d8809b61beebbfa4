//! Job offer popup on the helper dashboard

use homehelp_core::{JobOffer, OfferInbox, Route};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

/// Shows the front offer of `inbox` while its popup is open.
#[component]
pub fn NotificationPopup(inbox: RwSignal<OfferInbox>) -> impl IntoView {
    let navigate = use_navigate();
    let current = Memo::new(move |_| inbox.with(|i| i.current().cloned()));

    move || {
        current.get().map(|offer: JobOffer| {
            let id = offer.id;
            let navigate = navigate.clone();
            let on_accept = move |_| {
                let mut route = None;
                inbox.update(|i| route = i.accept(id));
                if let Some(route) = route.as_ref().map(Route::path) {
                    navigate(&route, Default::default());
                }
            };
            let on_decline = move |_| {
                inbox.update(|i| {
                    i.decline(id);
                });
            };

            view! {
                <div class="fixed inset-0 bg-slate-900/50 flex items-center justify-center z-50">
                    <div class="bg-white rounded-2xl shadow-xl w-full max-w-md p-6 animate-fade-in">
                        <div class="flex items-start justify-between mb-4">
                            <div>
                                <p class="text-xs font-semibold uppercase text-blue-600">"New job request"</p>
                                <h2 class="text-xl font-bold">{offer.service_name.clone()}</h2>
                            </div>
                            <button
                                on:click=move |_| inbox.update(OfferInbox::dismiss)
                                class="text-slate-400 hover:text-slate-600"
                                aria-label="Close"
                            >
                                "✕"
                            </button>
                        </div>
                        <dl class="grid grid-cols-2 gap-3 text-sm mb-6">
                            <dt class="text-slate-500">"Client"</dt>
                            <dd>{offer.client_name.clone()}</dd>
                            <dt class="text-slate-500">"Location"</dt>
                            <dd>{offer.location.clone()}</dd>
                            <dt class="text-slate-500">"Urgency"</dt>
                            <dd class="capitalize">{offer.urgency.to_string()}</dd>
                            <dt class="text-slate-500">"Estimated pay"</dt>
                            <dd class="font-semibold text-green-600">{offer.estimated_pay.to_string()}</dd>
                        </dl>
                        <div class="flex gap-3">
                            <button on:click=on_decline class="btn btn-ghost flex-1">"Decline"</button>
                            <button on:click=on_accept class="btn btn-primary flex-1">"Accept"</button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
