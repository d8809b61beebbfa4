//! Helper dashboard offer popup, on the terminal.

use super::account::require_session;
use super::output::Output;
use super::prompt::Prompter;
use crate::{AppState, Result, ViewDriver};
use homehelp_core::{JobOffer, OfferInbox, Route, ServiceCategory, ViewClock};
use tokio::io::AsyncBufRead;

/// Wait for offers and ask about each one.
///
/// Returns the chat route when an offer is accepted. Declined offers are
/// gone; offers left for later stay pending until the view is left.
pub async fn run<R: AsyncBufRead + Unpin>(
    state: &AppState,
    category: ServiceCategory,
    prompter: &mut Prompter<R>,
    output: &Output,
) -> Result<Option<Route>> {
    if !require_session(state, &Route::HelperDashboard, output) {
        return Ok(None);
    }

    let driver = ViewDriver::mount(OfferInbox::for_helper(category, state.timings()));
    let mut fired = driver.subscribe();
    output.header(&format!("{} helper dashboard", category.label()));
    output.info("Waiting for job offers...");

    loop {
        if let Some(offer) = driver.with(|inbox| inbox.current().cloned()) {
            print_offer(&offer, output);
            let Some(answer) = prompter.ask(output, "[a]ccept, [d]ecline or [l]ater:").await?
            else {
                return Ok(None);
            };
            match answer.to_ascii_lowercase().as_str() {
                "a" | "accept" => {
                    if let Some(route) = driver.update(|inbox, _| inbox.accept(offer.id)) {
                        output.success("Offer accepted! Opening chat with the client");
                        output.kv("Page", &route.path());
                        if let Route::Chat(id) = &route {
                            output.command(&format!("homehelp chat {} --as helper", id));
                        }
                        return Ok(Some(route));
                    }
                }
                "d" | "decline" => {
                    driver.update(|inbox, _| inbox.decline(offer.id));
                    output.info("Offer declined");
                }
                "l" | "later" => {
                    driver.update(|inbox, _| inbox.dismiss());
                    output.info("Offer kept for later");
                }
                _ => output.error("Please answer a, d or l"),
            }
            continue;
        }

        let (pending, scheduled) =
            driver.with(|inbox| (inbox.pending().len(), inbox.next_due().is_some()));
        if !scheduled {
            if pending > 0 {
                output.info(&format!("{} offer(s) waiting for an answer", pending));
            } else {
                output.info("No more offers right now");
            }
            return Ok(None);
        }
        if fired.changed().await.is_err() {
            return Ok(None);
        }
    }
}

fn print_offer(offer: &JobOffer, output: &Output) {
    output.subheader("New job request!");
    output.kv("Service", &offer.service_name);
    output.kv("Client", &offer.client_name);
    output.kv("Location", &offer.location);
    output.kv("Urgency", offer.urgency.as_str());
    output.kv("Estimated pay", &offer.estimated_pay.to_string());
}
