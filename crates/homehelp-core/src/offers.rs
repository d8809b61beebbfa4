//! Incoming job offers and the notification popup.

use crate::route::Route;
use crate::schedule::{DeferredQueue, Timings, ViewClock};
use crate::types::{PayRange, ServiceCategory, Urgency};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Conversation opened when a helper accepts an offer.
pub const ACCEPTED_CHAT_ID: &str = "new-client";

/// A service request offered to a helper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOffer {
    pub id: u64,
    pub category: ServiceCategory,
    pub service_name: String,
    pub client_name: String,
    pub location: String,
    pub urgency: Urgency,
    pub estimated_pay: PayRange,
}

impl JobOffer {
    /// The canned offer a helper of `category` receives.
    pub fn simulated(id: u64, category: ServiceCategory) -> Self {
        let (service_name, estimated_pay) = match category {
            ServiceCategory::Professional => ("Plumbing Repair", PayRange::new(800, 1200)),
            ServiceCategory::Casual => ("House Cleaning", PayRange::new(300, 500)),
        };
        Self {
            id,
            category,
            service_name: service_name.to_string(),
            client_name: "Sarah Johnson".to_string(),
            location: "Sector 14, Gurgaon".to_string(),
            urgency: Urgency::Medium,
            estimated_pay,
        }
    }
}

/// Pending offers of one helper dashboard, plus popup visibility.
#[derive(Debug, Clone)]
pub struct OfferInbox {
    offers: Vec<JobOffer>,
    popup_open: bool,
    arrivals: DeferredQueue<JobOffer>,
    next_id: u64,
}

impl OfferInbox {
    /// An empty inbox with nothing scheduled.
    pub fn new() -> Self {
        Self {
            offers: Vec::new(),
            popup_open: false,
            arrivals: DeferredQueue::new(),
            next_id: 1,
        }
    }

    /// Inbox of a freshly mounted helper dashboard: one simulated offer
    /// arrives after `offer_delay`.
    pub fn for_helper(category: ServiceCategory, timings: Timings) -> Self {
        let mut inbox = Self::new();
        inbox.schedule_offer(timings.offer_delay, category);
        inbox
    }

    /// Schedule a simulated offer at elapsed time `due`.
    pub fn schedule_offer(&mut self, due: Duration, category: ServiceCategory) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.arrivals.schedule(due, JobOffer::simulated(id, category));
        id
    }

    /// Offers still waiting for an answer, oldest first.
    pub fn pending(&self) -> &[JobOffer] {
        &self.offers
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup_open
    }

    /// Offer shown in the popup: the front of the list while it is open.
    pub fn current(&self) -> Option<&JobOffer> {
        if self.popup_open {
            self.offers.first()
        } else {
            None
        }
    }

    fn take(&mut self, id: u64) -> Option<JobOffer> {
        let index = self.offers.iter().position(|o| o.id == id)?;
        self.popup_open = false;
        Some(self.offers.remove(index))
    }

    /// Accept offer `id` and return the chat to open.
    ///
    /// Unknown ids (including ones already answered) change nothing.
    pub fn accept(&mut self, id: u64) -> Option<Route> {
        let offer = self.take(id)?;
        tracing::info!(offer_id = offer.id, service = %offer.service_name, "offer accepted");
        Some(Route::Chat(ACCEPTED_CHAT_ID.to_string()))
    }

    /// Decline offer `id`. Returns whether it was pending.
    pub fn decline(&mut self, id: u64) -> bool {
        match self.take(id) {
            Some(offer) => {
                tracing::info!(offer_id = offer.id, service = %offer.service_name, "offer declined");
                true
            }
            None => false,
        }
    }

    /// Close the popup without answering.
    pub fn dismiss(&mut self) {
        self.popup_open = false;
    }

    /// Reopen the popup if anything is pending.
    pub fn show_next(&mut self) -> bool {
        self.popup_open = !self.offers.is_empty();
        self.popup_open
    }
}

impl Default for OfferInbox {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewClock for OfferInbox {
    fn next_due(&self) -> Option<Duration> {
        self.arrivals.next_due()
    }

    fn advance(&mut self, now: Duration) -> usize {
        let arrived = self.arrivals.drain_due(now);
        let count = arrived.len();
        for (_, offer) in arrived {
            tracing::info!(offer_id = offer.id, service = %offer.service_name, "offer received");
            self.offers.push(offer);
        }
        if count > 0 {
            self.popup_open = true;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn arrived(category: ServiceCategory) -> OfferInbox {
        let mut inbox = OfferInbox::for_helper(category, Timings::default());
        inbox.advance(ms(3000));
        inbox
    }

    #[test]
    fn test_offer_arrives_after_delay() {
        let mut inbox = OfferInbox::for_helper(ServiceCategory::Professional, Timings::default());
        assert_eq!(inbox.advance(ms(2999)), 0);
        assert!(inbox.current().is_none());

        assert_eq!(inbox.advance(ms(3000)), 1);
        let offer = inbox.current().unwrap();
        assert_eq!(offer.service_name, "Plumbing Repair");
        assert_eq!(offer.estimated_pay.to_string(), "₹800-1200");
        assert_eq!(offer.client_name, "Sarah Johnson");
        assert_eq!(offer.urgency, Urgency::Medium);
    }

    #[test]
    fn test_casual_helper_gets_cleaning() {
        let inbox = arrived(ServiceCategory::Casual);
        let offer = inbox.current().unwrap();
        assert_eq!(offer.service_name, "House Cleaning");
        assert_eq!(offer.estimated_pay, PayRange::new(300, 500));
    }

    #[test]
    fn test_accept_opens_chat_once() {
        let mut inbox = arrived(ServiceCategory::Professional);
        let id = inbox.current().unwrap().id;

        assert_eq!(inbox.accept(id), Some(Route::Chat("new-client".into())));
        assert!(!inbox.is_popup_open());
        assert!(inbox.pending().is_empty());

        assert_eq!(inbox.accept(id), None);
        assert!(!inbox.decline(id));
    }

    #[test]
    fn test_unknown_id_leaves_popup_open() {
        let mut inbox = arrived(ServiceCategory::Professional);
        assert!(!inbox.decline(999));
        assert!(inbox.is_popup_open());
        assert_eq!(inbox.pending().len(), 1);
    }

    #[test]
    fn test_decline_then_show_next() {
        let mut inbox = arrived(ServiceCategory::Casual);
        inbox.schedule_offer(ms(4000), ServiceCategory::Casual);
        inbox.advance(ms(4000));
        assert_eq!(inbox.pending().len(), 2);

        let first = inbox.current().unwrap().id;
        assert!(inbox.decline(first));
        assert!(inbox.current().is_none());

        assert!(inbox.show_next());
        assert_ne!(inbox.current().unwrap().id, first);
    }

    #[test]
    fn test_dismiss_keeps_offers() {
        let mut inbox = arrived(ServiceCategory::Professional);
        inbox.dismiss();
        assert!(inbox.current().is_none());
        assert_eq!(inbox.pending().len(), 1);
        assert!(inbox.show_next());
    }
}
