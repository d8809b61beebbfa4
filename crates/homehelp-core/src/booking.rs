//! Four-step booking wizard.
//!
//! ```text
//! SelectingService -> EnteringLocation -> EnteringDetails -> Confirmed
//! ```
//!
//! Each submission validates its step before moving forward; `back()` steps
//! to the previous form. Confirming freezes the draft into a
//! [`BookingRequest`] and schedules the redirect to the customer dashboard.

use crate::catalog;
use crate::error::{require, Error, Result};
use crate::route::Route;
use crate::schedule::{DeferredQueue, Timings, ViewClock};
use crate::types::{ServiceCategory, Urgency};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Current step of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStep {
    SelectingService,
    EnteringLocation,
    EnteringDetails,
    Confirmed,
}

impl BookingStep {
    /// Zero-based position on the progress bar.
    pub fn index(self) -> usize {
        match self {
            BookingStep::SelectingService => 0,
            BookingStep::EnteringLocation => 1,
            BookingStep::EnteringDetails => 2,
            BookingStep::Confirmed => 3,
        }
    }

    /// Progress bar label.
    pub fn label(self) -> &'static str {
        catalog::STEP_LABELS[self.index()]
    }

    fn describe(self) -> &'static str {
        match self {
            BookingStep::SelectingService => "selecting a service",
            BookingStep::EnteringLocation => "entering the location",
            BookingStep::EnteringDetails => "entering details",
            BookingStep::Confirmed => "the request is confirmed",
        }
    }
}

/// Fields collected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingDraft {
    pub service: String,
    pub category: ServiceCategory,
    pub location: String,
    pub address: String,
    pub description: String,
    pub urgency: Urgency,
    pub preferred_time: Option<NaiveDate>,
}

/// A submitted booking. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    service: String,
    category: ServiceCategory,
    location: String,
    address: String,
    description: String,
    urgency: Urgency,
    preferred_time: Option<NaiveDate>,
}

impl BookingRequest {
    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn category(&self) -> ServiceCategory {
        self.category
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    pub fn preferred_time(&self) -> Option<NaiveDate> {
        self.preferred_time
    }

    /// Labelled rows for the confirmation screen, in display order.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Service", self.service.clone()),
            ("Category", self.category.as_str().to_string()),
            ("Location", self.location.clone()),
            ("Address", self.address.clone()),
            ("Description", self.description.clone()),
            ("Urgency", self.urgency.as_str().to_string()),
            (
                "Preferred date",
                self.preferred_time
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "Flexible".to_string()),
            ),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BookingTask {
    Redirect,
}

/// The booking wizard of one mounted booking page.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    step: BookingStep,
    draft: BookingDraft,
    request: Option<BookingRequest>,
    timers: DeferredQueue<BookingTask>,
    timings: Timings,
    redirect: Option<Route>,
}

impl BookingFlow {
    pub fn new(timings: Timings) -> Self {
        Self {
            step: BookingStep::SelectingService,
            draft: BookingDraft::default(),
            request: None,
            timers: DeferredQueue::new(),
            timings,
            redirect: None,
        }
    }

    /// Start with a service and category chosen from the dashboard.
    ///
    /// The wizard still opens on the service step so the choice can be
    /// confirmed or changed.
    pub fn prefilled(service: &str, category: ServiceCategory, timings: Timings) -> Self {
        let mut flow = Self::new(timings);
        flow.draft.service = service.trim().to_string();
        flow.draft.category = category;
        flow
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// The frozen request, once confirmed.
    pub fn request(&self) -> Option<&BookingRequest> {
        self.request.as_ref()
    }

    /// Summary rows of the confirmed request.
    pub fn summary(&self) -> Option<Vec<(&'static str, String)>> {
        self.request.as_ref().map(BookingRequest::summary)
    }

    /// Services listed for the currently selected category.
    pub fn services(&self) -> &'static [&'static str] {
        catalog::services(self.draft.category)
    }

    /// Where to navigate once the post-confirmation delay has elapsed.
    pub fn redirect(&self) -> Option<Route> {
        self.redirect.clone()
    }

    fn expect_step(&self, expected: BookingStep, action: &'static str) -> Result<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                from: self.step.describe(),
                action,
            })
        }
    }

    fn move_to(&mut self, step: BookingStep) {
        tracing::debug!(from = ?self.step, to = ?step, "booking step");
        self.step = step;
    }

    pub fn select_category(&mut self, category: ServiceCategory) -> Result<()> {
        self.expect_step(BookingStep::SelectingService, "change the category")?;
        self.draft.category = category;
        Ok(())
    }

    pub fn select_service(&mut self, service: &str) -> Result<()> {
        self.expect_step(BookingStep::SelectingService, "select a service")?;
        self.draft.service = require("Service", service)?;
        self.move_to(BookingStep::EnteringLocation);
        Ok(())
    }

    pub fn submit_location(&mut self, location: &str, address: &str) -> Result<()> {
        self.expect_step(BookingStep::EnteringLocation, "submit a location")?;
        let location = require("City and state", location)?;
        let address = require("Complete address", address)?;
        self.draft.location = location;
        self.draft.address = address;
        self.move_to(BookingStep::EnteringDetails);
        Ok(())
    }

    /// Submit the last form and confirm the booking.
    ///
    /// `now` is the page's elapsed time; the redirect fires
    /// `booking_redirect` after it.
    pub fn submit_details(
        &mut self,
        description: &str,
        urgency: Urgency,
        preferred_time: Option<NaiveDate>,
        now: Duration,
    ) -> Result<&BookingRequest> {
        self.expect_step(BookingStep::EnteringDetails, "submit details")?;
        let description = require("Description", description)?;
        self.draft.description = description;
        self.draft.urgency = urgency;
        self.draft.preferred_time = preferred_time;

        let draft = &self.draft;
        let request = BookingRequest {
            service: draft.service.clone(),
            category: draft.category,
            location: draft.location.clone(),
            address: draft.address.clone(),
            description: draft.description.clone(),
            urgency: draft.urgency,
            preferred_time: draft.preferred_time,
        };
        tracing::info!(
            service = %request.service,
            category = %request.category,
            urgency = %request.urgency,
            "booking request submitted"
        );
        self.timers
            .schedule(now + self.timings.booking_redirect, BookingTask::Redirect);
        self.move_to(BookingStep::Confirmed);
        Ok(&*self.request.insert(request))
    }

    /// Return to the previous form.
    pub fn back(&mut self) -> Result<()> {
        let previous = match self.step {
            BookingStep::EnteringLocation => BookingStep::SelectingService,
            BookingStep::EnteringDetails => BookingStep::EnteringLocation,
            BookingStep::SelectingService | BookingStep::Confirmed => {
                return Err(Error::InvalidTransition {
                    from: self.step.describe(),
                    action: "go back",
                })
            }
        };
        self.move_to(previous);
        Ok(())
    }
}

impl ViewClock for BookingFlow {
    fn next_due(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    fn advance(&mut self, now: Duration) -> usize {
        let fired = self.timers.drain_due(now);
        for (_, task) in &fired {
            match task {
                BookingTask::Redirect => {
                    tracing::debug!("booking redirect due");
                    self.redirect = Some(Route::CustomerDashboard);
                }
            }
        }
        fired.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow() -> BookingFlow {
        BookingFlow::new(Timings::default())
    }

    fn at_details() -> BookingFlow {
        let mut flow = flow();
        flow.select_service("Plumbing").unwrap();
        flow.submit_location("Vellore, Tamil Nadu", "12 MG Road").unwrap();
        flow
    }

    #[test]
    fn test_round_trip_summary() {
        let mut flow = at_details();
        flow.submit_details("Leaking tap", Urgency::High, None, Duration::ZERO)
            .unwrap();

        assert_eq!(flow.step(), BookingStep::Confirmed);
        let summary = flow.summary().unwrap();
        assert_eq!(
            summary,
            vec![
                ("Service", "Plumbing".to_string()),
                ("Category", "professional".to_string()),
                ("Location", "Vellore, Tamil Nadu".to_string()),
                ("Address", "12 MG Road".to_string()),
                ("Description", "Leaking tap".to_string()),
                ("Urgency", "high".to_string()),
                ("Preferred date", "Flexible".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_description_never_confirms() {
        let mut flow = at_details();
        let err = flow
            .submit_details("   ", Urgency::Low, None, Duration::ZERO)
            .unwrap_err();

        assert_eq!(err.to_string(), "Description is required");
        assert_eq!(flow.step(), BookingStep::EnteringDetails);
        assert!(flow.request().is_none());
        assert_eq!(flow.next_due(), None);
    }

    #[test]
    fn test_location_requires_both_fields() {
        let mut flow = flow();
        flow.select_service("Gardening").unwrap();
        assert!(flow.submit_location("Pune", "").is_err());
        assert!(flow.submit_location("", "1 Main St").is_err());
        assert_eq!(flow.step(), BookingStep::EnteringLocation);
    }

    #[test]
    fn test_no_skipping() {
        let mut flow = flow();
        assert!(matches!(
            flow.submit_location("Pune", "1 Main St"),
            Err(Error::InvalidTransition { .. })
        ));
        assert!(flow
            .submit_details("x", Urgency::Low, None, Duration::ZERO)
            .is_err());
        assert_eq!(flow.step(), BookingStep::SelectingService);
    }

    #[test]
    fn test_back_walks_one_step() {
        let mut flow = at_details();
        flow.back().unwrap();
        assert_eq!(flow.step(), BookingStep::EnteringLocation);
        flow.back().unwrap();
        assert_eq!(flow.step(), BookingStep::SelectingService);
        assert!(flow.back().is_err());
        // Values typed earlier survive going back.
        assert_eq!(flow.draft().location, "Vellore, Tamil Nadu");
    }

    #[test]
    fn test_back_after_confirm_is_invalid() {
        let mut flow = at_details();
        flow.submit_details("Leaking tap", Urgency::High, None, Duration::ZERO)
            .unwrap();
        let err = flow.back().unwrap_err();
        assert_eq!(err.to_string(), "Cannot go back while the request is confirmed");
        assert_eq!(flow.step(), BookingStep::Confirmed);
    }

    #[test]
    fn test_category_locked_after_service_step() {
        let mut flow = flow();
        flow.select_category(ServiceCategory::Casual).unwrap();
        assert_eq!(flow.services().len(), 8);
        flow.select_service("Car Washing").unwrap();
        assert!(flow.select_category(ServiceCategory::Professional).is_err());
        assert_eq!(flow.draft().category, ServiceCategory::Casual);
    }

    #[test]
    fn test_prefilled_starts_on_service_step() {
        let flow = BookingFlow::prefilled("Car Washing", ServiceCategory::Casual, Timings::default());
        assert_eq!(flow.step(), BookingStep::SelectingService);
        assert_eq!(flow.draft().service, "Car Washing");
        assert_eq!(flow.draft().category, ServiceCategory::Casual);
    }

    #[test]
    fn test_redirect_after_delay() {
        let mut flow = at_details();
        let date = NaiveDate::from_ymd_opt(2025, 3, 14);
        flow.submit_details("Fix the fan", Urgency::Emergency, date, Duration::from_millis(500))
            .unwrap();

        assert_eq!(flow.next_due(), Some(Duration::from_millis(3500)));
        assert_eq!(flow.advance(Duration::from_millis(3499)), 0);
        assert!(flow.redirect().is_none());
        assert_eq!(flow.advance(Duration::from_millis(3500)), 1);
        assert_eq!(flow.redirect(), Some(Route::CustomerDashboard));
        assert_eq!(
            flow.summary().unwrap().last().unwrap().1,
            "2025-03-14"
        );
    }
}
