//! Static service catalog and wizard copy.

use crate::types::ServiceCategory;

const PROFESSIONAL_SERVICES: &[&str] = &[
    "Plumbing",
    "Electrical Work",
    "AC Repair",
    "Appliance Repair",
    "Home Cleaning",
    "Painting",
    "Carpentry",
    "Pest Control",
    "Others",
];

const CASUAL_SERVICES: &[&str] = &[
    "House Cleaning",
    "Gardening",
    "Car Washing",
    "Package Delivery",
    "Grocery Shopping",
    "Pet Walking",
    "Moving Help",
    "General Labor",
];

/// Services offered in `category`, in display order.
pub fn services(category: ServiceCategory) -> &'static [&'static str] {
    match category {
        ServiceCategory::Professional => PROFESSIONAL_SERVICES,
        ServiceCategory::Casual => CASUAL_SERVICES,
    }
}

/// Category a catalog service belongs to, if it is listed at all.
pub fn category_of(service: &str) -> Option<ServiceCategory> {
    ServiceCategory::ALL
        .into_iter()
        .find(|c| services(*c).iter().any(|s| s.eq_ignore_ascii_case(service)))
}

/// Progress bar labels of the booking wizard.
pub const STEP_LABELS: [&str; 4] = ["Service", "Location", "Details", "Confirmation"];

/// Shown on the details step.
pub const NEXT_STEPS: [&str; 4] = [
    "Your request will be sent to available helpers in your area",
    "Helpers will contact you via our chat system",
    "You can discuss requirements and negotiate pricing",
    "Service will be completed within 2 working days",
];

/// "How it works" panel on the customer dashboard: (title, description).
pub const HOW_IT_WORKS: [(&str, &str); 7] = [
    ("Book your service", "Choose the service you need"),
    ("Request sent to Helper", "Available helpers get notified"),
    ("Helper connects via chat", "Direct communication starts"),
    ("Discuss requirements", "Share details and requirements"),
    ("Negotiate pricing", "Agree on fair pricing"),
    ("Payment process", "Secure payment handling"),
    ("Helper arrives", "Service within 2 working days"),
];
