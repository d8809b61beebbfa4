//! # homehelp-core
//!
//! Runtime-free domain model of the HomeHelp marketplace client. Everything
//! here is plain data and state machines, so the same code runs in the
//! native CLI and in the browser frontend.
//!
//! ## Features
//!
//! - **Sessions**: one [`Session`] per [`SessionContext`] (customer, helper),
//!   tokens mirrored into any [`TokenStore`]
//! - **Registration**: tagged [`Registration`] variants, validated on construction
//! - **Booking**: four-step [`BookingFlow`] producing a frozen [`BookingRequest`]
//! - **Chat**: simulated [`Conversation`] with canned, randomly delayed replies
//! - **Offers**: [`OfferInbox`] backing the helper's notification popup
//! - **Local auth**: [`LocalAuth`] grants for hosts without a backend
//!
//! ## Time
//!
//! Nothing in this crate sleeps or spawns. Views that do work later keep a
//! [`DeferredQueue`] keyed by elapsed time and implement [`ViewClock`]; the
//! host calls [`ViewClock::advance`] when [`ViewClock::next_due`] says so.
//!
//! ```rust,ignore
//! use homehelp_core::{Conversation, SessionContext, Timings, ViewClock};
//! use rand::{rngs::StdRng, SeedableRng};
//! use std::time::Duration;
//!
//! let mut chat = Conversation::open(
//!     "new-client",
//!     SessionContext::Helper,
//!     chrono::Utc::now(),
//!     Timings::default(),
//!     StdRng::seed_from_u64(7),
//! );
//! chat.send("On my way", Duration::from_secs(1))?;
//! chat.advance(Duration::from_secs(5));
//! ```

#![warn(clippy::all)]

pub mod booking;
pub mod catalog;
pub mod conversation;
pub mod dashboard;
pub mod error;
pub mod local_auth;
pub mod offers;
pub mod registration;
pub mod route;
pub mod schedule;
pub mod session;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use booking::{BookingDraft, BookingFlow, BookingRequest, BookingStep};
pub use conversation::{Conversation, Counterpart, Message, MessageKind, Sender};
pub use dashboard::{CustomerDashboard, HelperDashboard};
pub use error::{Error, Result, ValidationError};
pub use local_auth::LocalAuth;
pub use offers::{JobOffer, OfferInbox};
pub use registration::{CustomerForm, HelperForm, Photo, Registration};
pub use route::Route;
pub use schedule::{DeferredQueue, TaskId, Timings, ViewClock};
pub use session::Session;
pub use store::{MemoryTokenStore, TokenStore};
pub use types::{
    Actor, AuthGrant, Credentials, PayRange, Role, ServiceCategory, SessionContext, Urgency,
};
