//! Authentication clients and session holders
//!
//! # Module Structure
//!
//! - [`auth::client`](crate::auth::client) - the [`AuthClient`] trait and its HTTP implementation
//! - [`auth::placeholder`](crate::auth::placeholder) - local actor fabrication when no backend is configured
//! - [`auth::session`](crate::auth::session) - [`SessionHolder`], one per role context
//!
//! # Endpoints
//!
//! ```text
//! POST {base}/api/customer/auth/login      JSON {email, password}
//! POST {base}/api/customer/auth/register   JSON registration fields
//! POST {base}/api/helper/auth/login        JSON {email, password}
//! POST {base}/api/helper/auth/register     multipart form, photo as file part
//! ```
//!
//! A success body carries a string `token` and the actor under `actor`
//! (older backends: `helper` or `user`). Anything else counts as failure.

/// Auth client trait and HTTP implementation.
pub mod client;
/// Offline auth client.
pub mod placeholder;
/// Per-context session holder.
pub mod session;

pub use client::{AuthClient, HttpAuthClient};
pub use placeholder::PlaceholderAuthClient;
pub use session::SessionHolder;
