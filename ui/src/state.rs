//! Global application state

use gloo_storage::{LocalStorage, Storage};
use homehelp_core::{
    Actor, AuthGrant, Error as CoreError, Result as CoreResult, Session, SessionContext,
    TokenStore, Timings,
};
use leptos::prelude::*;

/// Backend address, set at build time. Unset means sign-ins are answered
/// locally.
pub const API_BASE: Option<&str> = option_env!("HOMEHELP_AUTH_BASE_URL");

/// Configured backend, if any. A blank value counts as unset.
pub fn backend_address(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

/// [`TokenStore`] backed by the browser's `localStorage`.
///
/// Tokens are plain strings under `customer_token` / `helper_token`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTokenStore;

impl TokenStore for BrowserTokenStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(LocalStorage::get::<String>(key).ok())
    }

    fn set(&mut self, key: &str, value: &str) -> CoreResult<()> {
        LocalStorage::set(key, value).map_err(|e| CoreError::Storage(e.to_string()))
    }

    fn remove(&mut self, key: &str) -> CoreResult<()> {
        LocalStorage::delete(key);
        Ok(())
    }
}

/// Global application state
///
/// One session per context, so a customer and a helper can be signed in
/// side by side in the same tab.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Customer session
    pub customer: RwSignal<Session>,
    /// Helper session
    pub helper: RwSignal<Session>,
    /// API base URL, `None` for local sign-ins
    pub api_base: RwSignal<Option<String>>,
    /// Delays of the simulated flows
    pub timings: StoredValue<Timings>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            customer: RwSignal::new(Session::new(SessionContext::Customer)),
            helper: RwSignal::new(Session::new(SessionContext::Helper)),
            api_base: RwSignal::new(backend_address(API_BASE)),
            timings: StoredValue::new(Timings::default()),
        }
    }

    pub fn session(&self, context: SessionContext) -> RwSignal<Session> {
        match context {
            SessionContext::Customer => self.customer,
            SessionContext::Helper => self.helper,
        }
    }

    /// Whether `context` has a signed-in actor. Tracks the session signal.
    pub fn is_active(&self, context: SessionContext) -> bool {
        self.session(context).with(Session::is_active)
    }

    /// Signed-in actor of `context`. Tracks the session signal.
    pub fn actor(&self, context: SessionContext) -> Option<Actor> {
        self.session(context).with(|s| s.actor().cloned())
    }

    /// Install a grant into `context`, storing its token.
    pub fn establish(&self, context: SessionContext, grant: AuthGrant) -> CoreResult<()> {
        let mut result = Ok(());
        self.session(context).update(|session| {
            result = session
                .establish(grant, &mut BrowserTokenStore)
                .map(|_| ());
        });
        result
    }

    /// Sign out of `context`; the other context is untouched.
    pub fn logout(&self, context: SessionContext) {
        self.session(context).update(|session| {
            if let Err(e) = session.end(&mut BrowserTokenStore) {
                tracing::warn!(%context, "failed to clear token: {}", e);
            }
        });
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
