//! Route table of the app.

use crate::types::SessionContext;
use std::fmt;

/// A page of the app.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    CustomerRegistration,
    HelperRegistration,
    Login(SessionContext),
    CustomerDashboard,
    HelperDashboard,
    BookService,
    Chat(String),
}

impl Route {
    /// Login page of `context`.
    pub fn login(context: SessionContext) -> Self {
        Route::Login(context)
    }

    /// Dashboard of `context`.
    pub fn dashboard(context: SessionContext) -> Self {
        match context {
            SessionContext::Customer => Route::CustomerDashboard,
            SessionContext::Helper => Route::HelperDashboard,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::CustomerRegistration => "/register/user".to_string(),
            Route::HelperRegistration => "/register/helper".to_string(),
            Route::Login(SessionContext::Customer) => "/user-login".to_string(),
            Route::Login(SessionContext::Helper) => "/helper-login".to_string(),
            Route::CustomerDashboard => "/dashboard/user".to_string(),
            Route::HelperDashboard => "/dashboard/helper".to_string(),
            Route::BookService => "/book-service".to_string(),
            Route::Chat(id) => format!("/chat/{}", id),
        }
    }

    /// Match a path. Trailing slashes and query strings are ignored.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let route = match trimmed {
            "" => Route::Landing,
            "/register/user" => Route::CustomerRegistration,
            "/register/helper" => Route::HelperRegistration,
            "/user-login" => Route::Login(SessionContext::Customer),
            "/helper-login" => Route::Login(SessionContext::Helper),
            "/dashboard/user" => Route::CustomerDashboard,
            "/dashboard/helper" => Route::HelperDashboard,
            "/book-service" => Route::BookService,
            other => {
                let id = other.strip_prefix("/chat/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Route::Chat(id.to_string())
            }
        };
        Some(route)
    }

    /// Session a visitor must hold to see this page.
    ///
    /// Visitors without it are sent to that context's login page.
    pub fn required_session(&self) -> Option<SessionContext> {
        match self {
            Route::CustomerDashboard | Route::BookService => Some(SessionContext::Customer),
            Route::HelperDashboard => Some(SessionContext::Helper),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
