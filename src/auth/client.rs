use crate::types::{AppError, AuthResponse, LoginRequest, Result};
use async_trait::async_trait;
use homehelp_core::{AuthGrant, Credentials, Registration, SessionContext};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Something that can exchange credentials or a registration for a grant.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Sign in to `context`.
    async fn login(&self, context: SessionContext, credentials: &Credentials) -> Result<AuthGrant>;

    /// Create an account. The context follows from the registration's role.
    async fn register(&self, registration: &Registration) -> Result<AuthGrant>;
}

#[async_trait]
impl<T: AuthClient + ?Sized> AuthClient for std::sync::Arc<T> {
    async fn login(&self, context: SessionContext, credentials: &Credentials) -> Result<AuthGrant> {
        (**self).login(context, credentials).await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthGrant> {
        (**self).register(registration).await
    }
}

/// [`AuthClient`] talking to the marketplace backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    http: Client,
    base_url: String,
}

impl HttpAuthClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/api/{customer|helper}/auth/{action}`
    pub fn endpoint(&self, context: SessionContext, action: &str) -> String {
        format!(
            "{}/api/{}/auth/{}",
            self.base_url,
            context.api_segment(),
            action
        )
    }

    async fn read_grant(response: reqwest::Response) -> Result<AuthGrant> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::Auth(format!("HTTP {}", status)));
        }
        if !status.is_success() {
            return Err(AppError::Network(format!("HTTP {}", status)));
        }
        let body: AuthResponse = response.json().await?;
        body.into_grant()
    }

    fn helper_form(registration: &Registration) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in registration.form_fields() {
            form = form.text(name, value);
        }
        if let Some(helper) = registration.helper() {
            let photo = helper.photo();
            let part = Part::bytes(photo.bytes.clone())
                .file_name(photo.file_name.clone())
                .mime_str(&photo.content_type)
                .map_err(|e| AppError::Internal(format!("Invalid photo type: {}", e)))?;
            form = form.part("photo", part);
        }
        Ok(form)
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn login(&self, context: SessionContext, credentials: &Credentials) -> Result<AuthGrant> {
        let url = self.endpoint(context, "login");
        tracing::debug!(%url, email = %credentials.email, "login request");

        let body = LoginRequest {
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        };
        let response = self.http.post(&url).json(&body).send().await?;
        Self::read_grant(response).await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthGrant> {
        let context = registration.context();
        let url = self.endpoint(context, "register");
        tracing::debug!(%url, role = %registration.role(), "register request");

        let request = match context {
            SessionContext::Customer => self.http.post(&url).json(&registration.json_body()),
            SessionContext::Helper => self.http.post(&url).multipart(Self::helper_form(registration)?),
        };
        let response = request.send().await?;
        Self::read_grant(response).await
    }
}
