//! API client for the HomeHelp backend
//!
//! Without a backend address sign-ins are answered locally by [`LocalAuth`].

use crate::types::{AuthFailure, AuthResponse, LoginRequest};
use gloo_net::http::{Request, Response};
use homehelp_core::{AuthGrant, Credentials, LocalAuth, Registration, SessionContext};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

/// `{base}/api/{customer|helper}/auth/{action}`
pub fn endpoint(base_url: &str, context: SessionContext, action: &str) -> String {
    format!(
        "{}/api/{}/auth/{}",
        base_url.trim_end_matches('/'),
        context.api_segment(),
        action
    )
}

async fn read_grant(resp: Response) -> Result<AuthGrant, AuthFailure> {
    let status = resp.status();
    if status == 401 || status == 403 {
        return Err(AuthFailure::Rejected);
    }
    if !resp.ok() {
        return Err(AuthFailure::Network(format!(
            "Request failed with status {}",
            status
        )));
    }
    let body: AuthResponse = resp
        .json()
        .await
        .map_err(|_| AuthFailure::InvalidResponse)?;
    body.into_grant()
}

/// Token suffix and id for local grants.
fn local_nonce() -> String {
    let random = (js_sys::Math::random() * f64::from(u32::MAX)) as u32;
    format!("{:x}-{:08x}", js_sys::Date::now() as u64, random)
}

/// Sign in to `context`
pub async fn login(
    base_url: Option<&str>,
    context: SessionContext,
    credentials: &Credentials,
) -> Result<AuthGrant, AuthFailure> {
    match base_url {
        Some(base_url) => remote_login(base_url, context, credentials).await,
        None => Ok(LocalAuth::new().login(context, credentials, &local_nonce())),
    }
}

/// Create an account
pub async fn register(
    base_url: Option<&str>,
    registration: &Registration,
) -> Result<AuthGrant, AuthFailure> {
    match base_url {
        Some(base_url) => remote_register(base_url, registration).await,
        None => Ok(LocalAuth::new().register(registration, &local_nonce())),
    }
}

async fn remote_login(
    base_url: &str,
    context: SessionContext,
    credentials: &Credentials,
) -> Result<AuthGrant, AuthFailure> {
    let url = endpoint(base_url, context, "login");
    let body = LoginRequest {
        email: credentials.email.clone(),
        password: credentials.password.clone(),
    };
    let resp = Request::post(&url)
        .json(&body)
        .map_err(|e| AuthFailure::Network(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| AuthFailure::Network(format!("Network error: {}", e)))?;
    read_grant(resp).await
}

/// Customers post JSON, helpers a multipart form with the photo.
async fn remote_register(base_url: &str, registration: &Registration) -> Result<AuthGrant, AuthFailure> {
    let context = registration.context();
    let url = endpoint(base_url, context, "register");

    let request = match context {
        SessionContext::Customer => Request::post(&url)
            .json(&registration.json_body())
            .map_err(|e| AuthFailure::Network(format!("Failed to serialize request: {}", e)))?,
        SessionContext::Helper => {
            let form = helper_form(registration)
                .map_err(|e| AuthFailure::Network(format!("Failed to build form: {:?}", e)))?;
            Request::post(&url)
                .body(form)
                .map_err(|e| AuthFailure::Network(format!("Failed to build request: {}", e)))?
        }
    };
    let resp = request
        .send()
        .await
        .map_err(|e| AuthFailure::Network(format!("Network error: {}", e)))?;
    read_grant(resp).await
}

fn helper_form(registration: &Registration) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    for (name, value) in registration.form_fields() {
        form.append_with_str(name, &value)?;
    }
    if let Some(helper) = registration.helper() {
        let photo = helper.photo();
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(photo.bytes.as_slice()));
        let options = BlobPropertyBag::new();
        options.set_type(&photo.content_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
        form.append_with_blob_and_filename("photo", &blob, &photo.file_name)?;
    }
    Ok(form)
}
