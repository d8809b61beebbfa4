//! Sign-in, sign-up and sign-out commands.

use super::output::Output;
use super::{RegisterArgs, RoleArg};
use crate::{AppState, Result};
use homehelp_core::{
    Actor, CustomerDashboard, CustomerForm, HelperDashboard, HelperForm, Photo, Registration, Role,
    Route, SessionContext, ValidationError,
};
use std::path::Path;

/// Log into `context`. Returns whether a session was established.
pub async fn login(
    state: &mut AppState,
    context: SessionContext,
    email: &str,
    password: &str,
    output: &Output,
) -> bool {
    output.header(&format!("{} login", context_title(context)));
    let session = state.session_mut(context);
    if session.login(email, password).await {
        if let Some(actor) = session.actor() {
            print_dashboard(actor, output);
        }
        true
    } else {
        output.error(session.last_error().unwrap_or("Login failed. Please try again."));
        false
    }
}

/// Create an account from the command line fields.
///
/// Invalid input is reported before any network call is made.
pub async fn register(state: &mut AppState, args: &RegisterArgs, output: &Output) -> Result<bool> {
    let role = Role::from(args.role);
    output.header(&format!("Register as {}", role.label()));

    let registration = match build_registration(args)? {
        Ok(registration) => registration,
        Err(e) => {
            output.error(&e.to_string());
            return Ok(false);
        }
    };

    let session = state.session_mut(registration.context());
    if session.register(&registration).await {
        output.success("Account created");
        if let Some(actor) = session.actor() {
            print_dashboard(actor, output);
        }
        Ok(true)
    } else {
        output.error(
            session
                .last_error()
                .unwrap_or("Registration failed. Please try again."),
        );
        Ok(false)
    }
}

/// Sign out of one context, or both when `context` is `None`.
pub fn logout(state: &mut AppState, context: Option<SessionContext>, output: &Output) {
    let contexts = match context {
        Some(context) => vec![context],
        None => SessionContext::ALL.to_vec(),
    };
    for context in contexts {
        let session = state.session_mut(context);
        let had_token = session.stored_token().is_some();
        session.logout();
        if had_token {
            output.success(&format!("Signed out of the {} area", context));
        } else {
            output.info(&format!("Not signed in to the {} area", context));
        }
    }
}

/// List which contexts hold a token.
pub fn whoami(state: &AppState, output: &Output) {
    output.header("Sessions");
    output.table_header(&["Area", "Status", "Token"]);
    for context in SessionContext::ALL {
        match state.session(context).stored_token() {
            Some(token) => output.table_row(&[context.token_key(), "signed in", &mask(&token)]),
            None => output.table_row(&[context.token_key(), "signed out", "-"]),
        }
    }
    if state.config.is_placeholder_mode() {
        output.hint("Placeholder mode: no backend is configured, sign-ins are answered locally");
    }
}

/// Route guard for commands that open a signed-in page.
///
/// The CLI holds no actor between runs, so a stored token for the page's
/// context is what counts as signed in.
pub fn require_session(state: &AppState, route: &Route, output: &Output) -> bool {
    let Some(context) = route.required_session() else {
        return true;
    };
    if state.session(context).stored_token().is_some() {
        return true;
    }
    output.warning(&format!("Please sign in to the {} area first", context));
    output.kv("Redirect", &Route::login(context).path());
    output.command(&format!("homehelp login --as {} --email <email>", context));
    false
}

/// Turn the flags into a validated registration. The outer error is I/O
/// (reading the photo); the inner one is a form validation failure.
fn build_registration(
    args: &RegisterArgs,
) -> Result<std::result::Result<Registration, ValidationError>> {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    if args.role == RoleArg::Customer {
        let form = CustomerForm {
            name: args.name.clone(),
            email: args.email.clone(),
            phone: args.phone.clone(),
            password: args.password.clone(),
            confirm_password: args
                .confirm_password
                .clone()
                .unwrap_or_else(|| args.password.clone()),
        };
        return Ok(form.validate());
    }

    let photo = match &args.photo {
        Some(path) => Some(read_photo(path)?),
        None => None,
    };
    let form = HelperForm {
        name: args.name.clone(),
        email: args.email.clone(),
        phone: args.phone.clone(),
        password: args.password.clone(),
        address: text(&args.address),
        profession: text(&args.profession),
        identity_number: text(&args.aadhar),
        photo,
    };
    Ok(form.validate(args.role.into()))
}

fn read_photo(path: &Path) -> Result<Photo> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());
    let content_type = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    };
    Ok(Photo {
        file_name,
        content_type: content_type.to_string(),
        bytes,
    })
}

fn print_dashboard(actor: &Actor, output: &Output) {
    let route = Route::dashboard(actor.role.context());
    match actor.role.context() {
        SessionContext::Customer => {
            let dashboard = CustomerDashboard::for_actor(actor);
            output.success(&dashboard.greeting);
            output.kv("Wallet", &format!("₹{}", dashboard.wallet_balance));
            output.subheader("Popular services");
            for service in dashboard.featured {
                output.list_item(&format!("{} ({})", service.name, service.price));
            }
            output.subheader("Recent requests");
            output.table_header(&["Service", "Status", "Helper", "When"]);
            for request in dashboard.recent_requests {
                output.table_row(&[
                    request.service,
                    request.status.label(),
                    request.helper,
                    request.time,
                ]);
            }
            output.hint("Book a service with:");
            output.command("homehelp book");
        }
        SessionContext::Helper => {
            let dashboard = HelperDashboard::for_actor(actor);
            output.success(&dashboard.greeting);
            output.kv("Profile", &dashboard.headline);
            output.kv("Total earnings", &format!("₹{}", dashboard.stats.total_earnings));
            output.kv("This month", &format!("₹{}", dashboard.stats.monthly_earnings));
            output.kv("Jobs completed", &dashboard.stats.completed_jobs.to_string());
            output.kv("Rating", &format!("{:.1}", dashboard.stats.rating));
            output.kv("Response time", dashboard.stats.response_time);
            output.subheader("Recent jobs");
            output.table_header(&["Service", "Client", "Amount", "Status"]);
            for job in dashboard.recent_jobs {
                output.table_row(&[
                    job.service,
                    job.client,
                    &format!("₹{}", job.amount),
                    job.status.label(),
                ]);
            }
            let kind = match actor.role {
                Role::CasualHelper => "casual",
                _ => "professional",
            };
            output.hint("Wait for job offers with:");
            output.command(&format!("homehelp offers --kind {}", kind));
        }
    }
    output.kv("Page", &route.path());
}

fn context_title(context: SessionContext) -> &'static str {
    match context {
        SessionContext::Customer => "Customer",
        SessionContext::Helper => "Helper",
    }
}

fn mask(token: &str) -> String {
    let visible: String = token.chars().take(8).collect();
    if token.chars().count() > 8 {
        format!("{}…", visible)
    } else {
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(role: RoleArg) -> RegisterArgs {
        RegisterArgs {
            role,
            name: "Meera Nair".into(),
            email: "meera@example.com".into(),
            phone: "9876500000".into(),
            password: "pw".into(),
            confirm_password: None,
            address: Some("12 MG Road, Pune".into()),
            profession: Some("Electrician".into()),
            aadhar: Some("1234 5678 9012".into()),
            photo: None,
        }
    }

    #[test]
    fn test_customer_confirmation_defaults_to_password() {
        let registration = build_registration(&args(RoleArg::Customer)).unwrap().unwrap();
        assert_eq!(registration.role(), Role::Customer);

        let mut mismatched = args(RoleArg::Customer);
        mismatched.confirm_password = Some("other".into());
        assert_eq!(
            build_registration(&mismatched).unwrap(),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_helper_needs_photo() {
        assert_eq!(
            build_registration(&args(RoleArg::Casual)).unwrap(),
            Err(ValidationError::EmptyField("Profile photo"))
        );
    }

    #[test]
    fn test_helper_photo_is_read_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".PNG").tempfile().unwrap();
        file.write_all(&[0x89, b'P', b'N', b'G']).unwrap();

        let mut helper = args(RoleArg::Professional);
        helper.photo = Some(file.path().to_path_buf());
        let registration = build_registration(&helper).unwrap().unwrap();

        let photo = registration.helper().unwrap().photo();
        assert_eq!(photo.content_type, "image/png");
        assert_eq!(photo.bytes.len(), 4);
        assert_eq!(registration.profession(), Some("Electrician"));
    }

    #[test]
    fn test_missing_photo_file_is_io_error() {
        let mut helper = args(RoleArg::Casual);
        helper.photo = Some("/definitely/not/here.jpg".into());
        assert!(matches!(
            build_registration(&helper),
            Err(crate::AppError::Io(_))
        ));
    }

    #[test]
    fn test_mask_shortens_long_tokens() {
        assert_eq!(mask("local-1234567890"), "local-12…");
        assert_eq!(mask("t1"), "t1");
    }
}
