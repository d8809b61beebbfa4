//! Sign-ins answered without a backend.
//!
//! Used by every host when no auth endpoint is configured. The caller
//! supplies a fresh `nonce` per call; it becomes the token suffix
//! (`local-<nonce>`) and, for registrations, the actor id.

use crate::registration::Registration;
use crate::types::{Actor, AuthGrant, Credentials, Role, SessionContext};

const DEMO_NAME: &str = "John Doe";
const DEMO_PHONE: &str = "+91-9876543210";
const DEMO_WALLET: u64 = 1500;
const DEMO_PROFESSION: &str = "Plumber";
const CUSTOMER_STARTING_WALLET: u64 = 500;

/// Local grant factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalAuth {
    helper_role: Role,
}

impl Default for LocalAuth {
    fn default() -> Self {
        Self {
            helper_role: Role::ProfessionalHelper,
        }
    }
}

impl LocalAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Role of the demo actor signing in to the helper area. A non-helper
    /// role is ignored.
    pub fn with_helper_role(mut self, role: Role) -> Self {
        if role.is_helper() {
            self.helper_role = role;
        }
        self
    }

    pub fn helper_role(&self) -> Role {
        self.helper_role
    }

    /// Any well-formed credentials sign in the demo actor.
    pub fn login(&self, context: SessionContext, credentials: &Credentials, nonce: &str) -> AuthGrant {
        let role = match context {
            SessionContext::Customer => Role::Customer,
            SessionContext::Helper => self.helper_role,
        };
        tracing::debug!(%context, %role, "local login");
        AuthGrant {
            token: local_token(nonce),
            actor: Actor {
                id: "1".to_string(),
                name: DEMO_NAME.to_string(),
                email: credentials.email.clone(),
                phone: DEMO_PHONE.to_string(),
                role,
                profession: (role == Role::ProfessionalHelper).then(|| DEMO_PROFESSION.to_string()),
                address: None,
                wallet_balance: DEMO_WALLET,
            },
        }
    }

    /// The submitted profile becomes the actor. Customers start with a
    /// wallet of 500, helpers with nothing.
    pub fn register(&self, registration: &Registration, nonce: &str) -> AuthGrant {
        let role = registration.role();
        let contact = registration.contact();
        tracing::debug!(%role, "local registration");
        AuthGrant {
            token: local_token(nonce),
            actor: Actor {
                id: nonce.to_string(),
                name: contact.name().to_string(),
                email: contact.email().to_string(),
                phone: contact.phone().to_string(),
                role,
                profession: registration.profession().map(str::to_string),
                address: registration.helper().map(|h| h.address().to_string()),
                wallet_balance: if role.is_helper() { 0 } else { CUSTOMER_STARTING_WALLET },
            },
        }
    }
}

fn local_token(nonce: &str) -> String {
    format!("local-{}", nonce)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::{CustomerForm, HelperForm, Photo};

    fn credentials() -> Credentials {
        Credentials::new("meera@example.com", "pw").unwrap()
    }

    #[test]
    fn test_customer_login_is_demo_actor() {
        let grant = LocalAuth::new().login(SessionContext::Customer, &credentials(), "n1");

        assert_eq!(grant.token, "local-n1");
        assert_eq!(grant.actor.name, DEMO_NAME);
        assert_eq!(grant.actor.email, "meera@example.com");
        assert_eq!(grant.actor.wallet_balance, DEMO_WALLET);
        assert_eq!(grant.actor.role, Role::Customer);
        assert!(grant.actor.profession.is_none());
    }

    #[test]
    fn test_helper_login_role() {
        let professional = LocalAuth::new().login(SessionContext::Helper, &credentials(), "n");
        assert_eq!(professional.actor.role, Role::ProfessionalHelper);
        assert_eq!(professional.actor.profession.as_deref(), Some("Plumber"));

        let casual = LocalAuth::new()
            .with_helper_role(Role::CasualHelper)
            .login(SessionContext::Helper, &credentials(), "n");
        assert_eq!(casual.actor.role, Role::CasualHelper);
        assert!(casual.actor.profession.is_none());
    }

    #[test]
    fn test_customer_role_cannot_be_helper_role() {
        let auth = LocalAuth::new().with_helper_role(Role::Customer);
        assert_eq!(auth.helper_role(), Role::ProfessionalHelper);
    }

    #[test]
    fn test_registration_wallets() {
        let customer = CustomerForm {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: "99999".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
        }
        .validate()
        .unwrap();
        let grant = LocalAuth::new().register(&customer, "c-7");
        assert_eq!(grant.actor.id, "c-7");
        assert_eq!(grant.actor.name, "Asha");
        assert_eq!(grant.actor.wallet_balance, 500);

        let helper = HelperForm {
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            phone: "9000000000".into(),
            password: "pw".into(),
            address: "Sector 14, Gurgaon".into(),
            profession: String::new(),
            identity_number: "1234".into(),
            photo: Some(Photo {
                file_name: "ravi.png".into(),
                content_type: "image/png".into(),
                bytes: vec![1, 2, 3],
            }),
        }
        .validate(Role::CasualHelper)
        .unwrap();
        let grant = LocalAuth::new().register(&helper, "h-7");
        assert_eq!(grant.actor.role, Role::CasualHelper);
        assert_eq!(grant.actor.wallet_balance, 0);
        assert_eq!(grant.actor.address.as_deref(), Some("Sector 14, Gurgaon"));
    }
}
