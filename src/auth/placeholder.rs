use super::client::AuthClient;
use crate::types::Result;
use async_trait::async_trait;
use homehelp_core::{AuthGrant, Credentials, LocalAuth, Registration, Role, SessionContext};
use uuid::Uuid;

/// [`AuthClient`] that never leaves the process.
///
/// Login accepts any well-formed credentials and signs in the demo actor;
/// registration turns the submitted profile into an actor with a fresh id.
/// Tokens look like `local-<uuid>`.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderAuthClient {
    local: LocalAuth,
}

impl PlaceholderAuthClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Role of the demo actor signing in to the helper area.
    pub fn with_helper_role(mut self, role: Role) -> Self {
        self.local = self.local.with_helper_role(role);
        self
    }
}

#[async_trait]
impl AuthClient for PlaceholderAuthClient {
    async fn login(&self, context: SessionContext, credentials: &Credentials) -> Result<AuthGrant> {
        Ok(self
            .local
            .login(context, credentials, &Uuid::new_v4().to_string()))
    }

    async fn register(&self, registration: &Registration) -> Result<AuthGrant> {
        Ok(self.local.register(registration, &Uuid::new_v4().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homehelp_core::CustomerForm;

    #[tokio::test]
    async fn test_login_fabricates_demo_actor() {
        let client = PlaceholderAuthClient::new();
        let credentials = Credentials::new("meera@example.com", "pw").unwrap();

        let grant = client.login(SessionContext::Customer, &credentials).await.unwrap();

        assert_eq!(grant.actor.name, "John Doe");
        assert_eq!(grant.actor.email, "meera@example.com");
        assert_eq!(grant.actor.phone, "+91-9876543210");
        assert_eq!(grant.actor.wallet_balance, 1500);
        assert_eq!(grant.actor.role, Role::Customer);
        assert!(grant.token.starts_with("local-"));
    }

    #[tokio::test]
    async fn test_helper_login_uses_configured_role() {
        let client = PlaceholderAuthClient::new().with_helper_role(Role::CasualHelper);
        let credentials = Credentials::new("ravi@example.com", "pw").unwrap();

        let grant = client.login(SessionContext::Helper, &credentials).await.unwrap();
        assert_eq!(grant.actor.role, Role::CasualHelper);
        assert!(grant.actor.profession.is_none());
    }

    #[tokio::test]
    async fn test_customer_registration_gets_starting_wallet() {
        let registration = CustomerForm {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: "99999".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
        }
        .validate()
        .unwrap();

        let grant = PlaceholderAuthClient::new()
            .register(&registration)
            .await
            .unwrap();
        assert_eq!(grant.actor.wallet_balance, 500);
        assert_eq!(grant.actor.name, "Asha");
        assert!(Uuid::parse_str(&grant.actor.id).is_ok());
    }
}
