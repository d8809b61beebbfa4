use super::client::AuthClient;
use crate::types::{AppError, AuthAction, Result};
use homehelp_core::{Actor, Credentials, Registration, Session, SessionContext, TokenStore};

/// Session of one role context, wired to an auth client and a token store.
///
/// `login` and `register` report success as a plain bool. On failure the
/// previous session is left alone and [`last_error`](Self::last_error)
/// holds a message fit for display.
pub struct SessionHolder<A, S> {
    session: Session,
    client: A,
    store: S,
    last_error: Option<String>,
}

impl<A: AuthClient, S: TokenStore> SessionHolder<A, S> {
    pub fn new(context: SessionContext, client: A, store: S) -> Self {
        Self {
            session: Session::new(context),
            client,
            store,
            last_error: None,
        }
    }

    pub fn context(&self) -> SessionContext {
        self.session.context()
    }

    pub fn actor(&self) -> Option<&Actor> {
        self.session.actor()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Message of the last failed call, cleared by the next call.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Token stored for this context, whether or not an actor is loaded.
    pub fn stored_token(&self) -> Option<String> {
        match self.session.token(&self.store) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(context = %self.context(), error = %e, "failed to read token");
                None
            }
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        self.last_error = None;
        match self.try_login(email, password).await {
            Ok(()) => true,
            Err(e) => {
                self.fail(e, AuthAction::Login);
                false
            }
        }
    }

    pub async fn register(&mut self, registration: &Registration) -> bool {
        self.last_error = None;
        match self.try_register(registration).await {
            Ok(()) => true,
            Err(e) => {
                self.fail(e, AuthAction::Register);
                false
            }
        }
    }

    /// Forget the actor and drop the token. Safe to call when signed out.
    pub fn logout(&mut self) {
        self.last_error = None;
        if let Err(e) = self.session.end(&mut self.store) {
            tracing::warn!(context = %self.context(), error = %e, "failed to remove token");
        }
    }

    async fn try_login(&mut self, email: &str, password: &str) -> Result<()> {
        let credentials = Credentials::new(email, password)?;
        let grant = self.client.login(self.context(), &credentials).await?;
        self.session.establish(grant, &mut self.store)?;
        Ok(())
    }

    async fn try_register(&mut self, registration: &Registration) -> Result<()> {
        if registration.context() != self.context() {
            return Err(AppError::Internal(format!(
                "{} registration submitted to the {} area",
                registration.role(),
                self.context()
            )));
        }
        let grant = self.client.register(registration).await?;
        self.session.establish(grant, &mut self.store)?;
        Ok(())
    }

    fn fail(&mut self, error: AppError, action: AuthAction) {
        tracing::warn!(context = %self.context(), ?action, error = %error, "auth call failed");
        self.last_error = Some(error.user_message(action));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use homehelp_core::{AuthGrant, CustomerForm, MemoryTokenStore, Role};
    use mockall::mock;

    mock! {
        Client {}

        #[async_trait]
        impl AuthClient for Client {
            async fn login(&self, context: SessionContext, credentials: &Credentials) -> Result<AuthGrant>;
            async fn register(&self, registration: &Registration) -> Result<AuthGrant>;
        }
    }

    fn grant(role: Role, token: &str) -> AuthGrant {
        AuthGrant {
            token: token.to_string(),
            actor: Actor {
                id: "a1".into(),
                name: "Asha".into(),
                email: "asha@example.com".into(),
                phone: String::new(),
                role,
                profession: None,
                address: None,
                wallet_balance: 0,
            },
        }
    }

    #[tokio::test]
    async fn test_login_success_sets_actor_and_token() {
        let mut client = MockClient::new();
        client
            .expect_login()
            .times(1)
            .returning(|_, _| Ok(grant(Role::Customer, "t1")));
        let mut holder =
            SessionHolder::new(SessionContext::Customer, client, MemoryTokenStore::new());

        assert!(holder.login("asha@example.com", "pw").await);
        assert_eq!(holder.actor().map(|a| a.name.as_str()), Some("Asha"));
        assert_eq!(holder.stored_token().as_deref(), Some("t1"));
        assert!(holder.last_error().is_none());
    }

    #[tokio::test]
    async fn test_invalid_credentials_skip_the_network() {
        let mut client = MockClient::new();
        client.expect_login().never();
        let mut holder =
            SessionHolder::new(SessionContext::Customer, client, MemoryTokenStore::new());

        assert!(!holder.login("nobody", "pw").await);
        assert_eq!(holder.last_error(), Some("Please enter a valid email address"));
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_session() {
        let mut client = MockClient::new();
        let mut calls = 0;
        client.expect_login().times(2).returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Ok(grant(Role::Customer, "t1"))
            } else {
                Err(AppError::Auth("HTTP 401".into()))
            }
        });
        let mut holder =
            SessionHolder::new(SessionContext::Customer, client, MemoryTokenStore::new());

        assert!(holder.login("asha@example.com", "pw").await);
        assert!(!holder.login("asha@example.com", "wrong").await);

        assert_eq!(holder.last_error(), Some("Invalid email or password"));
        assert!(holder.is_active());
        assert_eq!(holder.stored_token().as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn test_foreign_role_is_rejected() {
        let mut client = MockClient::new();
        client
            .expect_login()
            .returning(|_, _| Ok(grant(Role::Customer, "t1")));
        let mut holder = SessionHolder::new(SessionContext::Helper, client, MemoryTokenStore::new());

        assert!(!holder.login("asha@example.com", "pw").await);
        assert!(!holder.is_active());
        assert!(holder.stored_token().is_none());
        assert_eq!(holder.last_error(), Some("Login failed. Please try again."));
    }

    #[tokio::test]
    async fn test_register_in_wrong_area_fails_without_call() {
        let mut client = MockClient::new();
        client.expect_register().never();
        let mut holder = SessionHolder::new(SessionContext::Helper, client, MemoryTokenStore::new());
        let registration = CustomerForm {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: "1".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
        }
        .validate()
        .unwrap();

        assert!(!holder.register(&registration).await);
        assert_eq!(
            holder.last_error(),
            Some("Registration failed. Please try again.")
        );
    }

    #[tokio::test]
    async fn test_logout_twice() {
        let mut client = MockClient::new();
        client
            .expect_login()
            .returning(|_, _| Ok(grant(Role::Customer, "t1")));
        let mut holder =
            SessionHolder::new(SessionContext::Customer, client, MemoryTokenStore::new());
        holder.login("asha@example.com", "pw").await;

        holder.logout();
        holder.logout();

        assert!(holder.actor().is_none());
        assert!(holder.stored_token().is_none());
    }
}
