//! Per-context session holder.
//!
//! A [`Session`] holds at most one [`Actor`] for its [`SessionContext`] and
//! mirrors the token into a [`TokenStore`]. It knows nothing about how the
//! grant was obtained; the host's auth client does that.

use crate::error::{Error, Result};
use crate::store::TokenStore;
use crate::types::{Actor, AuthGrant, SessionContext};

/// Session state of one role context.
#[derive(Debug, Clone)]
pub struct Session {
    context: SessionContext,
    actor: Option<Actor>,
}

impl Session {
    /// An empty session for `context`.
    pub fn new(context: SessionContext) -> Self {
        Self {
            context,
            actor: None,
        }
    }

    pub fn context(&self) -> SessionContext {
        self.context
    }

    /// The signed-in actor, if any.
    pub fn actor(&self) -> Option<&Actor> {
        self.actor.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.actor.is_some()
    }

    /// Install a grant: store the token under this context's key, then set the actor.
    ///
    /// A grant whose actor belongs to the other context is rejected and the
    /// session is left as it was. So is a grant whose token cannot be stored.
    pub fn establish(&mut self, grant: AuthGrant, store: &mut dyn TokenStore) -> Result<&Actor> {
        if !self.context.admits(grant.actor.role) {
            return Err(Error::RoleMismatch {
                context: self.context,
                role: grant.actor.role,
            });
        }
        store.set(self.context.token_key(), &grant.token)?;
        tracing::info!(
            context = %self.context,
            actor_id = %grant.actor.id,
            role = %grant.actor.role,
            "session established"
        );
        Ok(&*self.actor.insert(grant.actor))
    }

    /// Remove the token, then clear the actor. Ending an empty session is a
    /// no-op. If the token cannot be removed the session stays as it was.
    pub fn end(&mut self, store: &mut dyn TokenStore) -> Result<()> {
        store.remove(self.context.token_key())?;
        if let Some(actor) = self.actor.take() {
            tracing::info!(context = %self.context, actor_id = %actor.id, "session ended");
        }
        Ok(())
    }

    /// Token currently stored for this context.
    pub fn token(&self, store: &dyn TokenStore) -> Result<Option<String>> {
        store.get(self.context.token_key())
    }
}
