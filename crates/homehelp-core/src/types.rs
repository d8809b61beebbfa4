//! Common types shared by every flow.

use crate::error::{require, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============= Actors =============

/// Role of an actor on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Someone booking services. Older backends call this `user`.
    #[serde(alias = "user")]
    Customer,
    /// Certified tradesperson (plumber, electrician, ...).
    ProfessionalHelper,
    /// General help without specialised skills.
    CasualHelper,
}

impl Role {
    /// The session context this role signs in to.
    pub fn context(self) -> SessionContext {
        match self {
            Role::Customer => SessionContext::Customer,
            Role::ProfessionalHelper | Role::CasualHelper => SessionContext::Helper,
        }
    }

    /// Whether this is one of the helper roles.
    pub fn is_helper(self) -> bool {
        self.context() == SessionContext::Helper
    }

    /// Category of offers a helper with this role receives.
    pub fn helper_category(self) -> Option<ServiceCategory> {
        match self {
            Role::Customer => None,
            Role::ProfessionalHelper => Some(ServiceCategory::Professional),
            Role::CasualHelper => Some(ServiceCategory::Casual),
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::ProfessionalHelper => "Professional Helper",
            Role::CasualHelper => "Casual Helper",
        }
    }

    /// Wire name, as used in registration forms.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::ProfessionalHelper => "professional_helper",
            Role::CasualHelper => "casual_helper",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two independent session areas of the app.
///
/// Customers and helpers sign in separately and each area holds at most one
/// actor at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionContext {
    /// Customer area.
    Customer,
    /// Helper area (professional and casual helpers).
    Helper,
}

impl SessionContext {
    /// Both contexts, customer first.
    pub const ALL: [SessionContext; 2] = [SessionContext::Customer, SessionContext::Helper];

    /// Token storage key for this context.
    pub fn token_key(self) -> &'static str {
        match self {
            SessionContext::Customer => "customer_token",
            SessionContext::Helper => "helper_token",
        }
    }

    /// Path segment of this context's auth endpoints.
    pub fn api_segment(self) -> &'static str {
        match self {
            SessionContext::Customer => "customer",
            SessionContext::Helper => "helper",
        }
    }

    /// Whether an actor with `role` may hold a session in this context.
    pub fn admits(self, role: Role) -> bool {
        role.context() == self
    }
}

impl fmt::Display for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_segment())
    }
}

impl FromStr for SessionContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" | "user" => Ok(SessionContext::Customer),
            "helper" => Ok(SessionContext::Helper),
            other => Err(format!("unknown session context '{}'", other)),
        }
    }
}

/// The signed-in customer or helper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(alias = "type")]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Wallet balance in whole rupees.
    #[serde(default, alias = "wallet")]
    pub wallet_balance: u64,
}

impl Actor {
    /// Short description shown under the name on dashboards.
    pub fn headline(&self) -> String {
        match (self.role, self.profession.as_deref()) {
            (Role::ProfessionalHelper, Some(p)) if !p.is_empty() => format!("Professional {}", p),
            (role, _) => role.label().to_string(),
        }
    }
}

/// Email and password as typed into a login form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Validate a login form. Both fields are required and the email must contain `@`.
    pub fn new(email: &str, password: &str) -> Result<Self, ValidationError> {
        let email = require("Email", email)?;
        if !email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(ValidationError::EmptyField("Password"));
        }
        Ok(Self {
            email,
            password: password.to_string(),
        })
    }
}

/// Successful outcome of a login or registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    /// Opaque session token.
    pub token: String,
    /// The actor the token belongs to.
    pub actor: Actor,
}

// ============= Services =============

/// The two kinds of service on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    /// Skilled trades.
    #[default]
    Professional,
    /// Everyday tasks.
    Casual,
}

impl ServiceCategory {
    /// Both categories in display order.
    pub const ALL: [ServiceCategory; 2] = [ServiceCategory::Professional, ServiceCategory::Casual];

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceCategory::Professional => "professional",
            ServiceCategory::Casual => "casual",
        }
    }

    /// Heading used on category pickers.
    pub fn label(self) -> &'static str {
        match self {
            ServiceCategory::Professional => "Professional Services",
            ServiceCategory::Casual => "General Help",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "professional" => Ok(ServiceCategory::Professional),
            "casual" => Ok(ServiceCategory::Casual),
            other => Err(format!("unknown service category '{}'", other)),
        }
    }
}

/// How soon a job needs doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
    Emergency,
}

impl Urgency {
    /// All levels, least urgent first.
    pub const ALL: [Urgency; 4] = [Urgency::Low, Urgency::Medium, Urgency::High, Urgency::Emergency];

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Emergency => "emergency",
        }
    }

    /// Option text for the urgency picker.
    pub fn description(self) -> &'static str {
        match self {
            Urgency::Low => "Low - Within a week",
            Urgency::Medium => "Medium - Within 2-3 days",
            Urgency::High => "High - Within 24 hours",
            Urgency::Emergency => "Emergency - ASAP",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            "emergency" => Ok(Urgency::Emergency),
            other => Err(format!("unknown urgency '{}'", other)),
        }
    }
}

/// Price range in whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRange {
    pub min: u32,
    pub max: u32,
}

impl PayRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for PayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}-{}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_actor_accepts_legacy_field_names() {
        let actor: Actor = serde_json::from_value(json!({
            "_id": "64f0",
            "name": "Meena",
            "email": "meena@example.com",
            "phone": "+91-9000000000",
            "type": "user",
            "wallet": 250
        }))
        .unwrap();

        assert_eq!(actor.id, "64f0");
        assert_eq!(actor.role, Role::Customer);
        assert_eq!(actor.wallet_balance, 250);
        assert!(actor.profession.is_none());
    }

    #[test]
    fn test_actor_serializes_camel_case() {
        let actor = Actor {
            id: "7".into(),
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            phone: String::new(),
            role: Role::ProfessionalHelper,
            profession: Some("Electrician".into()),
            address: None,
            wallet_balance: 0,
        };
        let value = serde_json::to_value(&actor).unwrap();
        assert_eq!(value["role"], "professional_helper");
        assert_eq!(value["walletBalance"], 0);
        assert!(value.get("address").is_none());
        assert_eq!(actor.headline(), "Professional Electrician");
    }

    #[test]
    fn test_contexts_admit_their_roles_only() {
        assert!(SessionContext::Customer.admits(Role::Customer));
        assert!(!SessionContext::Customer.admits(Role::CasualHelper));
        assert!(SessionContext::Helper.admits(Role::ProfessionalHelper));
        assert!(SessionContext::Helper.admits(Role::CasualHelper));
        assert!(!SessionContext::Helper.admits(Role::Customer));
    }

    #[test]
    fn test_credentials_validation() {
        assert!(Credentials::new("a@b.in", "secret").is_ok());
        assert_eq!(
            Credentials::new("", "secret"),
            Err(ValidationError::EmptyField("Email"))
        );
        assert_eq!(
            Credentials::new("not-an-email", "secret"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            Credentials::new("a@b.in", ""),
            Err(ValidationError::EmptyField("Password"))
        );
    }

    #[test]
    fn test_pay_range_display() {
        assert_eq!(PayRange::new(800, 1200).to_string(), "₹800-1200");
    }

    #[test]
    fn test_urgency_round_trip_through_str() {
        for urgency in Urgency::ALL {
            assert_eq!(urgency.as_str().parse::<Urgency>().unwrap(), urgency);
        }
        assert!("soon".parse::<Urgency>().is_err());
    }
}
