//! Registration payloads, one variant per role.
//!
//! Forms collect raw text as the user types; [`CustomerForm::validate`] and
//! [`HelperForm::validate`] turn them into a [`Registration`], checking the
//! required fields of that role. A `Registration` value is therefore always
//! complete.

use crate::error::{require, ValidationError};
use crate::types::{Role, SessionContext};
use std::fmt;

/// Contact details every role provides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    name: String,
    email: String,
    phone: String,
    password: String,
}

impl ContactDetails {
    fn validate(
        name: &str,
        email: &str,
        phone: &str,
        password: &str,
    ) -> Result<Self, ValidationError> {
        let name = require("Full name", name)?;
        let email = require("Email", email)?;
        if !email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        let phone = require("Phone number", phone)?;
        if password.is_empty() {
            return Err(ValidationError::EmptyField("Password"));
        }
        Ok(Self {
            name,
            email,
            phone,
            password: password.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Profile photo uploaded by helpers.
#[derive(Clone, PartialEq, Eq)]
pub struct Photo {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Photo")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Details only helpers provide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperDetails {
    address: String,
    identity_number: String,
    photo: Photo,
}

impl HelperDetails {
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Aadhaar (identity document) number.
    pub fn identity_number(&self) -> &str {
        &self.identity_number
    }

    pub fn photo(&self) -> &Photo {
        &self.photo
    }
}

/// A complete registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Customer(ContactDetails),
    ProfessionalHelper {
        contact: ContactDetails,
        helper: HelperDetails,
        profession: String,
    },
    CasualHelper {
        contact: ContactDetails,
        helper: HelperDetails,
    },
}

impl Registration {
    pub fn role(&self) -> Role {
        match self {
            Registration::Customer(_) => Role::Customer,
            Registration::ProfessionalHelper { .. } => Role::ProfessionalHelper,
            Registration::CasualHelper { .. } => Role::CasualHelper,
        }
    }

    pub fn context(&self) -> SessionContext {
        self.role().context()
    }

    pub fn contact(&self) -> &ContactDetails {
        match self {
            Registration::Customer(contact)
            | Registration::ProfessionalHelper { contact, .. }
            | Registration::CasualHelper { contact, .. } => contact,
        }
    }

    pub fn helper(&self) -> Option<&HelperDetails> {
        match self {
            Registration::Customer(_) => None,
            Registration::ProfessionalHelper { helper, .. }
            | Registration::CasualHelper { helper, .. } => Some(helper),
        }
    }

    pub fn profession(&self) -> Option<&str> {
        match self {
            Registration::ProfessionalHelper { profession, .. } => Some(profession),
            _ => None,
        }
    }

    /// Text fields sent to the registration endpoint, photo excluded.
    ///
    /// Field names follow the backend form: `aadhar` carries the identity
    /// number and `type` the role.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let contact = self.contact();
        let mut fields = vec![
            ("name", contact.name.clone()),
            ("email", contact.email.clone()),
            ("phone", contact.phone.clone()),
            ("password", contact.password.clone()),
        ];
        if let Some(helper) = self.helper() {
            fields.push(("address", helper.address.clone()));
            fields.push(("aadhar", helper.identity_number.clone()));
        }
        if let Some(profession) = self.profession() {
            fields.push(("profession", profession.to_string()));
        }
        fields.push(("type", self.role().as_str().to_string()));
        fields
    }

    /// JSON body for registrations sent without a file upload.
    pub fn json_body(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .form_fields()
            .into_iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v)))
            .collect();
        serde_json::Value::Object(map)
    }
}

/// Customer sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl CustomerForm {
    pub fn validate(&self) -> Result<Registration, ValidationError> {
        let contact = ContactDetails::validate(&self.name, &self.email, &self.phone, &self.password)?;
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(Registration::Customer(contact))
    }
}

/// Helper sign-up form, shared by professional and casual helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelperForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub address: String,
    /// Required for professional helpers, ignored for casual ones.
    pub profession: String,
    pub identity_number: String,
    pub photo: Option<Photo>,
}

impl HelperForm {
    /// Validate for the given helper role. A customer role is rejected as a
    /// missing helper type.
    pub fn validate(&self, role: Role) -> Result<Registration, ValidationError> {
        if !role.is_helper() {
            return Err(ValidationError::EmptyField("Helper type"));
        }
        let contact = ContactDetails::validate(&self.name, &self.email, &self.phone, &self.password)?;
        let profession = match role {
            Role::ProfessionalHelper => Some(require("Profession", &self.profession)?),
            _ => None,
        };
        let address = require("Address", &self.address)?;
        let identity_number = require("Aadhar number", &self.identity_number)?;
        let photo = match &self.photo {
            Some(photo) if !photo.bytes.is_empty() => photo.clone(),
            _ => return Err(ValidationError::EmptyField("Profile photo")),
        };
        let helper = HelperDetails {
            address,
            identity_number,
            photo,
        };

        Ok(match profession {
            Some(profession) => Registration::ProfessionalHelper {
                contact,
                helper,
                profession,
            },
            None => Registration::CasualHelper { contact, helper },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn customer_form() -> CustomerForm {
        CustomerForm {
            name: "Asha Verma".into(),
            email: "asha@example.com".into(),
            phone: "+91-9876500000".into(),
            password: "hunter22".into(),
            confirm_password: "hunter22".into(),
        }
    }

    fn helper_form() -> HelperForm {
        HelperForm {
            name: "Rajesh Kumar".into(),
            email: "rajesh@example.com".into(),
            phone: "+91-9876511111".into(),
            password: "pipes4life".into(),
            address: "4 Katpadi Road, Vellore".into(),
            profession: "Plumber".into(),
            identity_number: "1234 5678 9012".into(),
            photo: Some(Photo {
                file_name: "me.jpg".into(),
                content_type: "image/jpeg".into(),
                bytes: vec![0xff, 0xd8, 0xff],
            }),
        }
    }

    #[test]
    fn test_customer_form_builds_customer_variant() {
        let registration = customer_form().validate().unwrap();
        assert_eq!(registration.role(), Role::Customer);
        assert_eq!(registration.contact().name(), "Asha Verma");
        assert!(registration.helper().is_none());
    }

    #[test]
    fn test_customer_password_mismatch() {
        let mut form = customer_form();
        form.confirm_password = "hunter23".into();
        assert_eq!(form.validate(), Err(ValidationError::PasswordMismatch));
    }

    #[rstest]
    #[case::name(|f: &mut CustomerForm| f.name.clear(), ValidationError::EmptyField("Full name"))]
    #[case::email(|f: &mut CustomerForm| f.email = "  ".into(), ValidationError::EmptyField("Email"))]
    #[case::bad_email(|f: &mut CustomerForm| f.email = "asha.example.com".into(), ValidationError::InvalidEmail)]
    #[case::phone(|f: &mut CustomerForm| f.phone.clear(), ValidationError::EmptyField("Phone number"))]
    fn test_customer_required_fields(
        #[case] edit: fn(&mut CustomerForm),
        #[case] expected: ValidationError,
    ) {
        let mut form = customer_form();
        edit(&mut form);
        assert_eq!(form.validate(), Err(expected));
    }

    #[test]
    fn test_professional_requires_profession() {
        let mut form = helper_form();
        form.profession = " ".into();
        assert_eq!(
            form.validate(Role::ProfessionalHelper),
            Err(ValidationError::EmptyField("Profession"))
        );
        // Casual helpers do not need one.
        let registration = form.validate(Role::CasualHelper).unwrap();
        assert_eq!(registration.role(), Role::CasualHelper);
        assert!(registration.profession().is_none());
    }

    #[test]
    fn test_helper_requires_photo() {
        let mut form = helper_form();
        form.photo = None;
        assert_eq!(
            form.validate(Role::CasualHelper),
            Err(ValidationError::EmptyField("Profile photo"))
        );
    }

    #[test]
    fn test_helper_form_rejects_customer_role() {
        assert!(helper_form().validate(Role::Customer).is_err());
    }

    #[test]
    fn test_form_fields_for_professional() {
        let registration = helper_form().validate(Role::ProfessionalHelper).unwrap();
        let fields = registration.form_fields();
        let get = |key: &str| {
            fields
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("aadhar"), Some("1234 5678 9012"));
        assert_eq!(get("profession"), Some("Plumber"));
        assert_eq!(get("type"), Some("professional_helper"));
        assert_eq!(registration.json_body()["address"], "4 Katpadi Road, Vellore");
    }
}
