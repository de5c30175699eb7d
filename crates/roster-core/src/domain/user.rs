//! User entity.

use crate::validation::rules;
use crate::UserId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Maximum length, in characters, of a first or last name.
pub const NAME_MAX_LENGTH: u64 = 100;

/// Maximum length, in characters, of a contact number.
pub const CONTACT_NUMBER_MAX_LENGTH: u64 = 10;

/// A user record.
///
/// `id` is `None` until the record store assigns one on first save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier.
    pub id: Option<UserId>,

    #[validate(
        custom(function = "rules::not_empty", message = "First name is required"),
        length(max = 100, message = "First name must be at most 100 characters")
    )]
    pub first_name: String,

    #[validate(
        custom(function = "rules::not_empty", message = "Last name is required"),
        length(max = 100, message = "Last name must be at most 100 characters")
    )]
    pub last_name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        custom(function = "rules::email_if_present", message = "Email should be valid")
    )]
    pub email: String,

    #[validate(
        custom(function = "rules::not_empty", message = "Contact number is required"),
        length(max = 10, message = "Contact number must be at most 10 characters")
    )]
    pub contact_number: String,

    #[validate(custom(function = "rules::not_empty", message = "Address is required"))]
    pub address: String,

    #[validate(custom(function = "rules::not_empty", message = "Company name is required"))]
    pub company_name: String,
}

impl User {
    /// Creates a not-yet-persisted user.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        contact_number: impl Into<String>,
        address: impl Into<String>,
        company_name: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            contact_number: contact_number.into(),
            address: address.into(),
            company_name: company_name.into(),
        }
    }

    /// Returns this user carrying the given identifier.
    #[must_use]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns this user with its identifier cleared.
    #[must_use]
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    /// Returns the user's display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
