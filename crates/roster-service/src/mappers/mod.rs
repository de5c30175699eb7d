//! Entity-DTO mappers.

use crate::dto::UserForm;
use roster_core::User;

impl From<UserForm> for User {
    fn from(form: UserForm) -> Self {
        Self {
            id: form.id,
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            contact_number: form.contact_number,
            address: form.address,
            company_name: form.company_name,
        }
    }
}

impl From<User> for UserForm {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            contact_number: user.contact_number,
            address: user.address,
            company_name: user.company_name,
        }
    }
}
