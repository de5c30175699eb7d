//! User pages.

use super::{escape, names, ViewRenderer};
use crate::flash::{FlashLevel, Notice};
use roster_core::{FieldError, User, UserId};
use roster_service::UserForm;
use std::fmt::Write;

/// One editable input: label, form name, validation key, input type.
struct FormField {
    label: &'static str,
    name: &'static str,
    error_key: &'static str,
    input_type: &'static str,
}

const FORM_FIELDS: [FormField; 6] = [
    FormField {
        label: "First name",
        name: "firstName",
        error_key: "first_name",
        input_type: "text",
    },
    FormField {
        label: "Last name",
        name: "lastName",
        error_key: "last_name",
        input_type: "text",
    },
    FormField {
        label: "Email",
        name: "email",
        error_key: "email",
        input_type: "email",
    },
    FormField {
        label: "Contact number",
        name: "contactNumber",
        error_key: "contact_number",
        input_type: "tel",
    },
    FormField {
        label: "Address",
        name: "address",
        error_key: "address",
        input_type: "text",
    },
    FormField {
        label: "Company name",
        name: "companyName",
        error_key: "company_name",
        input_type: "text",
    },
];

impl ViewRenderer {
    /// Renders the user list with its search box and optional notice.
    #[must_use]
    pub fn user_list(&self, users: &[User], last_name: &str, notice: Option<Notice>) -> String {
        let mut body = String::new();

        if let Some(notice) = notice {
            let class = match notice.level() {
                FlashLevel::Message => "flash flash-message",
                FlashLevel::Error => "flash flash-error",
            };
            let _ = writeln!(body, "<div class=\"{class}\" role=\"status\">{}</div>", escape(notice.text()));
        }

        let _ = writeln!(
            body,
            "<form method=\"get\" action=\"/users\" class=\"search\">\n\
             <label for=\"lastName\">Last name</label>\n\
             <input type=\"search\" id=\"lastName\" name=\"lastName\" value=\"{}\">\n\
             <button type=\"submit\">Search</button>\n\
             </form>\n\
             <p><a href=\"/users/register\">Register a new user</a></p>",
            escape(last_name),
        );

        if users.is_empty() {
            let _ = writeln!(body, "<p class=\"empty\" data-user-count=\"0\">No users found.</p>");
            return self.layout(names::USER_LIST, "Users", &body);
        }

        let _ = writeln!(
            body,
            "<form method=\"post\" action=\"/users/bulk-delete\">\n\
             <table data-user-count=\"{}\">\n\
             <thead><tr><th></th><th>ID</th><th>First name</th><th>Last name</th><th>Email</th>\
             <th>Contact number</th><th>Address</th><th>Company name</th><th>Actions</th></tr></thead>\n\
             <tbody>",
            users.len(),
        );

        for user in users {
            let id = user.id.map(|id| id.to_string()).unwrap_or_default();
            let _ = writeln!(
                body,
                "<tr data-user-id=\"{id}\">\
                 <td><input type=\"checkbox\" name=\"userIds\" value=\"{id}\"></td>\
                 <td>{id}</td>{cells}\
                 <td><a href=\"/users/edit/{id}\">Edit</a> \
                 <a href=\"/users/confirm-delete?userId={id}\">Delete</a></td></tr>",
                cells = user_cells(user),
            );
        }

        let _ = writeln!(
            body,
            "</tbody>\n</table>\n\
             <button type=\"submit\" formmethod=\"get\" formaction=\"/users/show\">Show selected</button>\n\
             <button type=\"submit\">Delete selected</button>\n\
             </form>",
        );

        self.layout(names::USER_LIST, "Users", &body)
    }

    /// Renders the registration form.
    #[must_use]
    pub fn register(&self, form: &UserForm, errors: &[FieldError]) -> String {
        let body = user_form("/users/register", "Register", None, form, errors);
        self.layout(names::REGISTER, "Register user", &body)
    }

    /// Renders the edit form for an existing user.
    #[must_use]
    pub fn edit(&self, form: &UserForm, errors: &[FieldError]) -> String {
        let body = user_form("/users/update", "Update", form.id, form, errors);
        self.layout(names::EDIT, "Edit user", &body)
    }

    /// Renders the delete confirmation page.
    #[must_use]
    pub fn confirm_delete(&self, user: &User) -> String {
        let id = user.id.map(|id| id.to_string()).unwrap_or_default();
        let body = format!(
            "<p>Delete <strong>{name}</strong> ({email})?</p>\n\
             <form method=\"post\" action=\"/users/delete?userId={id}\">\n\
             <button type=\"submit\">Delete</button>\n\
             <a href=\"/users\">Cancel</a>\n\
             </form>\n",
            name = escape(&user.full_name()),
            email = escape(&user.email),
        );
        self.layout(names::CONFIRM_DELETE, "Confirm delete", &body)
    }

    /// Renders one row per requested id; unresolved ids get a placeholder row.
    #[must_use]
    pub fn show(&self, rows: &[(UserId, Option<User>)]) -> String {
        let mut body = format!(
            "<table data-user-count=\"{}\">\n\
             <thead><tr><th>ID</th><th>First name</th><th>Last name</th><th>Email</th>\
             <th>Contact number</th><th>Address</th><th>Company name</th></tr></thead>\n\
             <tbody>\n",
            rows.len(),
        );

        for (id, user) in rows {
            let _ = match user {
                Some(user) => writeln!(body, "<tr data-user-id=\"{id}\"><td>{id}</td>{}</tr>", user_cells(user)),
                None => writeln!(
                    body,
                    "<tr data-user-id=\"{id}\" class=\"missing\"><td>{id}</td>\
                     <td colspan=\"6\">User {id} not found</td></tr>",
                ),
            };
        }

        body.push_str("</tbody>\n</table>\n<p><a href=\"/users\">Back to users</a></p>\n");
        self.layout(names::SHOW, "Selected users", &body)
    }
}

fn user_cells(user: &User) -> String {
    [
        &user.first_name,
        &user.last_name,
        &user.email,
        &user.contact_number,
        &user.address,
        &user.company_name,
    ]
    .iter()
    .fold(String::new(), |mut cells, value| {
        let _ = write!(cells, "<td>{}</td>", escape(value));
        cells
    })
}

fn form_value<'a>(form: &'a UserForm, name: &str) -> &'a str {
    match name {
        "firstName" => form.first_name.as_str(),
        "lastName" => form.last_name.as_str(),
        "email" => form.email.as_str(),
        "contactNumber" => form.contact_number.as_str(),
        "address" => form.address.as_str(),
        "companyName" => form.company_name.as_str(),
        _ => "",
    }
}

fn user_form(
    action: &str,
    submit: &str,
    id: Option<UserId>,
    form: &UserForm,
    errors: &[FieldError],
) -> String {
    let mut body = format!("<form method=\"post\" action=\"{action}\">\n");

    if let Some(id) = id {
        let _ = writeln!(body, "<input type=\"hidden\" name=\"id\" value=\"{id}\">");
    }

    for field in &FORM_FIELDS {
        let _ = writeln!(
            body,
            "<p>\n<label for=\"{name}\">{label}</label>\n\
             <input type=\"{input_type}\" id=\"{name}\" name=\"{name}\" value=\"{value}\">",
            name = field.name,
            label = field.label,
            input_type = field.input_type,
            value = escape(form_value(form, field.name)),
        );
        for error in errors.iter().filter(|e| e.field == field.error_key) {
            let _ = writeln!(
                body,
                "<span class=\"field-error\" data-field=\"{}\">{}</span>",
                field.name,
                escape(&error.message),
            );
        }
        body.push_str("</p>\n");
    }

    let _ = writeln!(
        body,
        "<button type=\"submit\">{submit}</button>\n<a href=\"/users\">Cancel</a>\n</form>",
    );
    body
}
