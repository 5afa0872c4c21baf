//! User account form.

use crate::form::{FormField, SelectOption, TrackedForm};
use crate::model::{Category, Role, User, UserDraft, ValidationError};

pub const USERNAME: &str = "username";
pub const FULL_NAME: &str = "full_name";
pub const EMAIL: &str = "email";
pub const ROLE: &str = "role";
pub const ACTIVE: &str = "active";
pub const FORWARD_CATEGORIES: &str = "forward_categories";
pub const PASSWORD: &str = "password";
pub const PASSWORD_CONFIRMATION: &str = "password_confirmation";

fn role_options() -> Vec<SelectOption> {
    Role::all()
        .iter()
        .map(|r| SelectOption::new(r.as_str(), r.label()))
        .collect()
}

fn category_options() -> Vec<SelectOption> {
    Category::all()
        .iter()
        .map(|c| SelectOption::new(c.as_str(), c.label()))
        .collect()
}

fn build(
    username: &str,
    full_name: &str,
    email: &str,
    role: Role,
    active: bool,
    categories: &[Category],
) -> Vec<FormField> {
    let categories: Vec<&str> = categories.iter().map(|c| c.as_str()).collect();
    vec![
        FormField::text(USERNAME, "Username").required().with_text(username),
        FormField::text(FULL_NAME, "Full name").required().with_text(full_name),
        FormField::text(EMAIL, "Email").required().with_text(email),
        FormField::select(ROLE, "Role", role_options()).with_selected(&[role.as_str()]),
        FormField::checkbox(ACTIVE, "Active").with_checked(active),
        FormField::multi_select(FORWARD_CATEGORIES, "Receives forwards for", category_options())
            .with_selected(&categories),
        FormField::password(PASSWORD, "Password"),
        FormField::password(PASSWORD_CONFIRMATION, "Confirm password"),
    ]
}

pub fn blank_fields() -> Vec<FormField> {
    build("", "", "", Role::default(), true, &[])
}

pub fn fields(user: &User) -> Vec<FormField> {
    build(
        &user.username,
        &user.full_name,
        &user.email,
        user.role,
        user.active,
        &user.forward_categories,
    )
}

pub fn draft(form: &TrackedForm) -> UserDraft {
    let forward_categories = form
        .field(FORWARD_CATEGORIES)
        .map(|f| {
            f.selected_values()
                .into_iter()
                .filter_map(Category::parse)
                .collect()
        })
        .unwrap_or_default();
    UserDraft {
        username: form.value(USERNAME).to_string(),
        full_name: form.value(FULL_NAME).to_string(),
        email: form.value(EMAIL).to_string(),
        role: Role::parse(form.value(ROLE)).unwrap_or_default(),
        active: form.field(ACTIVE).is_some_and(|f| f.checked()),
        forward_categories,
        password: form.value(PASSWORD).to_string(),
        password_confirmation: form.value(PASSWORD_CONFIRMATION).to_string(),
    }
}

pub fn field_for(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::InvalidUsername(_) => USERNAME,
        ValidationError::Required("full name") => FULL_NAME,
        ValidationError::InvalidEmail(_) => EMAIL,
        ValidationError::PasswordMismatch => PASSWORD_CONFIRMATION,
        _ => PASSWORD,
    }
}
