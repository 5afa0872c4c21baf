use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use super::report::Category;
use super::validation::{
    ValidationError, validate_email, validate_password, validate_required, validate_username,
};

/// What a desk user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Operator,
    Supervisor,
    Admin,
}

static ALL_ROLES: &[Role] = &[Role::Operator, Role::Supervisor, Role::Admin];

impl Role {
    pub fn all() -> &'static [Role] {
        ALL_ROLES
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operator => "operator",
            Self::Supervisor => "supervisor",
            Self::Admin => "admin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Operator => "Operator",
            Self::Supervisor => "Supervisor",
            Self::Admin => "Administrator",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|r| r.as_str() == s)
    }
}

#[mutants::skip]
impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Values a user enters on the account form.
///
/// An empty `password` on an existing account keeps the stored digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
    pub forward_categories: Vec<Category>,
    pub password: String,
    pub password_confirmation: String,
}

/// A desk account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
    /// Report categories this user receives forwarded copies of.
    #[serde(default)]
    pub forward_categories: Vec<Category>,
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted: bool,
}

const PBKDF2_ITERATIONS: u32 = 100_000;

/// Hex PBKDF2-HMAC-SHA256 key of the password, salted with the username.
pub fn password_digest(username: &str, password: &str) -> String {
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        username.as_bytes(),
        PBKDF2_ITERATIONS,
        &mut key,
    );
    key.iter().map(|b| format!("{b:02x}")).collect()
}

impl User {
    /// Validates a draft and builds an unsaved account. A password is mandatory.
    pub fn from_draft(draft: UserDraft) -> Result<Self, ValidationError> {
        if draft.password.is_empty() {
            return Err(ValidationError::Required("password"));
        }
        let mut user = Self {
            id: 0,
            username: String::new(),
            full_name: String::new(),
            email: String::new(),
            role: Role::default(),
            active: true,
            forward_categories: Vec::new(),
            password_digest: String::new(),
            created_at: Utc::now(),
            deleted: false,
        };
        user.apply(draft)?;
        Ok(user)
    }

    /// Validates a draft and copies it over this account.
    pub fn apply(&mut self, draft: UserDraft) -> Result<(), ValidationError> {
        let username = draft.username.trim().to_string();
        validate_username(&username)?;
        validate_required("full name", &draft.full_name)?;
        validate_email(&draft.email)?;
        if !draft.password.is_empty() {
            validate_password(&draft.password, &draft.password_confirmation)?;
        }

        // Renaming re-salts, so a rename without a new password is refused.
        if username != self.username && draft.password.is_empty() && self.id != 0 {
            return Err(ValidationError::Required("password"));
        }

        self.username = username;
        self.full_name = draft.full_name.trim().to_string();
        self.email = draft.email.trim().to_string();
        self.role = draft.role;
        self.active = draft.active;
        self.forward_categories = draft.forward_categories;
        if !draft.password.is_empty() {
            self.password_digest = password_digest(&self.username, &draft.password);
        }
        Ok(())
    }

    pub fn verify_password(&self, password: &str) -> bool {
        password_digest(&self.username, password) == self.password_digest
    }

    pub fn title(&self) -> String {
        if self.id == 0 {
            "New user".to_string()
        } else {
            format!("@{}", self.username)
        }
    }
}
