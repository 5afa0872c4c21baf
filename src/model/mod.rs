mod query;
mod report;
mod user;
mod validation;

pub use query::{Page, Query, ReportQuery, UserQuery, paginate};
pub use report::{CALL_TIME_FORMAT, Category, Department, Priority, Report, ReportDraft};
pub use user::{Role, User, UserDraft, password_digest};
pub use validation::{
    MIN_PASSWORD_LEN, ValidationError, validate_email, validate_password, validate_phone,
    validate_required, validate_timestamp, validate_username,
};
