//! Report form: field layout, draft extraction and error placement.

use chrono::Local;

use crate::form::{FormField, SelectOption, TrackedForm};
use crate::model::{
    CALL_TIME_FORMAT, Category, Department, Priority, Report, ReportDraft, ValidationError,
};

pub const CALLER_NAME: &str = "caller_name";
pub const CALLER_PHONE: &str = "caller_phone";
pub const CALL_RECEIVED: &str = "call_received";
pub const LOCATION: &str = "location";
pub const CATEGORY: &str = "category";
pub const PRIORITY: &str = "priority";
pub const DEPARTMENTS: &str = "departments";
pub const EMERGENCY: &str = "emergency_dispatched";
pub const FOLLOW_UP: &str = "follow_up";
pub const SUMMARY: &str = "summary";
pub const NARRATIVE: &str = "narrative";
pub const UPDATED_AT: &str = "updated_at";

fn category_options() -> Vec<SelectOption> {
    Category::all()
        .iter()
        .map(|c| SelectOption::new(c.as_str(), c.label()))
        .collect()
}

fn priority_options() -> Vec<SelectOption> {
    Priority::all()
        .iter()
        .map(|p| SelectOption::new(p.as_str(), p.label()))
        .collect()
}

fn department_options() -> Vec<SelectOption> {
    Department::all()
        .iter()
        .map(|d| SelectOption::new(d.as_str(), d.label()))
        .collect()
}

struct Values<'a> {
    caller_name: &'a str,
    caller_phone: &'a str,
    call_received: String,
    location: &'a str,
    category: Category,
    priority: Priority,
    departments: Vec<&'static str>,
    emergency: bool,
    follow_up: bool,
    summary: &'a str,
    narrative: &'a str,
    updated_at: String,
}

fn build(v: Values<'_>) -> Vec<FormField> {
    vec![
        FormField::text(CALLER_NAME, "Caller name")
            .required()
            .with_text(v.caller_name),
        FormField::text(CALLER_PHONE, "Caller phone").with_text(v.caller_phone),
        FormField::text(CALL_RECEIVED, "Call received (YYYY-MM-DD HH:MM)")
            .required()
            .with_text(v.call_received),
        FormField::text(LOCATION, "Location").with_text(v.location),
        FormField::select(CATEGORY, "Category", category_options())
            .with_selected(&[v.category.as_str()]),
        FormField::select(PRIORITY, "Priority", priority_options())
            .with_selected(&[v.priority.as_str()]),
        FormField::multi_select(DEPARTMENTS, "Departments notified", department_options())
            .with_selected(&v.departments),
        FormField::checkbox(EMERGENCY, "Emergency services dispatched").with_checked(v.emergency),
        FormField::checkbox(FOLLOW_UP, "Follow-up required").with_checked(v.follow_up),
        FormField::text(SUMMARY, "Summary")
            .required()
            .with_text(v.summary),
        FormField::text_area(NARRATIVE, "Narrative").with_text(v.narrative),
        FormField::text(UPDATED_AT, "Last updated")
            .read_only()
            .with_text(v.updated_at),
    ]
}

/// Fields for a report that has not been saved yet.
pub fn blank_fields() -> Vec<FormField> {
    build(Values {
        caller_name: "",
        caller_phone: "",
        call_received: Local::now().format(CALL_TIME_FORMAT).to_string(),
        location: "",
        category: Category::default(),
        priority: Priority::default(),
        departments: Vec::new(),
        emergency: false,
        follow_up: false,
        summary: "",
        narrative: "",
        updated_at: "never".to_string(),
    })
}

/// Fields rendered from a stored report.
pub fn fields(report: &Report) -> Vec<FormField> {
    build(Values {
        caller_name: &report.caller_name,
        caller_phone: &report.caller_phone,
        call_received: report.call_received.format(CALL_TIME_FORMAT).to_string(),
        location: &report.location,
        category: report.category,
        priority: report.priority,
        departments: report.departments.iter().map(|d| d.as_str()).collect(),
        emergency: report.emergency_dispatched,
        follow_up: report.follow_up,
        summary: &report.summary,
        narrative: &report.narrative,
        updated_at: report
            .updated_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
    })
}

/// Reads the form's current values into a draft.
pub fn draft(form: &TrackedForm) -> ReportDraft {
    let departments = form
        .field(DEPARTMENTS)
        .map(|f| {
            f.selected_values()
                .into_iter()
                .filter_map(Department::parse)
                .collect()
        })
        .unwrap_or_default();
    ReportDraft {
        caller_name: form.value(CALLER_NAME).to_string(),
        caller_phone: form.value(CALLER_PHONE).to_string(),
        call_received: form.value(CALL_RECEIVED).to_string(),
        location: form.value(LOCATION).to_string(),
        category: Category::parse(form.value(CATEGORY)).unwrap_or_default(),
        priority: Priority::parse(form.value(PRIORITY)).unwrap_or_default(),
        departments,
        emergency_dispatched: form.field(EMERGENCY).is_some_and(|f| f.checked()),
        follow_up: form.field(FOLLOW_UP).is_some_and(|f| f.checked()),
        summary: form.value(SUMMARY).to_string(),
        narrative: form.value(NARRATIVE).to_string(),
    }
}

/// The field a validation error belongs to.
pub fn field_for(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::Required("caller name") => CALLER_NAME,
        ValidationError::InvalidPhone(_) => CALLER_PHONE,
        ValidationError::InvalidTimestamp(_) => CALL_RECEIVED,
        _ => SUMMARY,
    }
}
