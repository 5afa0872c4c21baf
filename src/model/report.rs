use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    ValidationError, validate_phone, validate_required, validate_timestamp,
};

/// Kind of incident reported by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Noise,
    Theft,
    Vandalism,
    Traffic,
    Medical,
    Suspicious,
    Other,
}

static ALL_CATEGORIES: &[Category] = &[
    Category::Noise,
    Category::Theft,
    Category::Vandalism,
    Category::Traffic,
    Category::Medical,
    Category::Suspicious,
    Category::Other,
];

impl Category {
    /// Returns all categories in display order.
    pub fn all() -> &'static [Category] {
        ALL_CATEGORIES
    }

    /// Stable identifier used in forms and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Noise => "noise",
            Self::Theft => "theft",
            Self::Vandalism => "vandalism",
            Self::Traffic => "traffic",
            Self::Medical => "medical",
            Self::Suspicious => "suspicious",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Noise => "Noise complaint",
            Self::Theft => "Theft",
            Self::Vandalism => "Vandalism",
            Self::Traffic => "Traffic",
            Self::Medical => "Medical",
            Self::Suspicious => "Suspicious activity",
            Self::Other => "Other",
        }
    }

    /// Parses the identifier produced by [`as_str`](Self::as_str).
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.as_str() == s)
    }
}

#[mutants::skip]
impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Urgency assigned by the call taker.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

static ALL_PRIORITIES: &[Priority] = &[
    Priority::Low,
    Priority::Normal,
    Priority::High,
    Priority::Critical,
];

impl Priority {
    pub fn all() -> &'static [Priority] {
        ALL_PRIORITIES
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.as_str() == s)
    }
}

#[mutants::skip]
impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Agencies a report may be passed on to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Police,
    Fire,
    Ambulance,
    PublicWorks,
    AnimalControl,
}

static ALL_DEPARTMENTS: &[Department] = &[
    Department::Police,
    Department::Fire,
    Department::Ambulance,
    Department::PublicWorks,
    Department::AnimalControl,
];

impl Department {
    pub fn all() -> &'static [Department] {
        ALL_DEPARTMENTS
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Police => "police",
            Self::Fire => "fire",
            Self::Ambulance => "ambulance",
            Self::PublicWorks => "public_works",
            Self::AnimalControl => "animal_control",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Police => "Police",
            Self::Fire => "Fire",
            Self::Ambulance => "Ambulance",
            Self::PublicWorks => "Public works",
            Self::AnimalControl => "Animal control",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|d| d.as_str() == s)
    }
}

#[mutants::skip]
impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Format of the call-received timestamp as typed by the user.
pub const CALL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Values a user enters for a report, before the store assigns identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDraft {
    pub caller_name: String,
    pub caller_phone: String,
    pub call_received: String,
    pub location: String,
    pub category: Category,
    pub priority: Priority,
    pub departments: Vec<Department>,
    pub emergency_dispatched: bool,
    pub follow_up: bool,
    pub summary: String,
    pub narrative: String,
}

/// A phone call incident report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Store-assigned identifier; `0` until first saved.
    pub id: u64,
    pub caller_name: String,
    pub caller_phone: String,
    pub call_received: NaiveDateTime,
    pub location: String,
    pub category: Category,
    pub priority: Priority,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub emergency_dispatched: bool,
    #[serde(default)]
    pub follow_up: bool,
    pub summary: String,
    #[serde(default)]
    pub narrative: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub forwarded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted: bool,
}

impl Report {
    /// Validates a draft and builds an unsaved report.
    pub fn from_draft(draft: ReportDraft) -> Result<Self, ValidationError> {
        let now = Utc::now();
        let mut report = Self {
            id: 0,
            caller_name: String::new(),
            caller_phone: String::new(),
            call_received: now.naive_utc(),
            location: String::new(),
            category: Category::default(),
            priority: Priority::default(),
            departments: Vec::new(),
            emergency_dispatched: false,
            follow_up: false,
            summary: String::new(),
            narrative: String::new(),
            created_at: now,
            updated_at: now,
            forwarded_at: None,
            deleted: false,
        };
        report.apply(draft)?;
        Ok(report)
    }

    /// Validates a draft and copies it over this report's editable fields.
    ///
    /// Identity, timestamps and workflow flags are left untouched.
    pub fn apply(&mut self, draft: ReportDraft) -> Result<(), ValidationError> {
        validate_required("caller name", &draft.caller_name)?;
        if !draft.caller_phone.is_empty() {
            validate_phone(&draft.caller_phone)?;
        }
        let call_received = validate_timestamp(&draft.call_received)?;
        validate_required("summary", &draft.summary)?;

        self.caller_name = draft.caller_name.trim().to_string();
        self.caller_phone = draft.caller_phone.trim().to_string();
        self.call_received = call_received;
        self.location = draft.location.trim().to_string();
        self.category = draft.category;
        self.priority = draft.priority;
        self.departments = draft.departments;
        self.emergency_dispatched = draft.emergency_dispatched;
        self.follow_up = draft.follow_up;
        self.summary = draft.summary.trim().to_string();
        self.narrative = draft.narrative;
        Ok(())
    }

    /// Returns `true` once the report has been forwarded.
    pub fn is_forwarded(&self) -> bool {
        self.forwarded_at.is_some()
    }

    /// Forwarding is possible for live, saved, not yet forwarded reports.
    pub fn can_forward(&self) -> bool {
        self.id != 0 && !self.deleted && !self.is_forwarded()
    }

    /// Short one-line title for tabs and lists.
    pub fn title(&self) -> String {
        if self.id == 0 {
            "New report".to_string()
        } else {
            format!("#{} {}", self.id, self.summary)
        }
    }
}
