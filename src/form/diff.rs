//! Diff engine: compares a baseline index against the live index.

use std::collections::BTreeSet;
use std::fmt;

use super::field::{Control, FormField};
use super::registry::FormElementIndex;

/// Errors raised when the baseline and live field sets cannot be paired.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// The baseline has a field the live form lacks.
    #[error("field `{0}` is missing from the live form")]
    MissingField(String),

    /// The live form has a field the baseline lacks.
    #[error("field `{0}` is not part of the baseline")]
    UnexpectedField(String),

    /// The same name maps to different control kinds.
    #[error("field `{0}` changed control kind since the baseline")]
    KindMismatch(String),
}

/// Per-form-type comparison rules.
///
/// Secret inputs are never compared. Names listed as non-comparable (derived
/// or volatile fields) are skipped as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparePolicy {
    non_comparable: BTreeSet<String>,
}

impl ComparePolicy {
    /// Creates a policy that additionally skips the given field names.
    pub fn new<I, S>(non_comparable: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            non_comparable: non_comparable.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if `field` is excluded from comparison.
    pub fn skips(&self, field: &FormField) -> bool {
        field.control.is_secret() || self.non_comparable.contains(&field.name)
    }
}

/// Ordered names of the fields that differ from the baseline.
///
/// Multi-select changes are reported per option as `{name}-{value}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet(Vec<String>);

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// Compares `clone` (baseline) against `state` (live).
///
/// Fields are paired by name. The result follows the iteration order of
/// `clone`. A name present on only one side, or bound to different control
/// kinds, is a [`DiffError`].
pub fn diff(
    clone: &FormElementIndex<'_>,
    state: &FormElementIndex<'_>,
    policy: &ComparePolicy,
) -> Result<ChangeSet, DiffError> {
    let mut changes = Vec::new();

    for (name, before) in clone.all().iter() {
        if policy.skips(before) {
            continue;
        }
        let after = state
            .get(name)
            .ok_or_else(|| DiffError::MissingField(name.to_string()))?;
        compare(name, before, after, &mut changes)?;
    }

    if let Some((name, _)) = state
        .all()
        .iter()
        .find(|(name, field)| !policy.skips(field) && clone.get(name).is_none())
    {
        return Err(DiffError::UnexpectedField(name.to_string()));
    }

    Ok(ChangeSet(changes))
}

fn compare(
    name: &str,
    before: &FormField,
    after: &FormField,
    changes: &mut Vec<String>,
) -> Result<(), DiffError> {
    match (&before.control, &after.control) {
        (Control::Checkbox { checked: a }, Control::Checkbox { checked: b }) => {
            if a != b {
                changes.push(name.to_string());
            }
        }
        (Control::MultiSelect { options: a }, Control::MultiSelect { options: b }) => {
            // Positional: a reordered option list is not itself a change.
            for (old, new) in a.iter().zip(b) {
                if old.value == new.value && old.selected != new.selected {
                    changes.push(format!("{name}-{}", new.value));
                }
            }
        }
        (Control::Select { .. }, Control::Select { .. }) => {
            if before.selected_index() != after.selected_index() {
                changes.push(name.to_string());
            }
        }
        (Control::Input { value: a, .. }, Control::Input { value: b, .. })
        | (Control::TextArea { value: a }, Control::TextArea { value: b }) => {
            if a != b {
                changes.push(name.to_string());
            }
        }
        _ => return Err(DiffError::KindMismatch(name.to_string())),
    }
    Ok(())
}
