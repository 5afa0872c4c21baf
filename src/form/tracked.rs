//! A form instance that tracks its own dirty state.

use super::diff::{ChangeSet, ComparePolicy, DiffError};
use super::dirty::{Controls, DirtyState};
use super::field::{Control, FormField};
use super::snapshot::Snapshot;

/// An editable form with focus management and a diff baseline.
///
/// Every edit re-runs the diff synchronously, so [`controls`](Self::controls)
/// is never stale between two events.
#[derive(Debug, Clone)]
pub struct TrackedForm {
    fields: Vec<FormField>,
    focus: usize,
    option_cursor: usize,
    policy: ComparePolicy,
    snapshot: Snapshot,
    dirty: DirtyState,
}

impl TrackedForm {
    /// Creates a form with no baseline. Focus starts on the first editable field.
    pub fn new(fields: Vec<FormField>, policy: ComparePolicy) -> Self {
        let mut form = Self {
            fields,
            focus: 0,
            option_cursor: 0,
            policy,
            snapshot: Snapshot::empty(),
            dirty: DirtyState::new(),
        };
        form.focus = form.first_editable().unwrap_or(0);
        form
    }

    /// Captures the current fields as the baseline.
    pub fn take_snapshot(&mut self) -> Result<(), DiffError> {
        self.snapshot = Snapshot::capture(&self.fields, None);
        self.changed()
    }

    /// Captures a supplied baseline, e.g. the last persisted values.
    pub fn take_snapshot_from(&mut self, baseline: Vec<FormField>) -> Result<(), DiffError> {
        let snapshot = Snapshot::capture(&self.fields, Some(baseline));
        // Validate pairing before replacing the current baseline.
        snapshot.diff(&self.fields, &self.policy)?;
        self.snapshot = snapshot;
        self.changed()
    }

    /// Replaces all fields with freshly rendered ones and re-baselines.
    pub fn load(&mut self, fields: Vec<FormField>) -> Result<(), DiffError> {
        self.fields = fields;
        self.focus = self.first_editable().unwrap_or(0);
        self.option_cursor = 0;
        self.take_snapshot()
    }

    /// Restores every field to its baseline value, discarding edits.
    pub fn revert(&mut self) -> Result<(), DiffError> {
        if !self.snapshot.is_taken() {
            return Ok(());
        }
        self.fields = self.snapshot.fields().to_vec();
        self.clear_errors();
        self.changed()
    }

    /// The "value changed" signal: recomputes the change set.
    pub fn changed(&mut self) -> Result<(), DiffError> {
        self.dirty.refresh(&self.snapshot, &self.fields, &self.policy)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn changes(&self) -> &ChangeSet {
        self.dirty.changes()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    pub fn controls(&self) -> Controls {
        self.dirty.controls()
    }

    /// Sets the explicit state of the send control.
    pub fn set_send_allowed(&mut self, allowed: bool) {
        self.dirty.set_send_allowed(allowed);
    }

    pub fn policy(&self) -> &ComparePolicy {
        &self.policy
    }

    // --- Focus ---

    /// Returns the index of the focused field.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Returns the focused field, if any.
    pub fn focused(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    /// Returns the option under the cursor in a focused multi-select.
    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    /// Moves focus to the next editable field, wrapping around.
    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    /// Moves focus to the previous editable field, wrapping around.
    pub fn focus_prev(&mut self) {
        self.step_focus(self.fields.len().saturating_sub(1));
    }

    /// Moves focus to the named field if it is editable.
    pub fn focus_field(&mut self, name: &str) {
        if let Some(i) = self.position(name)
            && !self.fields[i].read_only
        {
            self.focus = i;
            self.option_cursor = 0;
        }
    }

    fn step_focus(&mut self, step: usize) {
        let len = self.fields.len();
        if len == 0 {
            return;
        }
        let mut next = self.focus;
        for _ in 0..len {
            next = (next + step) % len;
            if !self.fields[next].read_only {
                self.focus = next;
                self.option_cursor = 0;
                return;
            }
        }
    }

    fn first_editable(&self) -> Option<usize> {
        self.fields.iter().position(|f| !f.read_only)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    fn focused_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus).filter(|f| !f.read_only)
    }

    // --- Editing the focused field ---

    /// Appends a character to the focused input or text area.
    pub fn insert_char(&mut self, ch: char) -> Result<(), DiffError> {
        if let Some(field) = self.focused_mut() {
            match &mut field.control {
                Control::Input { value, .. } | Control::TextArea { value } => value.push(ch),
                _ => return Ok(()),
            }
        }
        self.changed()
    }

    /// Inserts a line break into a focused text area.
    pub fn insert_newline(&mut self) -> Result<(), DiffError> {
        if let Some(field) = self.focused_mut()
            && let Control::TextArea { value } = &mut field.control
        {
            value.push('\n');
        }
        self.changed()
    }

    /// Deletes the last character of the focused input or text area.
    pub fn delete_char(&mut self) -> Result<(), DiffError> {
        if let Some(field) = self.focused_mut() {
            match &mut field.control {
                Control::Input { value, .. } | Control::TextArea { value } => {
                    value.pop();
                }
                _ => return Ok(()),
            }
        }
        self.changed()
    }

    /// Toggles a focused checkbox, or the option under the cursor of a
    /// focused multi-select.
    pub fn toggle(&mut self) -> Result<(), DiffError> {
        let cursor = self.option_cursor;
        if let Some(field) = self.focused_mut() {
            match &mut field.control {
                Control::Checkbox { checked } => *checked = !*checked,
                Control::MultiSelect { options } => {
                    if let Some(option) = options.get_mut(cursor) {
                        option.selected = !option.selected;
                    }
                }
                _ => return Ok(()),
            }
        }
        self.changed()
    }

    /// Cycles a focused single select, or moves the multi-select cursor.
    pub fn cycle(&mut self, forward: bool) -> Result<(), DiffError> {
        let mut cursor = self.option_cursor;
        if let Some(field) = self.focused_mut() {
            match &mut field.control {
                Control::Select { options } if !options.is_empty() => {
                    let len = options.len();
                    let next = match options.iter().position(|o| o.selected) {
                        Some(i) if forward => (i + 1) % len,
                        Some(i) => (i + len - 1) % len,
                        None if forward => 0,
                        None => len - 1,
                    };
                    for (i, option) in options.iter_mut().enumerate() {
                        option.selected = i == next;
                    }
                }
                Control::MultiSelect { options } if !options.is_empty() => {
                    let len = options.len();
                    cursor = if forward {
                        (cursor + 1) % len
                    } else {
                        (cursor + len - 1) % len
                    };
                }
                _ => return Ok(()),
            }
        }
        self.option_cursor = cursor;
        self.changed()
    }

    // --- Programmatic updates by name ---

    /// Sets the text of a named input or text area.
    pub fn set_text(&mut self, name: &str, text: impl Into<String>) -> Result<(), DiffError> {
        if let Some(i) = self.position(name) {
            match &mut self.fields[i].control {
                Control::Input { value, .. } | Control::TextArea { value } => *value = text.into(),
                _ => return Ok(()),
            }
        }
        self.changed()
    }

    /// Sets a named checkbox.
    pub fn set_checked(&mut self, name: &str, on: bool) -> Result<(), DiffError> {
        if let Some(i) = self.position(name)
            && let Control::Checkbox { checked } = &mut self.fields[i].control
        {
            *checked = on;
        }
        self.changed()
    }

    /// Selects `value` in a named select or multi-select.
    ///
    /// A single select deselects everything else; a multi-select only
    /// changes the matching option.
    pub fn set_selected(&mut self, name: &str, value: &str, on: bool) -> Result<(), DiffError> {
        if let Some(i) = self.position(name) {
            match &mut self.fields[i].control {
                Control::Select { options } => {
                    for option in options.iter_mut() {
                        option.selected = on && option.value == value;
                    }
                }
                Control::MultiSelect { options } => {
                    for option in options.iter_mut().filter(|o| o.value == value) {
                        option.selected = on;
                    }
                }
                _ => return Ok(()),
            }
        }
        self.changed()
    }

    // --- Errors and values ---

    /// Sets an error message on a named field.
    pub fn set_error(&mut self, name: &str, error: impl Into<String>) {
        if let Some(i) = self.position(name) {
            self.fields[i].error = Some(error.into());
        }
    }

    /// Clears all field errors.
    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.error = None;
        }
    }

    /// Returns `true` if any field has an error set.
    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| f.error.is_some())
    }

    /// Returns the named field.
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the textual value of the named field, or `""` if absent.
    pub fn value(&self, name: &str) -> &str {
        self.field(name).map_or("", FormField::value)
    }

    /// Returns the fields in display order.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }
}
