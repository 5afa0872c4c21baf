//! Snapshot capturer: value copy of a form's fields used as the diff baseline.

use super::diff::{ChangeSet, ComparePolicy, DiffError, diff};
use super::field::{Control, FormField};
use super::registry::FormElementIndex;

/// Baseline of a form at capture time.
///
/// The live side is never stored; it is indexed from the form's current
/// fields whenever a diff is taken. A snapshot is replaced wholesale and
/// never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    clone: Vec<FormField>,
    taken: bool,
}

impl Snapshot {
    /// A snapshot that has not been taken yet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Captures a new baseline from `live`.
    ///
    /// When `baseline` is `None` the live fields are copied. A supplied
    /// baseline is used as the clone, with every select forced to the live
    /// selection.
    pub fn capture(live: &[FormField], baseline: Option<Vec<FormField>>) -> Self {
        let mut clone = baseline.unwrap_or_else(|| live.to_vec());
        sync_selects(live, &mut clone);
        Self { clone, taken: true }
    }

    /// Returns `true` once a baseline has been captured.
    pub fn is_taken(&self) -> bool {
        self.taken
    }

    /// The baseline field values.
    pub fn fields(&self) -> &[FormField] {
        &self.clone
    }

    /// Indexes the baseline.
    pub fn clone_index(&self) -> FormElementIndex<'_> {
        FormElementIndex::scan(&self.clone)
    }

    /// Diffs `live` against this baseline. An untaken snapshot has no changes.
    pub fn diff(&self, live: &[FormField], policy: &ComparePolicy) -> Result<ChangeSet, DiffError> {
        if !self.taken {
            return Ok(ChangeSet::default());
        }
        diff(&self.clone_index(), &FormElementIndex::scan(live), policy)
    }
}

/// Forces each select in `clone` to match the selection of the same-named
/// select in `live`.
///
/// Single selects copy the selected index. Multi-selects copy the selected
/// flag at every position whose option values agree.
fn sync_selects(live: &[FormField], clone: &mut [FormField]) {
    for target in clone.iter_mut() {
        let Some(source) = live.iter().rev().find(|f| f.name == target.name) else {
            continue;
        };
        match (&source.control, &mut target.control) {
            (Control::Select { options: from }, Control::Select { options: to }) => {
                let index = from.iter().position(|o| o.selected);
                for (i, option) in to.iter_mut().enumerate() {
                    option.selected = Some(i) == index;
                }
            }
            (Control::MultiSelect { options: from }, Control::MultiSelect { options: to }) => {
                for (src, dst) in from.iter().zip(to.iter_mut()) {
                    if src.value == dst.value {
                        dst.selected = src.selected;
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::form::field::SelectOption;

    fn options() -> Vec<SelectOption> {
        vec![
            SelectOption::new("A", "A"),
            SelectOption::new("B", "B"),
            SelectOption::new("C", "C"),
        ]
    }

    fn form() -> Vec<FormField> {
        vec![
            FormField::text("summary", "Summary"),
            FormField::select("category", "Category", options()),
            FormField::multi_select("departments", "Departments", options()),
            FormField::checkbox("follow_up", "Follow-up"),
        ]
    }

    #[test]
    fn empty_snapshot_is_not_taken() {
        let snapshot = Snapshot::empty();
        assert!(!snapshot.is_taken());
        assert!(snapshot.fields().is_empty());
    }

    #[test]
    fn empty_snapshot_diff_is_clean() {
        let snapshot = Snapshot::empty();
        let changes = snapshot.diff(&form(), &ComparePolicy::default()).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn capture_copies_live() {
        let live = form();
        let snapshot = Snapshot::capture(&live, None);
        assert!(snapshot.is_taken());
        assert_eq!(snapshot.fields(), live.as_slice());
    }

    #[test]
    fn capture_forces_single_select_to_live() {
        let mut live = form();
        if let Control::Select { options } = &mut live[1].control {
            options[2].selected = true;
        }
        let snapshot = Snapshot::capture(&live, Some(form()));
        assert_eq!(snapshot.fields()[1].selected_index(), Some(2));
    }

    #[test]
    fn capture_forces_multi_select_where_values_match() {
        let mut live = form();
        if let Control::MultiSelect { options } = &mut live[2].control {
            options[0].selected = true;
        }
        let mut baseline = form();
        if let Control::MultiSelect { options } = &mut baseline[2].control {
            // Position 1 disagrees on value; its flag must be left alone.
            options[1].value = "Z".into();
            options[1].selected = true;
        }
        let snapshot = Snapshot::capture(&live, Some(baseline));
        let selected = snapshot.fields()[2].selected_values();
        assert_eq!(selected, vec!["A", "Z"]);
    }

    #[test]
    fn supplied_baseline_keeps_text_values() {
        let live = form();
        let mut baseline = form();
        if let Control::Input { value, .. } = &mut baseline[0].control {
            *value = "stored".into();
        }
        let snapshot = Snapshot::capture(&live, Some(baseline));
        let changes = snapshot.diff(&live, &ComparePolicy::default()).unwrap();
        assert_eq!(changes.names(), ["summary"]);
    }

    #[quickcheck]
    fn fresh_snapshot_has_no_changes(text: String, checked: bool, pick: u8, multi: Vec<bool>) -> bool {
        let mut live = form();
        if let Control::Input { value, .. } = &mut live[0].control {
            *value = text;
        }
        if let Control::Select { options } = &mut live[1].control {
            options[usize::from(pick) % 3].selected = true;
        }
        if let Control::MultiSelect { options } = &mut live[2].control {
            for (option, on) in options.iter_mut().zip(multi) {
                option.selected = on;
            }
        }
        live[3].control = Control::Checkbox { checked };

        let snapshot = Snapshot::capture(&live, None);
        snapshot
            .diff(&live, &ComparePolicy::default())
            .is_ok_and(|c| c.is_empty())
    }
}
