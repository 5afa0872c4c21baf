//! Input registry: indexes a form's fields into name-keyed partitions.

use super::field::{ControlKind, FormField};

/// Name-keyed collection that keeps first-insertion order.
///
/// Re-inserting an existing name replaces the entry in place, so the last
/// write wins while the position of the first write is kept.
#[derive(Debug, Clone, Default)]
pub struct Partition<'a> {
    entries: Vec<(&'a str, &'a FormField)>,
}

impl<'a> Partition<'a> {
    fn insert(&mut self, field: &'a FormField) {
        let name = field.name.as_str();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = field,
            None => self.entries.push((name, field)),
        }
    }

    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<&'a FormField> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, f)| *f)
    }

    /// Returns `true` if a field with this name is indexed.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates `(name, field)` pairs in stable order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a FormField)> + '_ {
        self.entries.iter().copied()
    }

    /// Iterates the indexed names in stable order.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    /// Returns the number of indexed fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A form's fields partitioned by control category.
///
/// Every entry of [`all`](Self::all) appears in exactly one of the four
/// partitions. Multi-selects live in the selects partition.
#[derive(Debug, Clone, Default)]
pub struct FormElementIndex<'a> {
    fields: Partition<'a>,
    checkboxes: Partition<'a>,
    selects: Partition<'a>,
    text_areas: Partition<'a>,
    all: Partition<'a>,
}

impl<'a> FormElementIndex<'a> {
    /// Scans `fields` in markup order and builds the index.
    pub fn scan(fields: &'a [FormField]) -> Self {
        let mut index = Self::default();
        for field in fields {
            match field.control.kind() {
                ControlKind::Checkbox => index.checkboxes.insert(field),
                ControlKind::Input => index.fields.insert(field),
                ControlKind::Select | ControlKind::MultiSelect => index.selects.insert(field),
                ControlKind::TextArea => index.text_areas.insert(field),
            }
        }

        let mut all = Partition::default();
        for partition in [
            &index.checkboxes,
            &index.fields,
            &index.selects,
            &index.text_areas,
        ] {
            for (_, field) in partition.iter() {
                all.insert(field);
            }
        }
        index.all = all;
        index
    }

    /// Plain single-line inputs, including secret ones.
    pub fn fields(&self) -> &Partition<'a> {
        &self.fields
    }

    pub fn checkboxes(&self) -> &Partition<'a> {
        &self.checkboxes
    }

    /// Single and multi selects.
    pub fn selects(&self) -> &Partition<'a> {
        &self.selects
    }

    pub fn text_areas(&self) -> &Partition<'a> {
        &self.text_areas
    }

    /// The multi-select subset of [`selects`](Self::selects).
    pub fn multi_selects(&self) -> impl Iterator<Item = (&'a str, &'a FormField)> + '_ {
        self.selects
            .iter()
            .filter(|(_, f)| f.control.kind() == ControlKind::MultiSelect)
    }

    /// All indexed fields: checkboxes, then fields, selects, text areas.
    pub fn all(&self) -> &Partition<'a> {
        &self.all
    }

    /// Looks up any indexed field by name.
    pub fn get(&self, name: &str) -> Option<&'a FormField> {
        self.all.get(name)
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
