//! Plain field records: the unit of identity for dirty-state tracking.

/// One option of a [`Control::Select`] or [`Control::MultiSelect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted value, also used to name multi-select changes.
    pub value: String,
    /// Text shown to the user.
    pub label: String,
    /// Whether this option is currently selected.
    pub selected: bool,
}

impl SelectOption {
    /// Creates an unselected option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected: false,
        }
    }
}

/// The interactive part of a field and its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    /// Single-line input. `secret` inputs are masked and never compared.
    Input { secret: bool, value: String },
    /// Boolean toggle.
    Checkbox { checked: bool },
    /// Exclusive choice; at most one option is selected.
    Select { options: Vec<SelectOption> },
    /// Any subset of the options may be selected.
    MultiSelect { options: Vec<SelectOption> },
    /// Multi-line free text.
    TextArea { value: String },
}

/// Coarse category of a [`Control`], used for partitioning and pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Input,
    Checkbox,
    Select,
    MultiSelect,
    TextArea,
}

impl Control {
    /// Returns the coarse kind of this control.
    pub fn kind(&self) -> ControlKind {
        match self {
            Self::Input { .. } => ControlKind::Input,
            Self::Checkbox { .. } => ControlKind::Checkbox,
            Self::Select { .. } => ControlKind::Select,
            Self::MultiSelect { .. } => ControlKind::MultiSelect,
            Self::TextArea { .. } => ControlKind::TextArea,
        }
    }

    /// Returns `true` for password-style inputs.
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Input { secret: true, .. })
    }
}

/// A single named field of an entity form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Unique key within the form.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Current control state.
    pub control: Control,
    /// Whether the field must be non-empty on submit.
    pub required: bool,
    /// Read-only fields are displayed but never focused or edited.
    pub read_only: bool,
    /// Validation error message, if any.
    pub error: Option<String>,
}

impl FormField {
    fn with_control(name: impl Into<String>, label: impl Into<String>, control: Control) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            control,
            required: false,
            read_only: false,
            error: None,
        }
    }

    /// Creates an empty single-line text input.
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_control(
            name,
            label,
            Control::Input {
                secret: false,
                value: String::new(),
            },
        )
    }

    /// Creates an empty masked input.
    pub fn password(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_control(
            name,
            label,
            Control::Input {
                secret: true,
                value: String::new(),
            },
        )
    }

    /// Creates an unchecked checkbox.
    pub fn checkbox(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_control(name, label, Control::Checkbox { checked: false })
    }

    /// Creates a single select with nothing selected.
    pub fn select(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::with_control(name, label, Control::Select { options })
    }

    /// Creates a multi-select with nothing selected.
    pub fn multi_select(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::with_control(name, label, Control::MultiSelect { options })
    }

    /// Creates an empty text area.
    pub fn text_area(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_control(
            name,
            label,
            Control::TextArea {
                value: String::new(),
            },
        )
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the field as read-only.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Sets the text of an input or text area; other controls are unchanged.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        if let Control::Input { value, .. } | Control::TextArea { value } = &mut self.control {
            *value = text.into();
        }
        self
    }

    /// Sets a checkbox's state; other controls are unchanged.
    pub fn with_checked(mut self, on: bool) -> Self {
        if let Control::Checkbox { checked } = &mut self.control {
            *checked = on;
        }
        self
    }

    /// Selects exactly the options whose value is in `values`.
    pub fn with_selected<S: AsRef<str>>(mut self, values: &[S]) -> Self {
        if let Control::Select { options } | Control::MultiSelect { options } = &mut self.control {
            for option in options.iter_mut() {
                option.selected = values.iter().any(|v| v.as_ref() == option.value);
            }
        }
        self
    }

    /// Returns the textual value of the field.
    ///
    /// Inputs and text areas return their text, a single select returns the
    /// selected option's value, checkboxes and multi-selects return `""`.
    pub fn value(&self) -> &str {
        match &self.control {
            Control::Input { value, .. } | Control::TextArea { value } => value,
            Control::Select { options } => options
                .iter()
                .find(|o| o.selected)
                .map_or("", |o| o.value.as_str()),
            Control::Checkbox { .. } | Control::MultiSelect { .. } => "",
        }
    }

    /// Returns whether a checkbox is checked; `false` for other controls.
    pub fn checked(&self) -> bool {
        matches!(self.control, Control::Checkbox { checked: true })
    }

    /// Returns the position of the first selected option of a single select.
    pub fn selected_index(&self) -> Option<usize> {
        match &self.control {
            Control::Select { options } => options.iter().position(|o| o.selected),
            _ => None,
        }
    }

    /// Returns the values of all selected options of a select or multi-select.
    pub fn selected_values(&self) -> Vec<&str> {
        match &self.control {
            Control::Select { options } | Control::MultiSelect { options } => options
                .iter()
                .filter(|o| o.selected)
                .map(|o| o.value.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Returns `true` if the field holds no user-supplied value.
    pub fn is_blank(&self) -> bool {
        match &self.control {
            Control::Input { value, .. } | Control::TextArea { value } => value.trim().is_empty(),
            Control::Checkbox { checked } => !checked,
            Control::Select { options } | Control::MultiSelect { options } => {
                !options.iter().any(|o| o.selected)
            }
        }
    }
}
