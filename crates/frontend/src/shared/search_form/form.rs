use contracts::shared::search_form::FieldValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Text input or select
    Text,
    Checkbox,
}

impl FieldKind {
    /// Whether a stored value can be applied to a field of this kind.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        matches!(
            (self, value),
            (FieldKind::Text, FieldValue::Text(_)) | (FieldKind::Checkbox, FieldValue::Checked(_))
        )
    }
}

/// Current state of one field of the rendered form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    pub id: Option<String>,
    pub kind: FieldKind,
    pub value: FieldValue,
}

impl FormField {
    pub fn text(id: &str, value: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            kind: FieldKind::Text,
            value: FieldValue::Text(value.to_string()),
        }
    }

    pub fn checkbox(id: &str, checked: bool) -> Self {
        Self {
            id: Some(id.to_string()),
            kind: FieldKind::Checkbox,
            value: FieldValue::Checked(checked),
        }
    }

    /// Element id; an empty id counts as none.
    pub fn identifier(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// A rendered search form.
pub trait SearchForm {
    /// Text/select fields first, then checkboxes, each group in document order.
    fn fields(&self) -> Vec<FormField>;

    /// Set every field with element id `id` whose kind accepts `value`.
    fn write(&mut self, id: &str, value: &FieldValue);
}
