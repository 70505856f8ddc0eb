use thiserror::Error;

use crate::profile::{Entry, EntryEnd, MonthYear};

/// Editable fields of the add-entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    Title,
    Organization,
    StartDate,
    EndDate,
    Description,
}

impl EntryField {
    pub const ALL: [Self; 5] = [
        Self::Title,
        Self::Organization,
        Self::StartDate,
        Self::EndDate,
        Self::Description,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Organization => "Organization",
            Self::StartDate => "Start date",
            Self::EndDate => "End date",
            Self::Description => "Description",
        }
    }

    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Title => "Title/Position",
            Self::Organization => "Organization/Company",
            Self::StartDate | Self::EndDate => "yyyy-MM",
            Self::Description => "Describe what you did",
        }
    }

    pub const fn is_multiline(self) -> bool {
        matches!(self, Self::Description)
    }
}

/// A field-level problem that blocks committing an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    Required(EntryField),
    #[error("{} must be a month like 2023-01", .0.label())]
    InvalidMonth(EntryField),
    #[error("End date is required unless this is your current position")]
    EndDateRequired,
}

impl ValidationError {
    pub const fn field(self) -> EntryField {
        match self {
            Self::Required(field) | Self::InvalidMonth(field) => field,
            Self::EndDateRequired => EntryField::EndDate,
        }
    }
}

/// Errors from one validation pass, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<ValidationError>);

impl FieldErrors {
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn get(&self, field: EntryField) -> Option<ValidationError> {
        self.0.iter().copied().find(|err| err.field() == field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ValidationError> + '_ {
        self.0.iter().copied()
    }

    fn push(&mut self, err: ValidationError) {
        if self.get(err.field()).is_none() {
            self.0.push(err);
        }
    }

    pub(super) fn clear(&mut self) {
        self.0.clear();
    }
}

/// The uncommitted add-entry buffer.
///
/// Dates are kept as typed text until validation turns the buffer into an
/// [`Entry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub title: String,
    pub organization: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

impl EntryForm {
    pub fn field(&self, field: EntryField) -> &str {
        match field {
            EntryField::Title => &self.title,
            EntryField::Organization => &self.organization,
            EntryField::StartDate => &self.start_date,
            EntryField::EndDate => &self.end_date,
            EntryField::Description => &self.description,
        }
    }

    /// Replace a field. The end date is locked while `current` is set.
    pub fn set_field(&mut self, field: EntryField, value: String) {
        match field {
            EntryField::Title => self.title = value,
            EntryField::Organization => self.organization = value,
            EntryField::StartDate => self.start_date = value,
            EntryField::EndDate if self.current => {}
            EntryField::EndDate => self.end_date = value,
            EntryField::Description => self.description = value,
        }
    }

    /// Checking `current` discards any typed end date.
    pub fn set_current(&mut self, current: bool) {
        self.current = current;
        if current {
            self.end_date.clear();
        }
    }

    /// Validate the buffer and build the entry it describes.
    ///
    /// A current entry never carries an end date, whatever was typed.
    ///
    /// # Errors
    ///
    /// Returns every field-level problem found.
    pub fn validate(&self) -> Result<Entry, FieldErrors> {
        let mut errors = FieldErrors::default();

        for (field, value) in [
            (EntryField::Title, &self.title),
            (EntryField::Organization, &self.organization),
            (EntryField::StartDate, &self.start_date),
        ] {
            if value.trim().is_empty() {
                errors.push(ValidationError::Required(field));
            }
        }

        let start = if self.start_date.trim().is_empty() {
            None
        } else {
            let parsed = MonthYear::parse(&self.start_date);
            if parsed.is_none() {
                errors.push(ValidationError::InvalidMonth(EntryField::StartDate));
            }
            parsed
        };

        let end = if self.current {
            Some(EntryEnd::Present)
        } else if self.end_date.trim().is_empty() {
            errors.push(ValidationError::EndDateRequired);
            None
        } else if let Some(month) = MonthYear::parse(&self.end_date) {
            Some(EntryEnd::Ended(month))
        } else {
            errors.push(ValidationError::InvalidMonth(EntryField::EndDate));
            None
        };

        match (start, end) {
            (Some(start), Some(end)) if errors.is_empty() => Ok(Entry::new(
                self.title.trim(),
                self.organization.trim(),
                start,
                end,
                self.description.trim(),
            )),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> EntryForm {
        EntryForm {
            title: "Engineer".to_string(),
            organization: "Acme".to_string(),
            start_date: "2023-01".to_string(),
            end_date: "2024-05".to_string(),
            current: false,
            description: "Did work".to_string(),
        }
    }

    #[test]
    fn test_valid_form_builds_entry() {
        let entry = filled().validate().unwrap();
        assert_eq!(entry.title, "Engineer");
        assert_eq!(entry.date_range(), "Jan 2023 - May 2024");
    }

    #[test]
    fn test_missing_required_fields_are_reported() {
        let errors = EntryForm::default().validate().unwrap_err();
        assert_eq!(
            errors.get(EntryField::Title),
            Some(ValidationError::Required(EntryField::Title))
        );
        assert_eq!(
            errors.get(EntryField::Organization),
            Some(ValidationError::Required(EntryField::Organization))
        );
        assert_eq!(
            errors.get(EntryField::StartDate),
            Some(ValidationError::Required(EntryField::StartDate))
        );
        assert_eq!(errors.get(EntryField::EndDate), Some(ValidationError::EndDateRequired));
        assert_eq!(errors.get(EntryField::Description), None);
    }

    #[test]
    fn test_error_messages_read_naturally() {
        assert_eq!(
            ValidationError::Required(EntryField::Title).to_string(),
            "Title is required"
        );
        assert_eq!(
            ValidationError::Required(EntryField::StartDate).to_string(),
            "Start date is required"
        );
    }

    #[test]
    fn test_description_is_optional() {
        let form = EntryForm {
            description: String::new(),
            ..filled()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_bad_month_is_reported_once() {
        let form = EntryForm {
            start_date: "January".to_string(),
            ..filled()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(EntryField::StartDate),
            Some(ValidationError::InvalidMonth(EntryField::StartDate))
        );
    }

    #[test]
    fn test_current_discards_end_date() {
        let form = EntryForm {
            current: true,
            ..filled()
        };
        let entry = form.validate().unwrap();
        assert!(entry.is_current());
        assert_eq!(entry.end_canonical(), "");
        assert_eq!(entry.date_range(), "Jan 2023 - Present");
    }

    #[test]
    fn test_set_current_clears_and_locks_end_date() {
        let mut form = filled();
        form.set_current(true);
        assert!(form.end_date.is_empty());
        form.set_field(EntryField::EndDate, "2025-01".to_string());
        assert!(form.end_date.is_empty());
        form.set_current(false);
        form.set_field(EntryField::EndDate, "2025-01".to_string());
        assert_eq!(form.end_date, "2025-01");
    }
}
