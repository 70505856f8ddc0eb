//! Structured profile data edited in the form view.
//!
//! [`ProfileDraft`] is the single source the markdown composer reads from.
//! It is owned by the editing session and only changes through field-level
//! edits and the per-section [`EntryList`] operations.

mod entry;

pub use entry::{Entry, EntryEnd, EntryId, EntryKind, MonthYear};

use crate::entries::EntryList;

/// Contact channels shown in the composed header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Email,
    Mobile,
    Linkedin,
    Twitter,
}

impl ContactField {
    pub const ALL: [Self; 4] = [Self::Email, Self::Mobile, Self::Linkedin, Self::Twitter];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Mobile => "Mobile",
            Self::Linkedin => "LinkedIn URL",
            Self::Twitter => "Twitter/X Profile",
        }
    }

    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Email => "your@example.com",
            Self::Mobile => "0903 335 4789",
            Self::Linkedin => "https://www.linkedin.com/in/your-profile",
            Self::Twitter => "https://www.x.com/username",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
}

impl ContactInfo {
    pub fn get(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::Email => self.email.as_deref(),
            ContactField::Mobile => self.mobile.as_deref(),
            ContactField::Linkedin => self.linkedin.as_deref(),
            ContactField::Twitter => self.twitter.as_deref(),
        }
    }

    /// Set a channel; an empty value clears it.
    pub fn set(&mut self, field: ContactField, value: String) {
        let value = (!value.is_empty()).then_some(value);
        match field {
            ContactField::Email => self.email = value,
            ContactField::Mobile => self.mobile = value,
            ContactField::Linkedin => self.linkedin = value,
            ContactField::Twitter => self.twitter = value,
        }
    }

    /// Channels with a non-blank value, in header order.
    pub fn present(&self) -> impl Iterator<Item = (ContactField, &str)> {
        ContactField::ALL.into_iter().filter_map(|field| {
            self.get(field)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(|value| (field, value))
        })
    }
}

/// Free-text fields of the main form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Contact(ContactField),
    Summary,
    Skills,
}

impl TextField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Contact(field) => field.label(),
            Self::Summary => "Professional Summary",
            Self::Skills => "Skills",
        }
    }

    pub const fn is_multiline(self) -> bool {
        matches!(self, Self::Summary | Self::Skills)
    }
}

/// The in-session structured profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDraft {
    pub contact: ContactInfo,
    pub summary: String,
    pub skills: String,
    pub experience: EntryList,
    pub education: EntryList,
    pub projects: EntryList,
}

impl Default for ProfileDraft {
    fn default() -> Self {
        Self {
            contact: ContactInfo::default(),
            summary: String::new(),
            skills: String::new(),
            experience: EntryList::new(EntryKind::Experience),
            education: EntryList::new(EntryKind::Education),
            projects: EntryList::new(EntryKind::Project),
        }
    }
}

impl ProfileDraft {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Contact(contact) => self.contact.get(contact).unwrap_or_default(),
            TextField::Summary => &self.summary,
            TextField::Skills => &self.skills,
        }
    }

    /// Replace a text field. Returns `true` if the value changed.
    pub fn set_text(&mut self, field: TextField, value: String) -> bool {
        if self.text(field) == value {
            return false;
        }
        match field {
            TextField::Contact(contact) => self.contact.set(contact, value),
            TextField::Summary => self.summary = value,
            TextField::Skills => self.skills = value,
        }
        true
    }

    pub const fn entries(&self, kind: EntryKind) -> &EntryList {
        match kind {
            EntryKind::Experience => &self.experience,
            EntryKind::Education => &self.education,
            EntryKind::Project => &self.projects,
        }
    }

    pub const fn entries_mut(&mut self, kind: EntryKind) -> &mut EntryList {
        match kind {
            EntryKind::Experience => &mut self.experience,
            EntryKind::Education => &mut self.education,
            EntryKind::Project => &mut self.projects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_reports_change() {
        let mut draft = ProfileDraft::default();
        assert!(draft.set_text(TextField::Summary, "Built things".to_string()));
        assert!(!draft.set_text(TextField::Summary, "Built things".to_string()));
        assert_eq!(draft.summary, "Built things");
    }

    #[test]
    fn test_empty_contact_value_clears_channel() {
        let mut draft = ProfileDraft::default();
        draft.set_text(TextField::Contact(ContactField::Email), "a@b.com".to_string());
        assert_eq!(draft.contact.email.as_deref(), Some("a@b.com"));
        draft.set_text(TextField::Contact(ContactField::Email), String::new());
        assert_eq!(draft.contact.email, None);
    }

    #[test]
    fn test_present_skips_blank_channels() {
        let contact = ContactInfo {
            email: Some("a@b.com".to_string()),
            mobile: Some("   ".to_string()),
            linkedin: None,
            twitter: Some("https://x.com/a".to_string()),
        };
        let present: Vec<_> = contact.present().map(|(field, _)| field).collect();
        assert_eq!(present, vec![ContactField::Email, ContactField::Twitter]);
    }

    #[test]
    fn test_entries_are_keyed_by_kind() {
        let draft = ProfileDraft::default();
        for kind in EntryKind::ALL {
            assert_eq!(draft.entries(kind).kind(), kind);
        }
    }
}
