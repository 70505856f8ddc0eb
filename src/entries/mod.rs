//! One repeated profile section: committed entries plus the add-entry form.
//!
//! Each [`EntryList`] owns at most one open [`EntryForm`]. Every time a form
//! is opened it gets a fresh generation number, so an improvement result that
//! arrives after the form was committed, cancelled, or reopened is dropped
//! instead of landing in the wrong buffer.

mod form;

pub use form::{EntryField, EntryForm, FieldErrors, ValidationError};

use crate::profile::{Entry, EntryId, EntryKind};
use crate::services::ServiceError;

/// Payload for one description-improvement request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImproveRequest {
    pub kind: EntryKind,
    pub generation: u64,
    pub text: String,
}

/// Why an improvement request was not issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImproveBlocked {
    InFlight,
    NoForm,
    EmptyDescription,
}

/// What happened when an improvement result came back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImproveOutcome {
    Applied,
    /// The form that asked is gone; the result was dropped.
    Stale,
    Failed(ServiceError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryList {
    kind: EntryKind,
    entries: Vec<Entry>,
    form: Option<EntryForm>,
    errors: FieldErrors,
    form_generation: u64,
    improving: Option<u64>,
}

impl EntryList {
    pub const fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            form: None,
            errors: FieldErrors::empty(),
            form_generation: 0,
            improving: None,
        }
    }

    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn is_adding(&self) -> bool {
        self.form.is_some()
    }

    pub const fn form(&self) -> Option<&EntryForm> {
        self.form.as_ref()
    }

    pub const fn form_mut(&mut self) -> Option<&mut EntryForm> {
        self.form.as_mut()
    }

    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub const fn form_generation(&self) -> u64 {
        self.form_generation
    }

    pub const fn is_improving(&self) -> bool {
        self.improving.is_some()
    }

    /// Whether an improvement request would be issued right now.
    pub fn can_improve(&self) -> bool {
        self.improving.is_none()
            && self
                .form
                .as_ref()
                .is_some_and(|form| !form.description.trim().is_empty())
    }

    /// Open an empty add-entry form. Does nothing if one is already open.
    pub fn open_form(&mut self) {
        if self.form.is_none() {
            self.form_generation += 1;
            self.form = Some(EntryForm::default());
            self.errors.clear();
        }
    }

    /// Discard the form buffer and its errors.
    pub fn cancel_form(&mut self) {
        self.form = None;
        self.errors.clear();
    }

    /// Validate and append a candidate entry.
    ///
    /// On success the add-form (if any) is closed and reset. On failure the
    /// list is untouched and the field errors are kept for display.
    ///
    /// # Errors
    ///
    /// Returns the field errors when the candidate does not validate.
    pub fn add_entry(&mut self, candidate: &EntryForm) -> Result<EntryId, FieldErrors> {
        match candidate.validate() {
            Ok(entry) => {
                let id = entry.id();
                tracing::debug!(kind = ?self.kind, %id, "entry added");
                self.entries.push(entry);
                self.cancel_form();
                Ok(id)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    /// Commit the open form. `None` if no form is open.
    pub fn submit_form(&mut self) -> Option<Result<EntryId, FieldErrors>> {
        let candidate = self.form.clone()?;
        Some(self.add_entry(&candidate))
    }

    /// Remove an entry by id. Returns `false` if no entry has that id.
    pub fn delete_entry(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id() != id);
        self.entries.len() != before
    }

    /// Remove the entry at `index`, if any.
    pub fn delete_at(&mut self, index: usize) -> Option<Entry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Mark an improvement as in flight and build its request.
    ///
    /// # Errors
    ///
    /// Returns why no request was issued; the caller treats that as a no-op.
    pub fn begin_improve(&mut self) -> Result<ImproveRequest, ImproveBlocked> {
        if self.improving.is_some() {
            return Err(ImproveBlocked::InFlight);
        }
        let form = self.form.as_ref().ok_or(ImproveBlocked::NoForm)?;
        if form.description.trim().is_empty() {
            return Err(ImproveBlocked::EmptyDescription);
        }
        self.improving = Some(self.form_generation);
        Ok(ImproveRequest {
            kind: self.kind,
            generation: self.form_generation,
            text: form.description.clone(),
        })
    }

    /// Settle an improvement request.
    ///
    /// The in-flight flag always clears. A successful result replaces the
    /// description only when the form that asked is still open.
    pub fn finish_improve(
        &mut self,
        generation: u64,
        result: Result<String, ServiceError>,
    ) -> ImproveOutcome {
        if self.improving == Some(generation) {
            self.improving = None;
        }
        match result {
            Err(err) => ImproveOutcome::Failed(err),
            Ok(text) => match self.form.as_mut() {
                Some(form) if generation == self.form_generation => {
                    form.description = text;
                    ImproveOutcome::Applied
                }
                _ => ImproveOutcome::Stale,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, start: &str) -> EntryForm {
        EntryForm {
            title: title.to_string(),
            organization: "Acme".to_string(),
            start_date: start.to_string(),
            end_date: "2024-05".to_string(),
            current: false,
            description: "Shipped the thing".to_string(),
        }
    }

    fn list_with(titles: &[&str]) -> EntryList {
        let mut list = EntryList::new(EntryKind::Experience);
        for title in titles {
            list.add_entry(&form(title, "2023-01")).unwrap();
        }
        list
    }

    #[test]
    fn test_add_entry_appends_in_order() {
        let list = list_with(&["a", "b", "c"]);
        let titles: Vec<_> = list.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_add_entry_missing_title_is_rejected() {
        let mut list = list_with(&["a"]);
        let errors = list.add_entry(&form("", "2023-01")).unwrap_err();
        assert_eq!(list.len(), 1);
        assert_eq!(
            errors.get(EntryField::Title).map(|e| e.to_string()),
            Some("Title is required".to_string())
        );
        assert_eq!(list.errors(), &errors);
    }

    #[test]
    fn test_add_entry_missing_start_is_rejected() {
        let mut list = EntryList::new(EntryKind::Education);
        assert!(list.add_entry(&form("BSc", "")).is_err());
        assert!(list.is_empty());
        assert!(list.errors().get(EntryField::StartDate).is_some());
    }

    #[test]
    fn test_submit_closes_form_and_clears_errors() {
        let mut list = EntryList::new(EntryKind::Project);
        list.open_form();
        assert!(list.submit_form().unwrap().is_err());
        assert!(list.is_adding());
        assert!(!list.errors().is_empty());

        *list.form_mut().unwrap() = form("Tool", "2022-03");
        assert!(list.submit_form().unwrap().is_ok());
        assert!(!list.is_adding());
        assert!(list.errors().is_empty());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_submit_without_form_is_none() {
        let mut list = EntryList::new(EntryKind::Project);
        assert!(list.submit_form().is_none());
    }

    #[test]
    fn test_cancel_resets_buffer() {
        let mut list = EntryList::new(EntryKind::Experience);
        list.open_form();
        list.form_mut().unwrap().title = "half typed".to_string();
        list.cancel_form();
        list.open_form();
        assert_eq!(list.form(), Some(&EntryForm::default()));
    }

    #[test]
    fn test_delete_keeps_relative_order() {
        let mut list = list_with(&["a", "b", "c"]);
        let id = list.entries()[1].id();
        assert!(list.delete_entry(id));
        assert!(!list.delete_entry(id));
        let titles: Vec<_> = list.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);

        assert_eq!(list.delete_at(0).map(|e| e.title), Some("a".to_string()));
        assert!(list.delete_at(5).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_improve_applies_to_same_open_form() {
        let mut list = EntryList::new(EntryKind::Experience);
        list.open_form();
        list.form_mut().unwrap().description = "did stuff".to_string();

        let request = list.begin_improve().unwrap();
        assert_eq!(request.text, "did stuff");
        assert_eq!(request.kind.context_type(), "experience");
        assert!(list.is_improving());
        assert_eq!(list.begin_improve(), Err(ImproveBlocked::InFlight));

        let outcome = list.finish_improve(request.generation, Ok("Delivered stuff".to_string()));
        assert_eq!(outcome, ImproveOutcome::Applied);
        assert!(!list.is_improving());
        assert_eq!(list.form().unwrap().description, "Delivered stuff");
    }

    #[test]
    fn test_improve_blocked_on_blank_description() {
        let mut list = EntryList::new(EntryKind::Experience);
        assert_eq!(list.begin_improve(), Err(ImproveBlocked::NoForm));
        list.open_form();
        list.form_mut().unwrap().description = "   ".to_string();
        assert!(!list.can_improve());
        assert_eq!(list.begin_improve(), Err(ImproveBlocked::EmptyDescription));
        assert!(!list.is_improving());
    }

    #[test]
    fn test_improve_result_for_closed_form_is_dropped() {
        let mut list = EntryList::new(EntryKind::Experience);
        list.open_form();
        list.form_mut().unwrap().description = "did stuff".to_string();
        let request = list.begin_improve().unwrap();

        list.cancel_form();
        list.open_form();
        list.form_mut().unwrap().description = "new text".to_string();

        let outcome = list.finish_improve(request.generation, Ok("Improved".to_string()));
        assert_eq!(outcome, ImproveOutcome::Stale);
        assert_eq!(list.form().unwrap().description, "new text");
        assert!(!list.is_improving());
    }

    #[test]
    fn test_improve_failure_leaves_description() {
        let mut list = EntryList::new(EntryKind::Project);
        list.open_form();
        list.form_mut().unwrap().description = "did stuff".to_string();
        let request = list.begin_improve().unwrap();

        let err = ServiceError::Failed("boom".to_string());
        let outcome = list.finish_improve(request.generation, Err(err.clone()));
        assert_eq!(outcome, ImproveOutcome::Failed(err));
        assert_eq!(list.form().unwrap().description, "did stuff");
        assert!(list.can_improve());
    }
}
