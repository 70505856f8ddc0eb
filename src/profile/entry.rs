//! Committed profile entries and the month dates they carry.

use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

/// Which repeated section of the profile an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Experience,
    Education,
    Project,
}

impl EntryKind {
    pub const ALL: [Self; 3] = [Self::Experience, Self::Education, Self::Project];

    /// Singular label used in form text ("Add Experience", "Current Project").
    pub const fn label(self) -> &'static str {
        match self {
            Self::Experience => "Experience",
            Self::Education => "Education",
            Self::Project => "Project",
        }
    }

    /// Heading of the composed markdown section.
    pub const fn section_title(self) -> &'static str {
        match self {
            Self::Experience => "Work Experience",
            Self::Education => "Education",
            Self::Project => "Projects",
        }
    }

    /// Context type handed to the text-improvement service.
    pub const fn context_type(self) -> &'static str {
        match self {
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Project => "project",
        }
    }
}

/// Opaque identifier assigned to an entry when it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// A calendar month.
///
/// Canonical (stored) form is `yyyy-MM`; display form is `MMM yyyy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear(NaiveDate);

impl MonthYear {
    /// Parse a canonical `yyyy-MM` month. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (year, month) = input.split_once('-')?;
        let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !digits(year) || !digits(month) {
            return None;
        }
        NaiveDate::parse_from_str(&format!("{input}-01"), "%Y-%m-%d")
            .ok()
            .map(Self)
    }

    pub fn canonical(self) -> String {
        self.0.format("%Y-%m").to_string()
    }

    pub fn display(self) -> String {
        self.0.format("%b %Y").to_string()
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// How an entry's date range ends.
///
/// A current position has no end date at all, so the end month can never
/// leak into display or storage once an entry is marked current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryEnd {
    Present,
    Ended(MonthYear),
}

/// One committed experience, education or project record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: EntryId,
    pub title: String,
    pub organization: String,
    pub start: MonthYear,
    pub end: EntryEnd,
    pub description: String,
}

impl Entry {
    pub fn new(
        title: impl Into<String>,
        organization: impl Into<String>,
        start: MonthYear,
        end: EntryEnd,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            title: title.into(),
            organization: organization.into(),
            start,
            end,
            description: description.into(),
        }
    }

    pub const fn id(&self) -> EntryId {
        self.id
    }

    pub const fn is_current(&self) -> bool {
        matches!(self.end, EntryEnd::Present)
    }

    /// Stored end date: `yyyy-MM`, or empty for a current entry.
    pub fn end_canonical(&self) -> String {
        match self.end {
            EntryEnd::Present => String::new(),
            EntryEnd::Ended(month) => month.canonical(),
        }
    }

    /// `"{start} - Present"` or `"{start} - {end}"`.
    pub fn date_range(&self) -> String {
        match self.end {
            EntryEnd::Present => format!("{} - Present", self.start),
            EntryEnd::Ended(end) => format!("{} - {end}", self.start),
        }
    }

    /// Card header shown in the form view.
    pub fn heading(&self) -> String {
        format!("{} @ {}", self.title, self.organization)
    }
}
