//! Structured profile data to canonical markdown.

use crate::profile::{ContactField, ContactInfo, Entry, EntryKind, ProfileDraft};

/// Compose the full resume markdown.
///
/// Sections appear in a fixed order and are separated by one blank line.
/// Empty sections are left out entirely, so an empty draft composes to `""`.
pub fn compose(draft: &ProfileDraft, display_name: &str) -> String {
    let mut sections = Vec::with_capacity(6);

    if let Some(contact) = contact_markdown(&draft.contact, display_name) {
        sections.push(contact);
    }
    if let Some(summary) = text_section("Professional Summary", &draft.summary) {
        sections.push(summary);
    }
    if let Some(skills) = text_section("Skills", &draft.skills) {
        sections.push(skills);
    }
    for kind in EntryKind::ALL {
        if let Some(entries) = entries_section(kind, draft.entries(kind).entries()) {
            sections.push(entries);
        }
    }

    sections.join("\n\n")
}

/// Centered name heading plus the contact channel line.
///
/// `None` when no channel has a value. A blank display name drops the
/// heading but keeps the channels.
pub fn contact_markdown(contact: &ContactInfo, display_name: &str) -> Option<String> {
    let parts: Vec<String> = contact
        .present()
        .map(|(field, value)| match field {
            ContactField::Email => format!("📧 {value}"),
            ContactField::Mobile => format!("📱 {value}"),
            ContactField::Linkedin => format!("💼 [LinkedIn]({value})"),
            ContactField::Twitter => format!("🐦 [Twitter]({value})"),
        })
        .collect();
    if parts.is_empty() {
        return None;
    }

    let block = format!("<div align=\"center\">\n\n{}\n\n</div>", parts.join(" | "));
    let name = display_name.trim();
    if name.is_empty() {
        Some(block)
    } else {
        Some(format!("## <div align=\"center\">{name}</div>\n\n{block}"))
    }
}

/// One entry as a `###` sub-block.
pub fn entry_markdown(entry: &Entry) -> String {
    let mut out = format!(
        "### {} @ {}\n{}",
        entry.title,
        entry.organization,
        entry.date_range()
    );
    if let Some(description) = body_text(&entry.description) {
        out.push_str("\n\n");
        out.push_str(description);
    }
    out
}

fn text_section(title: &str, body: &str) -> Option<String> {
    body_text(body).map(|body| format!("## {title}\n\n{body}"))
}

/// Free text as written, minus trailing whitespace. Blank text is absent.
///
/// Leading whitespace is kept: an indented line is a code block in markdown.
fn body_text(text: &str) -> Option<&str> {
    let text = text.trim_end();
    (!text.trim_start().is_empty()).then_some(text)
}

fn entries_section(kind: EntryKind, entries: &[Entry]) -> Option<String> {
    if entries.is_empty() {
        return None;
    }
    let body: Vec<String> = entries.iter().map(entry_markdown).collect();
    Some(format!("## {}\n\n{}", kind.section_title(), body.join("\n\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::EntryForm;
    use proptest::prelude::*;

    fn add(draft: &mut ProfileDraft, kind: EntryKind, title: &str, current: bool) {
        let form = EntryForm {
            title: title.to_string(),
            organization: "Acme".to_string(),
            start_date: "2023-01".to_string(),
            end_date: "2024-05".to_string(),
            current,
            description: "Did work".to_string(),
        };
        draft.entries_mut(kind).add_entry(&form).unwrap();
    }

    #[test]
    fn test_empty_draft_composes_to_empty_string() {
        assert_eq!(compose(&ProfileDraft::default(), "Jane Doe"), "");
    }

    #[test]
    fn test_whitespace_only_fields_are_empty() {
        let draft = ProfileDraft {
            summary: "  \n ".to_string(),
            skills: "\t".to_string(),
            ..ProfileDraft::default()
        };
        assert_eq!(compose(&draft, "Jane Doe"), "");
    }

    #[test]
    fn test_leading_indentation_is_kept() {
        let draft = ProfileDraft {
            summary: "    cargo install resumark\n".to_string(),
            ..ProfileDraft::default()
        };
        assert_eq!(
            compose(&draft, ""),
            "## Professional Summary\n\n    cargo install resumark"
        );
    }

    #[test]
    fn test_email_and_summary_scenario() {
        let mut draft = ProfileDraft::default();
        draft.contact.email = Some("a@b.com".to_string());
        draft.summary = "Built things".to_string();

        let md = compose(&draft, "Jane Doe");
        assert_eq!(
            md,
            "## <div align=\"center\">Jane Doe</div>\n\n\
             <div align=\"center\">\n\n📧 a@b.com\n\n</div>\n\n\
             ## Professional Summary\n\nBuilt things"
        );
        for absent in ["## Skills", "## Work Experience", "## Education", "## Projects"] {
            assert!(!md.contains(absent), "unexpected {absent}");
        }
    }

    #[test]
    fn test_contact_channels_in_fixed_order() {
        let contact = ContactInfo {
            email: Some("a@b.com".to_string()),
            mobile: Some("555".to_string()),
            linkedin: Some("https://linkedin.com/in/a".to_string()),
            twitter: Some("https://x.com/a".to_string()),
        };
        let block = contact_markdown(&contact, "").unwrap();
        assert!(block.contains(
            "📧 a@b.com | 📱 555 | 💼 [LinkedIn](https://linkedin.com/in/a) | 🐦 [Twitter](https://x.com/a)"
        ));
        assert!(!block.contains("##"), "blank name drops the heading");
    }

    #[test]
    fn test_no_contact_means_no_header_even_with_name() {
        assert_eq!(contact_markdown(&ContactInfo::default(), "Jane"), None);
    }

    #[test]
    fn test_entry_sections_follow_summary_and_skills() {
        let mut draft = ProfileDraft::default();
        draft.skills = "Rust".to_string();
        add(&mut draft, EntryKind::Project, "Tool", false);
        add(&mut draft, EntryKind::Experience, "Engineer", true);
        add(&mut draft, EntryKind::Education, "BSc", false);

        let md = compose(&draft, "");
        let order: Vec<usize> = ["## Skills", "## Work Experience", "## Education", "## Projects"]
            .iter()
            .map(|heading| md.find(heading).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        assert!(md.contains("### Engineer @ Acme\nJan 2023 - Present\n\nDid work"));
        assert!(md.contains("### BSc @ Acme\nJan 2023 - May 2024"));
    }

    #[test]
    fn test_entry_without_description_has_no_trailing_blank() {
        let mut draft = ProfileDraft::default();
        let form = EntryForm {
            title: "Engineer".to_string(),
            organization: "Acme".to_string(),
            start_date: "2023-01".to_string(),
            current: true,
            ..EntryForm::default()
        };
        draft.experience.add_entry(&form).unwrap();
        assert_eq!(
            entry_markdown(&draft.experience.entries()[0]),
            "### Engineer @ Acme\nJan 2023 - Present"
        );
    }

    #[test]
    fn test_compose_is_repeatable() {
        let mut draft = ProfileDraft::default();
        draft.contact.mobile = Some("555".to_string());
        add(&mut draft, EntryKind::Experience, "Engineer", false);
        assert_eq!(compose(&draft, "J"), compose(&draft, "J"));
    }

    proptest! {
        #[test]
        fn prop_compose_is_pure(
            email in proptest::option::of("[a-z]{0,8}@[a-z]{0,5}"),
            summary in ".{0,40}",
            skills in ".{0,40}",
            name in "[A-Za-z ]{0,12}",
        ) {
            let mut draft = ProfileDraft::default();
            draft.contact.email = email;
            draft.summary = summary;
            draft.skills = skills;
            let first = compose(&draft, &name);
            let snapshot = draft.clone();
            prop_assert_eq!(&first, &compose(&draft, &name));
            prop_assert_eq!(snapshot, draft);
        }

        #[test]
        fn prop_no_stray_headings(summary in "\\s{0,6}", skills in "\\s{0,6}") {
            let draft = ProfileDraft {
                summary,
                skills,
                ..ProfileDraft::default()
            };
            prop_assert_eq!(compose(&draft, "Name"), "");
        }
    }
}
