//! End-to-end behavior of the document engine through the public API.

use resumark::document::{MarkdownDocument, SyncController, SyncOutcome, SyncPolicy, SyncState};
use resumark::entries::{EntryField, EntryForm};
use resumark::mode::{ActiveView, RenderMode};
use resumark::prelude::*;
use resumark::services::{
    DocumentRenderer, FilePersistence, HtmlRenderer, PersistenceService, RenderError,
    RenderOptions,
};

fn experience(title: &str, current: bool) -> EntryForm {
    EntryForm {
        title: title.to_string(),
        organization: "Acme".to_string(),
        start_date: "2023-01".to_string(),
        end_date: "2024-05".to_string(),
        current,
        description: "Shipped the thing".to_string(),
    }
}

#[test]
fn test_full_resume_section_order() {
    let mut draft = ProfileDraft::default();
    draft.contact.set(ContactField::Email, "a@b.com".to_string());
    draft.summary = "Built things".to_string();
    draft.skills = "Rust, SQL".to_string();
    draft
        .entries_mut(EntryKind::Project)
        .add_entry(&experience("CLI", false))
        .unwrap();
    draft
        .entries_mut(EntryKind::Experience)
        .add_entry(&experience("Engineer", true))
        .unwrap();

    let md = compose(&draft, "Jane Doe");
    let order = [
        "## <div align=\"center\">Jane Doe</div>",
        "## Professional Summary",
        "## Skills",
        "## Work Experience",
        "## Projects",
    ];
    let positions: Vec<usize> = order.iter().map(|h| md.find(h).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{md}");
    assert!(!md.contains("## Education"));
    assert!(md.contains("### Engineer @ Acme\nJan 2023 - Present"));
    assert!(md.contains("### CLI @ Acme\nJan 2023 - May 2024"));
    assert!(!md.contains("\n\n\n"), "sections are separated by one blank line");
}

#[test]
fn test_hand_edit_then_form_change_overwrites() {
    let mut draft = ProfileDraft::default();
    let mut sync = SyncController::new(None, SyncPolicy::Overwrite);
    draft.summary = "Original".to_string();
    assert_eq!(
        sync.on_draft_changed(&draft, "", ActiveView::Form),
        SyncOutcome::Replaced
    );

    let edited = format!("{}\n\nExtra line", sync.content());
    assert!(sync.on_user_edit(edited, RenderMode::Raw));
    assert_eq!(sync.state(), SyncState::Diverged);

    draft.skills = "Rust".to_string();
    assert_eq!(
        sync.on_draft_changed(&draft, "", ActiveView::Form),
        SyncOutcome::Replaced
    );
    assert_eq!(
        sync.document(),
        &MarkdownDocument::Derived(
            "## Professional Summary\n\nOriginal\n\n## Skills\n\nRust".to_string()
        )
    );
}

#[test]
fn test_confirm_policy_holds_then_applies() {
    let mut draft = ProfileDraft::default();
    let mut sync = SyncController::new(None, SyncPolicy::Confirm);
    draft.summary = "Original".to_string();
    sync.on_draft_changed(&draft, "", ActiveView::Form);
    sync.on_user_edit("# Mine".to_string(), RenderMode::Raw);

    draft.summary = "Changed".to_string();
    assert_eq!(
        sync.on_draft_changed(&draft, "", ActiveView::Form),
        SyncOutcome::Held
    );
    assert_eq!(sync.content(), "# Mine");

    assert!(sync.confirm_overwrite(&draft, ""));
    assert_eq!(sync.content(), "## Professional Summary\n\nChanged");
    assert!(!sync.confirm_overwrite(&draft, ""), "nothing left to confirm");
}

#[test]
fn test_edits_outside_raw_mode_are_ignored() {
    let mut sync = SyncController::new(None, SyncPolicy::Overwrite);
    assert!(!sync.on_user_edit("typed".to_string(), RenderMode::Rendered));
    assert_eq!(sync.content(), "");
    assert_eq!(sync.state(), SyncState::Derived);
}

#[test]
fn test_draft_changes_in_markdown_view_are_skipped() {
    let mut draft = ProfileDraft::default();
    let mut sync = SyncController::new(None, SyncPolicy::Overwrite);
    draft.skills = "Rust".to_string();
    assert_eq!(
        sync.on_draft_changed(&draft, "", ActiveView::Markdown),
        SyncOutcome::Skipped
    );
    assert_eq!(sync.content(), "");
}

#[test]
fn test_seed_survives_until_draft_has_content() {
    let seed = "# Saved resume".to_string();
    let mut sync = SyncController::new(Some(seed.clone()), SyncPolicy::Overwrite);
    let mut draft = ProfileDraft::default();
    assert_eq!(
        sync.on_draft_changed(&draft, "Jane", ActiveView::Form),
        SyncOutcome::Unchanged
    );
    assert_eq!(sync.content(), seed);

    draft.skills = "Rust".to_string();
    sync.on_draft_changed(&draft, "Jane", ActiveView::Form);
    assert_eq!(sync.content(), "## Skills\n\nRust");

    draft.skills.clear();
    sync.on_draft_changed(&draft, "Jane", ActiveView::Form);
    assert_eq!(sync.content(), seed, "an emptied draft falls back to the seed");
}

#[test]
fn test_entry_form_current_discards_end_date() {
    let mut list = EntryList::new(EntryKind::Experience);
    list.open_form();
    let form = list.form_mut().unwrap();
    form.set_field(EntryField::Title, "Engineer".to_string());
    form.set_field(EntryField::Organization, "Acme".to_string());
    form.set_field(EntryField::StartDate, "2023-01".to_string());
    form.set_field(EntryField::EndDate, "2024-05".to_string());
    form.set_current(true);
    form.set_field(EntryField::EndDate, "2025-01".to_string());
    assert_eq!(form.end_date, "");

    list.submit_form().unwrap().unwrap();
    let entry = &list.entries()[0];
    assert!(entry.is_current());
    assert_eq!(entry.end_canonical(), "");
    assert_eq!(entry.date_range(), "Jan 2023 - Present");
}

#[test]
fn test_save_and_export_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut draft = ProfileDraft::default();
    draft.contact.set(ContactField::Email, "a@b.com".to_string());
    let document = MarkdownDocument::Derived(compose(&draft, "Jane Doe"));

    let store = FilePersistence::new(dir.path().join("resume.md"));
    let record = store.save(&document).unwrap();
    assert_eq!(record.bytes, document.content().len());
    assert_eq!(
        std::fs::read_to_string(&record.path).unwrap(),
        document.content()
    );

    let renderer = HtmlRenderer::new(dir.path().join("out"));
    let path = renderer
        .render_to_file(document.content(), &RenderOptions::default())
        .unwrap();
    let html = std::fs::read_to_string(path).unwrap();
    assert!(html.contains("a@b.com"));
    assert!(html.contains("@page"));

    assert_eq!(
        renderer.render_to_file("  \n", &RenderOptions::default()),
        Err(RenderError::EmptyDocument)
    );
}
