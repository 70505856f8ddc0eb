//! Benchmarks for markdown composition and preview layout.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use resumark::document::compose;
use resumark::entries::EntryForm;
use resumark::preview::Preview;
use resumark::profile::{ContactField, EntryKind, ProfileDraft};

fn full_draft() -> ProfileDraft {
    let mut draft = ProfileDraft::default();
    draft.contact.set(ContactField::Email, "jane@example.com".to_string());
    draft.contact.set(ContactField::Mobile, "+1 555 0100".to_string());
    draft
        .contact
        .set(ContactField::Linkedin, "https://linkedin.com/in/jane".to_string());
    draft.summary = "Engineer with a decade of systems work. ".repeat(4);
    draft.skills = "Rust, Go, SQL, Kubernetes, Terraform".to_string();
    for kind in EntryKind::ALL {
        for i in 0..5 {
            let form = EntryForm {
                title: format!("Role {i}"),
                organization: "Acme Corp".to_string(),
                start_date: format!("201{i}-01"),
                end_date: format!("201{}-06", i + 1),
                current: i == 4,
                description: "- Led a team\n- Cut latency in half\n- Mentored juniors".to_string(),
            };
            draft.entries_mut(kind).add_entry(&form).unwrap();
        }
    }
    draft
}

fn bench_compose_empty(c: &mut Criterion) {
    let draft = ProfileDraft::default();
    c.bench_function("compose_empty", |b| {
        b.iter(|| compose(black_box(&draft), black_box("Jane Doe")))
    });
}

fn bench_compose_full(c: &mut Criterion) {
    let draft = full_draft();
    c.bench_function("compose_full", |b| {
        b.iter(|| compose(black_box(&draft), black_box("Jane Doe")))
    });
}

fn bench_preview_full(c: &mut Criterion) {
    let md = compose(&full_draft(), "Jane Doe");
    c.bench_function("preview_full", |b| {
        b.iter(|| Preview::render(black_box(&md), black_box(78)))
    });
}

criterion_group!(
    benches,
    bench_compose_empty,
    bench_compose_full,
    bench_preview_full
);
criterion_main!(benches);
