//! Report registry integration tests: CRUD semantics, id discipline and the
//! category listings the sidebar drives.

use reportvault::identity::Role;
use reportvault::registry::{
    Category, CategoryFilter, ReportDraft, ReportPatch, ReportRegistry,
};
use reportvault::VaultError;

fn draft(title: &str, category: Category, roles: &[Role]) -> ReportDraft {
    ReportDraft {
        title: title.into(),
        description: format!("{title} description"),
        category,
        sql_query: "SELECT 1".into(),
        file_url: None,
        access_roles: roles.to_vec(),
    }
}

#[test]
fn create_round_trips_draft_fields() {
    let registry = ReportRegistry::new();
    let created = registry
        .create(draft("Weekly KPIs", Category::Operations, &[Role::Admin, Role::User]))
        .unwrap();

    let read = registry.get(created.id).expect("created report readable");
    assert_eq!(read.title, "Weekly KPIs");
    assert_eq!(read.description, "Weekly KPIs description");
    assert_eq!(read.category, Category::Operations);
    assert_eq!(read.access_roles, vec![Role::Admin, Role::User]);
    assert_eq!(read.created_at, read.updated_at);
}

#[test]
fn update_merges_atomically_and_bumps_updated_at() {
    let registry = ReportRegistry::new();
    let created = registry.create(draft("Old Title", Category::Sales, &[Role::Admin])).unwrap();

    let patch = ReportPatch { title: Some("New Title".into()), ..Default::default() };
    let updated = registry.update(created.id, patch).unwrap();

    assert_eq!(updated.title, "New Title");
    assert_eq!(updated.description, created.description, "untouched fields survive the merge");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(registry.get(created.id).unwrap(), updated);
}

#[test]
fn update_missing_id_is_not_found() {
    let registry = ReportRegistry::new();
    let err = registry
        .update(reportvault::registry::ReportId(99), ReportPatch::default())
        .unwrap_err();
    assert!(matches!(err, VaultError::NotFound { .. }));
}

#[test]
fn empty_access_roles_are_rejected_and_state_is_untouched() {
    let registry = ReportRegistry::new();
    let err = registry.create(draft("No Roles", Category::Hr, &[])).unwrap_err();
    assert!(matches!(err, VaultError::InvalidInput { .. }));
    assert!(registry.list().is_empty());

    let created = registry.create(draft("Has Roles", Category::Hr, &[Role::Admin])).unwrap();
    let patch = ReportPatch { access_roles: Some(vec![]), ..Default::default() };
    let err = registry.update(created.id, patch).unwrap_err();
    assert!(matches!(err, VaultError::InvalidInput { .. }));
    assert_eq!(registry.get(created.id).unwrap(), created, "failed update leaves the record intact");
}

#[test]
fn delete_is_idempotent_and_ids_are_never_reused() {
    let registry = ReportRegistry::new();
    let first = registry.create(draft("First", Category::Financial, &[Role::Admin])).unwrap();
    registry.delete(first.id);
    registry.delete(first.id); // retry-safe no-op
    assert!(registry.get(first.id).is_none());

    let second = registry.create(draft("Second", Category::Financial, &[Role::Admin])).unwrap();
    assert!(second.id > first.id, "ids grow monotonically even across deletes");
}

#[test]
fn seeded_category_listing_preserves_insertion_order() {
    let registry = ReportRegistry::seed_demo();
    assert_eq!(registry.list().len(), 6);

    let financial = registry.list_by_category(CategoryFilter::Only(Category::Financial));
    let ids: Vec<u64> = financial.iter().map(|r| r.id.0).collect();
    assert_eq!(ids, vec![1, 6]);
    assert!(financial.iter().all(|r| r.category == Category::Financial));

    // "all" is the identity filter.
    assert_eq!(registry.list_by_category(CategoryFilter::All), registry.list());
}
