//! Access filtering: the ordered pipeline deciding which reports a caller
//! may see. Pure functions over snapshots; no service state.
//!
//! The order is part of the contract: [`visible_to`] is the security
//! boundary and runs first, unconditionally, so no combination of category
//! or search filtering can surface a report the caller's role is not
//! entitled to.

use crate::identity::{Identity, Role};
use crate::registry::{CategoryFilter, Report};

/// Keep the reports whose access-role set contains the caller's role.
///
/// An absent identity defaults to [`Role::User`], mirroring the original
/// system's behavior. Whether unauthenticated callers should receive any
/// role-gated results at all is an open question; callers wanting the strict
/// reading should check `SessionStore::is_authenticated` before filtering.
pub fn visible_to(identity: Option<&Identity>, reports: &[Report]) -> Vec<Report> {
    let role = identity.map(|i| i.role).unwrap_or(Role::User);
    reports
        .iter()
        .filter(|r| r.access_roles.contains(&role))
        .cloned()
        .collect()
}

/// Equality filter on category; `All` passes everything through.
pub fn by_category(reports: &[Report], filter: CategoryFilter) -> Vec<Report> {
    reports
        .iter()
        .filter(|r| filter.matches(r.category))
        .cloned()
        .collect()
}

/// Case-insensitive substring match over title and description; an empty
/// query passes everything through.
pub fn by_search(reports: &[Report], query: &str) -> Vec<Report> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return reports.to_vec();
    }
    reports
        .iter()
        .filter(|r| {
            r.title.to_lowercase().contains(&needle)
                || r.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// The composed pipeline with the role check hard-wired first.
pub fn visible_reports(
    identity: Option<&Identity>,
    reports: &[Report],
    category: CategoryFilter,
    query: &str,
) -> Vec<Report> {
    let pass = visible_to(identity, reports);
    let pass = by_category(&pass, category);
    by_search(&pass, query)
}
