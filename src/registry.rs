//! In-memory report registry: categorized report records with role-gated
//! access sets, monotonic never-reused ids and insertion-order listings.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{VaultError, VaultResult};
use crate::identity::Role;

/// Report category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Financial,
    Sales,
    Operations,
    Hr,
    Marketing,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Financial => "financial",
            Category::Sales => "sales",
            Category::Operations => "operations",
            Category::Hr => "hr",
            Category::Marketing => "marketing",
        }
    }
}

/// Category predicate for listings; `All` is the identity filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    pub(crate) fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

/// Registry-assigned report id. Ids grow monotonically and are never reused,
/// even after a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub u64);

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A distributable report definition. `access_roles` is never empty; every
/// mutation bumps `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub sql_query: String,
    pub file_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub access_roles: Vec<Role>,
}

/// Fields for [`ReportRegistry::create`]; the registry assigns id and
/// timestamps.
#[derive(Debug, Clone)]
pub struct ReportDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub sql_query: String,
    pub file_url: Option<String>,
    pub access_roles: Vec<Role>,
}

/// Partial update for [`ReportRegistry::update`]. `None` fields keep the
/// current value; `file_url: Some(..)` replaces the link.
#[derive(Debug, Clone, Default)]
pub struct ReportPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub sql_query: Option<String>,
    pub file_url: Option<String>,
    pub access_roles: Option<Vec<Role>>,
}

struct RegistryInner {
    reports: Vec<Report>,
    next_id: u64,
}

/// CRUD store of reports. A single lock serializes mutation so id
/// uniqueness holds even when the registry is shared across threads;
/// `update` swaps a fully merged record so readers never observe a partial
/// merge.
pub struct ReportRegistry {
    inner: RwLock<RegistryInner>,
}

impl Default for ReportRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRegistry {
    pub fn new() -> Self {
        Self { inner: RwLock::new(RegistryInner { reports: Vec::new(), next_id: 1 }) }
    }

    /// The six demo reports; two are admin-only.
    pub fn seed_demo() -> Self {
        let both = vec![Role::Admin, Role::User];
        let admin_only = vec![Role::Admin];
        let seeds = [
            Report {
                id: ReportId(1),
                title: "Monthly Revenue Report".into(),
                description: "Shows revenue data broken down by product category and region.".into(),
                category: Category::Financial,
                sql_query: "SELECT * FROM revenue WHERE month = :month AND year = :year".into(),
                file_url: Some("/reports/monthly_revenue.xlsx".into()),
                created_at: seed_ts("2024-01-15T12:00:00Z"),
                updated_at: seed_ts("2024-01-15T12:00:00Z"),
                access_roles: both.clone(),
            },
            Report {
                id: ReportId(2),
                title: "Customer Acquisition Metrics".into(),
                description: "Analysis of customer acquisition channels and costs.".into(),
                category: Category::Marketing,
                sql_query: "SELECT channel, COUNT(customer_id) AS new_customers FROM acquisitions GROUP BY channel".into(),
                file_url: Some("/reports/acquisition_metrics.pdf".into()),
                created_at: seed_ts("2024-02-10T14:30:00Z"),
                updated_at: seed_ts("2024-02-20T09:15:00Z"),
                access_roles: both.clone(),
            },
            Report {
                id: ReportId(3),
                title: "Employee Performance Review".into(),
                description: "Confidential performance metrics for all employees.".into(),
                category: Category::Hr,
                sql_query: "SELECT e.*, p.score FROM employees e JOIN performance p ON e.id = p.employee_id".into(),
                file_url: Some("/reports/employee_performance.xlsx".into()),
                created_at: seed_ts("2024-03-01T10:00:00Z"),
                updated_at: seed_ts("2024-03-01T10:00:00Z"),
                access_roles: admin_only.clone(),
            },
            Report {
                id: ReportId(4),
                title: "Inventory Status Report".into(),
                description: "Current inventory levels across all warehouses.".into(),
                category: Category::Operations,
                sql_query: "SELECT product_id, SUM(quantity) FROM inventory GROUP BY product_id".into(),
                file_url: Some("/reports/inventory_status.xlsx".into()),
                created_at: seed_ts("2024-03-05T11:45:00Z"),
                updated_at: seed_ts("2024-04-01T16:20:00Z"),
                access_roles: both.clone(),
            },
            Report {
                id: ReportId(5),
                title: "Sales Pipeline Analysis".into(),
                description: "Analysis of current sales opportunities by stage and expected revenue.".into(),
                category: Category::Sales,
                sql_query: "SELECT stage, COUNT(*) as count, SUM(expected_revenue) FROM opportunities GROUP BY stage".into(),
                file_url: Some("/reports/sales_pipeline.pdf".into()),
                created_at: seed_ts("2024-03-10T09:30:00Z"),
                updated_at: seed_ts("2024-03-15T14:00:00Z"),
                access_roles: both,
            },
            Report {
                id: ReportId(6),
                title: "Executive Finance Summary".into(),
                description: "Confidential summary of all financial metrics for executive review.".into(),
                category: Category::Financial,
                sql_query: "SELECT * FROM financial_summary WHERE quarter = :quarter AND year = :year".into(),
                file_url: Some("/reports/executive_summary.pdf".into()),
                created_at: seed_ts("2024-03-20T08:00:00Z"),
                updated_at: seed_ts("2024-03-20T08:00:00Z"),
                access_roles: admin_only,
            },
        ];
        Self { inner: RwLock::new(RegistryInner { reports: seeds.to_vec(), next_id: 7 }) }
    }

    /// Create a report. `created_at == updated_at == now`. Rejects an empty
    /// access-role set.
    pub fn create(&self, draft: ReportDraft) -> VaultResult<Report> {
        if draft.access_roles.is_empty() {
            return Err(VaultError::invalid_input("access_roles must not be empty"));
        }
        let mut inner = self.inner.write();
        let now = Utc::now();
        let report = Report {
            id: ReportId(inner.next_id),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            sql_query: draft.sql_query,
            file_url: draft.file_url,
            created_at: now,
            updated_at: now,
            access_roles: draft.access_roles,
        };
        inner.next_id += 1;
        inner.reports.push(report.clone());
        debug!(target: "reportvault::registry", "created report id={} title='{}'", report.id, report.title);
        Ok(report)
    }

    /// Merge a patch into an existing report, all-or-nothing, bumping
    /// `updated_at`. `NotFound` when the id is absent; a patch that would
    /// empty `access_roles` is rejected and the record is left unchanged.
    pub fn update(&self, id: ReportId, patch: ReportPatch) -> VaultResult<Report> {
        if patch.access_roles.as_ref().is_some_and(Vec::is_empty) {
            return Err(VaultError::invalid_input("access_roles must not be empty"));
        }
        let mut inner = self.inner.write();
        let slot = inner
            .reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| VaultError::not_found(format!("report {id} does not exist")))?;
        let mut merged = slot.clone();
        if let Some(title) = patch.title {
            merged.title = title;
        }
        if let Some(description) = patch.description {
            merged.description = description;
        }
        if let Some(category) = patch.category {
            merged.category = category;
        }
        if let Some(sql_query) = patch.sql_query {
            merged.sql_query = sql_query;
        }
        if let Some(file_url) = patch.file_url {
            merged.file_url = Some(file_url);
        }
        if let Some(access_roles) = patch.access_roles {
            merged.access_roles = access_roles;
        }
        // Clamp so updated_at never moves backwards if the clock does.
        merged.updated_at = Utc::now().max(slot.updated_at);
        *slot = merged.clone();
        debug!(target: "reportvault::registry", "updated report id={}", id);
        Ok(merged)
    }

    /// Remove a report. Deleting a missing id is an idempotent no-op, not an
    /// error, so callers can retry safely.
    pub fn delete(&self, id: ReportId) {
        let mut inner = self.inner.write();
        let before = inner.reports.len();
        inner.reports.retain(|r| r.id != id);
        if inner.reports.len() < before {
            debug!(target: "reportvault::registry", "deleted report id={}", id);
        }
    }

    pub fn get(&self, id: ReportId) -> Option<Report> {
        self.inner.read().reports.iter().find(|r| r.id == id).cloned()
    }

    /// All reports in insertion order.
    pub fn list(&self) -> Vec<Report> {
        self.inner.read().reports.clone()
    }

    /// Reports matching the category filter, insertion order preserved.
    pub fn list_by_category(&self, filter: CategoryFilter) -> Vec<Report> {
        self.inner
            .read()
            .reports
            .iter()
            .filter(|r| filter.matches(r.category))
            .cloned()
            .collect()
    }
}

fn seed_ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
