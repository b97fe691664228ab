//! Best-effort persistence of parsed site plans.
//!
//! Plans are append-only rows with no natural key: repeated submissions of
//! the same idea create independent records. A failed append is downgraded
//! to an explicit [`PersistOutcome::Failed`] so callers can log and move on;
//! generation is the primary deliverable, durability is best-effort.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::kernel::BasePlanStore;

/// A plan record ready to append.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSitePlan {
    pub idea: String,
    pub full: String,
    pub spec: Option<String>,
    pub site_map: Option<String>,
    pub components: Option<String>,
    pub copy: Option<String>,
    pub code_plan: Option<String>,
}

impl NewSitePlan {
    /// Build a record from the parsed section map. Labels outside the
    /// canonical five stay in `full` but get no dedicated column.
    pub fn from_sections(idea: &str, full: &str, sections: &BTreeMap<String, String>) -> Self {
        Self {
            idea: idea.to_string(),
            full: full.to_string(),
            spec: sections.get("SPEC").cloned(),
            site_map: sections.get("SITE_MAP").cloned(),
            components: sections.get("COMPONENTS").cloned(),
            copy: sections.get("COPY").cloned(),
            code_plan: sections.get("CODE_PLAN").cloned(),
        }
    }
}

/// A persisted plan row.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct SitePlan {
    pub id: Uuid,
    pub idea: String,
    pub full: String,
    pub spec: Option<String>,
    pub site_map: Option<String>,
    pub components: Option<String>,
    pub copy: Option<String>,
    pub code_plan: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Postgres-backed plan store.
#[derive(Clone)]
pub struct PgPlanStore {
    pool: PgPool,
}

impl PgPlanStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BasePlanStore for PgPlanStore {
    async fn append(&self, plan: NewSitePlan) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO site_plans (idea, "full", spec, site_map, components, "copy", code_plan)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&plan.idea)
        .bind(&plan.full)
        .bind(&plan.spec)
        .bind(&plan.site_map)
        .bind(&plan.components)
        .bind(&plan.copy)
        .bind(&plan.code_plan)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<SitePlan>> {
        sqlx::query_as::<_, SitePlan>(
            "SELECT * FROM site_plans ORDER BY created_at DESC, id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }
}

/// Outcome of one persistence attempt.
///
/// At-most-one attempt per job; no retry at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Stored,
    Failed { reason: String },
}

/// Attempt to append a plan, converting any error into an explicit outcome
/// for the caller to inspect.
pub async fn persist_plan(store: &dyn BasePlanStore, plan: NewSitePlan) -> PersistOutcome {
    match store.append(plan).await {
        Ok(()) => PersistOutcome::Stored,
        Err(err) => PersistOutcome::Failed {
            reason: format!("{err:#}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockPlanStore;

    fn sections(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn from_sections_maps_canonical_labels() {
        let map = sections(&[
            ("SPEC", "a spec"),
            ("SITE_MAP", "Home"),
            ("EXTRA", "not a column"),
        ]);
        let plan = NewSitePlan::from_sections("an idea", "full text", &map);
        assert_eq!(plan.idea, "an idea");
        assert_eq!(plan.full, "full text");
        assert_eq!(plan.spec.as_deref(), Some("a spec"));
        assert_eq!(plan.site_map.as_deref(), Some("Home"));
        assert!(plan.components.is_none());
        assert!(plan.copy.is_none());
        assert!(plan.code_plan.is_none());
    }

    #[tokio::test]
    async fn persist_plan_reports_stored() {
        let store = MockPlanStore::new();
        let plan = NewSitePlan::from_sections("idea", "full", &BTreeMap::new());
        assert_eq!(persist_plan(&store, plan).await, PersistOutcome::Stored);
        assert_eq!(store.appended().len(), 1);
    }

    #[tokio::test]
    async fn persist_plan_reports_failure_with_reason() {
        let store = MockPlanStore::failing();
        let plan = NewSitePlan::from_sections("idea", "full", &BTreeMap::new());
        match persist_plan(&store, plan).await {
            PersistOutcome::Failed { reason } => assert!(reason.contains("unavailable")),
            PersistOutcome::Stored => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn recent_returns_newest_first() {
        let store = MockPlanStore::new();
        for idea in ["first", "second"] {
            let plan = NewSitePlan::from_sections(idea, "full", &BTreeMap::new());
            store.append(plan).await.unwrap();
        }
        let recent = store.recent(10).await.unwrap();
        assert_eq!(recent[0].idea, "second");
        assert_eq!(recent[1].idea, "first");
    }
}
