//! Walks a [`SeedPlan`] in order, upserting each node and threading the
//! parent's remote id down to its children.

use super::context::{SeedContext, SeedReport};
use super::plan::SeedPlan;
use super::upsert::{upsert, Upserted};
use crate::api::http::describe_status;
use crate::api::Transport;
use crate::seed::SeedError;

/// Result of executing a plan
#[derive(Debug, Default)]
pub struct PlanRun {
    pub report: SeedReport,
    /// Remote id per plan node; `None` where the node failed or was skipped
    pub ids: Vec<Option<u64>>,
}

/// Upsert every node of `plan`.
///
/// A failed node is logged and counted, and its whole subtree is skipped.
/// Nothing here is fatal to the run.
pub async fn execute_plan<T>(api: &T, ctx: &mut SeedContext, plan: &SeedPlan) -> PlanRun
where
    T: Transport + ?Sized,
{
    let mut run = PlanRun {
        report: SeedReport::default(),
        ids: Vec::with_capacity(plan.len()),
    };

    for (index, spec) in plan.nodes().iter().enumerate() {
        let parent_id = match spec.parent {
            Some(p) => match run.ids[p] {
                Some(id) => Some(id),
                None => {
                    tracing::debug!("Skipping {} '{}': parent missing", spec.kind, spec.name);
                    run.report.skipped += 1;
                    run.ids.push(None);
                    continue;
                }
            },
            None => None,
        };

        match upsert(api, ctx, spec, parent_id).await {
            Ok(outcome) => {
                match outcome {
                    Upserted::Created(id) => {
                        tracing::info!("Created {} '{}' (ID: {})", spec.kind, spec.name, id);
                        run.report.created += 1;
                    }
                    Upserted::Existing(id) | Upserted::Cached(id) => {
                        tracing::debug!(
                            "{} '{}' already present (ID: {})",
                            spec.kind,
                            spec.name,
                            id
                        );
                        run.report.reused += 1;
                    }
                }
                run.ids.push(Some(outcome.id()));
            }
            Err(e) => {
                log_failure(&plan.path_of(index), &e);
                run.report.failed += 1;
                run.report
                    .failures
                    .push(format!("{} '{}'", spec.kind, plan.path_of(index)));
                run.ids.push(None);
            }
        }
    }

    run
}

fn log_failure(path: &str, error: &SeedError) {
    match error {
        SeedError::Rejected { status, body, .. } => {
            let body = crate::api::http::sanitize_for_log(&body.to_string());
            tracing::error!(
                "Failed to create '{}': {} ({}) - {}",
                path,
                status,
                describe_status(*status),
                body
            );
        }
        other => tracing::error!("Failed to create '{}': {:#}", path, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::fake::FakeInventory;
    use crate::seed::kind::ResourceKind;
    use crate::seed::layout::WarehouseLayout;
    use crate::seed::plan::ResourceSpec;
    use serde_json::json;

    #[tokio::test]
    async fn failed_parent_skips_subtree() {
        let api = FakeInventory::new();
        api.reject_with("Zone-A", json!({"detail": "permission denied"}));

        let mut ctx = SeedContext::new();
        let plan = WarehouseLayout::default().plan();
        let run = execute_plan(&api, &mut ctx, &plan).await;

        // Zone-A: 4 columns, 28 shelves, 56 bins behind it
        assert_eq!(run.report.failed, 1);
        assert_eq!(run.report.skipped, 4 + 28 + 56);
        assert_eq!(run.report.failures, vec!["location 'Warehouse/Zone-A'"]);
        assert_eq!(run.report.total(), plan.len());
        assert_eq!(
            api.len(ResourceKind::Location),
            plan.len() - run.report.failed - run.report.skipped
        );
    }

    #[tokio::test]
    async fn children_get_parent_ids() {
        let api = FakeInventory::new();
        let mut plan = SeedPlan::new();
        let root = plan.add_root(ResourceSpec::new(ResourceKind::Category, "GPU", ""));
        plan.add_child(root, ResourceSpec::new(ResourceKind::Part, "RTX 4090", ""));

        let mut ctx = SeedContext::new();
        let run = execute_plan(&api, &mut ctx, &plan).await;
        assert_eq!(run.report.created, 2);

        let parts = api.snapshot(ResourceKind::Part);
        assert_eq!(parts, vec![("RTX 4090".to_string(), run.ids[root])]);
    }

    #[tokio::test]
    async fn rerun_creates_nothing() {
        let api = FakeInventory::new();
        let plan = WarehouseLayout::default().plan();

        let first = execute_plan(&api, &mut SeedContext::new(), &plan).await;
        let before = api.snapshot(ResourceKind::Location);

        let second = execute_plan(&api, &mut SeedContext::new(), &plan).await;
        assert_eq!(second.report.created, 0);
        assert_eq!(second.report.reused, plan.len());
        assert_eq!(second.ids, first.ids);
        assert_eq!(api.snapshot(ResourceKind::Location), before);
    }
}
