//! Entry points for the categories, locations and parts seeders.

use super::builder::execute_plan;
use super::catalog::{category_plan, parts_plan};
use super::context::{SeedContext, SeedReport};
use super::kind::ResourceKind;
use super::layout::WarehouseLayout;
use super::upsert::prime_cache;
use crate::api::Transport;

pub async fn seed_categories<T>(api: &T, ctx: &mut SeedContext) -> SeedReport
where
    T: Transport + ?Sized,
{
    tracing::info!("Seeding part categories");
    execute_plan(api, ctx, &category_plan()).await.report
}

pub async fn seed_locations<T>(
    api: &T,
    ctx: &mut SeedContext,
    layout: &WarehouseLayout,
) -> SeedReport
where
    T: Transport + ?Sized,
{
    let summary = layout.summary();
    tracing::info!(
        "Seeding warehouse '{}': {} zones, {} columns, {} shelves, {} bins",
        layout.root_name,
        summary.zones,
        summary.columns,
        summary.shelves,
        summary.total_bins()
    );
    execute_plan(api, ctx, &layout.plan()).await.report
}

/// Categories are primed from the server first so existing ones cost no
/// create call.
pub async fn seed_parts<T>(api: &T, ctx: &mut SeedContext) -> SeedReport
where
    T: Transport + ?Sized,
{
    tracing::info!("Seeding example parts");
    if let Err(e) = prime_cache(api, ctx, ResourceKind::Category).await {
        tracing::warn!("Failed to load categories: {:#}", e);
    }
    execute_plan(api, ctx, &parts_plan()).await.report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::catalog::default_tenants;
    use crate::seed::fake::FakeInventory;
    use crate::seed::tenants::seed_tenants;

    async fn seed_everything(api: &FakeInventory) -> SeedReport {
        let layout = WarehouseLayout::default();
        let mut ctx = SeedContext::new();
        let mut report = seed_categories(api, &mut ctx).await;
        report.merge(seed_locations(api, &mut ctx, &layout).await);
        report.merge(seed_parts(api, &mut ctx).await);
        report.merge(seed_tenants(api, &mut ctx, &default_tenants(), &layout).await);
        report
    }

    fn all_resources(api: &FakeInventory) -> Vec<(ResourceKind, String, Option<u64>)> {
        ResourceKind::ALL
            .into_iter()
            .flat_map(|kind| {
                api.snapshot(kind)
                    .into_iter()
                    .map(move |(name, parent)| (kind, name, parent))
            })
            .collect()
    }

    #[tokio::test]
    async fn full_run_is_idempotent() {
        let api = FakeInventory::with_page_size(50);

        let first = seed_everything(&api).await;
        assert!(first.is_clean());
        let after_first = all_resources(&api);

        let second = seed_everything(&api).await;
        assert!(second.is_clean());
        assert_eq!(second.created, 0);
        assert_eq!(all_resources(&api), after_first);
    }

    #[tokio::test]
    async fn parts_reuse_seeded_categories() {
        let api = FakeInventory::new();
        let mut ctx = SeedContext::new();
        seed_categories(&api, &mut ctx).await;

        let posts_before = api.post_count();
        let report = seed_parts(&api, &mut SeedContext::new()).await;

        assert_eq!(report.created, 31);
        assert_eq!(report.reused, 6);
        assert_eq!(api.post_count() - posts_before, 31);
        assert_eq!(api.len(ResourceKind::Category), 6);
    }

    #[tokio::test]
    async fn location_count_follows_layout() {
        let api = FakeInventory::new();
        let layout = WarehouseLayout::default();
        let report = seed_locations(&api, &mut SeedContext::new(), &layout).await;
        assert_eq!(report.created, layout.summary().total_locations());
    }
}
