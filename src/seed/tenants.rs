//! Tenant provisioning: one group and one location subtree per tenant.
//!
//! Users are only checked, never created; the API does not allow it.

use super::builder::execute_plan;
use super::catalog::TenantSpec;
use super::context::{SeedContext, SeedReport};
use super::kind::ResourceKind;
use super::layout::{column_name, WarehouseLayout};
use super::plan::{ResourceSpec, SeedPlan};
use super::SeedError;
use crate::api::Transport;
use serde_json::Value;

const USER_PATH: &str = "user/";

/// Group, root location and `{zone}-{column}` sub-locations of a tenant
pub fn tenant_plan(tenant: &TenantSpec, layout: &WarehouseLayout) -> SeedPlan {
    let mut plan = SeedPlan::new();
    plan.add_root(ResourceSpec::new(ResourceKind::Group, tenant.group_name(), ""));

    let root = plan.add_root(ResourceSpec::new(
        ResourceKind::Location,
        tenant.root_location_name(),
        tenant.description.as_str(),
    ));
    for zone in &layout.zones {
        for col in 1..=layout.columns_per_zone {
            plan.add_child(
                root,
                ResourceSpec::new(ResourceKind::Location, column_name(&zone.letter, col), ""),
            );
        }
    }
    plan
}

/// Look a user up by exact username
pub async fn find_user<T>(api: &T, username: &str) -> Result<Option<u64>, SeedError>
where
    T: Transport + ?Sized,
{
    let query = vec![("username".to_string(), username.to_string())];
    let response = api.get(USER_PATH, &query).await?;
    if !response.is_success() {
        return Err(SeedError::Rejected {
            kind: "user",
            name: username.to_string(),
            status: response.status,
            body: response.body,
        });
    }

    let users = match &response.body {
        Value::Array(items) => items.as_slice(),
        other => other
            .get("results")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
    };
    Ok(users
        .iter()
        .filter(|u| u.get("username").and_then(Value::as_str) == Some(username))
        .find_map(|u| u.get("pk").and_then(Value::as_u64)))
}

/// Seed every tenant in order
pub async fn seed_tenants<T>(
    api: &T,
    ctx: &mut SeedContext,
    tenants: &[TenantSpec],
    layout: &WarehouseLayout,
) -> SeedReport
where
    T: Transport + ?Sized,
{
    let mut report = SeedReport::default();

    for tenant in tenants {
        tracing::info!("Seeding tenant: {}", tenant.display_name());
        let run = execute_plan(api, ctx, &tenant_plan(tenant, layout)).await;
        report.merge(run.report);

        for user in &tenant.users {
            match find_user(api, &user.username).await {
                Ok(Some(id)) => {
                    tracing::info!("User '{}' already exists (ID: {})", user.username, id)
                }
                Ok(None) => tracing::warn!(
                    "User '{}' missing; create it in the admin panel or with \
                     `python manage.py createsuperuser --username {} --email {}`",
                    user.username,
                    user.username,
                    user.email
                ),
                Err(e) => tracing::warn!("Could not check user '{}': {:#}", user.username, e),
            }
        }
    }

    report
}
