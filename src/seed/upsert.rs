//! Idempotent create-or-find against the remote API.

use super::classify::{classify_rejection, Rejection};
use super::context::{CacheKey, SeedContext};
use super::error::SeedError;
use super::kind::ResourceKind;
use super::plan::ResourceSpec;
use crate::api::Transport;
use serde_json::Value;

/// Page size used when listing a kind to prime the cache
const PRIME_PAGE_LIMIT: usize = 100;

/// How a resource id was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    /// Server created it just now
    Created(u64),
    /// Server already had it; found by lookup after a conflict
    Existing(u64),
    /// Known from earlier in this run
    Cached(u64),
}

impl Upserted {
    pub fn id(self) -> u64 {
        match self {
            Upserted::Created(id) | Upserted::Existing(id) | Upserted::Cached(id) => id,
        }
    }

    pub fn was_created(self) -> bool {
        matches!(self, Upserted::Created(_))
    }
}

/// Make sure `spec` exists under `parent_id`, creating it if needed.
pub async fn upsert<T>(
    api: &T,
    ctx: &mut SeedContext,
    spec: &ResourceSpec,
    parent_id: Option<u64>,
) -> Result<Upserted, SeedError>
where
    T: Transport + ?Sized,
{
    let key = CacheKey::new(spec.kind, scope_of(spec.kind, parent_id), &spec.name);
    if let Some(id) = ctx.cache.get(&key) {
        return Ok(Upserted::Cached(id));
    }

    let response = api.post(spec.kind.endpoint(), &spec.payload(parent_id)).await?;

    match response.status {
        200 | 201 => {
            let id = response.pk().ok_or_else(|| SeedError::MalformedResponse {
                kind: spec.kind.label(),
                name: spec.name.clone(),
            })?;
            ctx.cache.insert(key, id);
            Ok(Upserted::Created(id))
        }
        400 if classify_rejection(&response.body) == Rejection::Conflict => {
            tracing::debug!("{} '{}' already exists, looking it up", spec.kind, spec.name);
            match find_by_name(api, spec.kind, &spec.name, parent_id).await? {
                Some(id) => {
                    ctx.cache.insert(key, id);
                    Ok(Upserted::Existing(id))
                }
                None => Err(SeedError::ConflictUnresolved {
                    kind: spec.kind.label(),
                    name: spec.name.clone(),
                }),
            }
        }
        status => Err(SeedError::Rejected {
            kind: spec.kind.label(),
            name: spec.name.clone(),
            status,
            body: response.body,
        }),
    }
}

/// Groups have no parent scope; everything else is scoped by parent id
fn scope_of(kind: ResourceKind, parent_id: Option<u64>) -> Option<u64> {
    kind.parent_field().and(parent_id)
}

/// Items of a list response, bare array or paginated `results`
fn items_of(body: &Value) -> &[Value] {
    match body {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get("results")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

fn parent_of(kind: ResourceKind, item: &Value) -> Option<u64> {
    kind.parent_field()
        .and_then(|field| item.get(field))
        .and_then(Value::as_u64)
}

/// Find an existing resource by exact name within the parent scope.
pub async fn find_by_name<T>(
    api: &T,
    kind: ResourceKind,
    name: &str,
    parent_id: Option<u64>,
) -> Result<Option<u64>, SeedError>
where
    T: Transport + ?Sized,
{
    let mut query = vec![("name".to_string(), name.to_string())];
    if let (Some(field), Some(id)) = (kind.parent_field(), parent_id) {
        query.push((field.to_string(), id.to_string()));
    }

    let response = api.get(kind.endpoint(), &query).await?;
    if !response.is_success() {
        return Err(SeedError::Rejected {
            kind: kind.label(),
            name: name.to_string(),
            status: response.status,
            body: response.body,
        });
    }

    let scope = scope_of(kind, parent_id);
    let found = items_of(&response.body)
        .iter()
        .filter(|item| item.get("name").and_then(Value::as_str) == Some(name))
        .filter(|item| kind.parent_field().is_none() || parent_of(kind, item) == scope)
        .find_map(|item| item.get("pk").and_then(Value::as_u64));

    Ok(found)
}

/// List every existing resource of `kind` into the cache.
///
/// Follows `limit`/`offset` pages until the server reports no `next`
/// page. Returns the number of entries loaded.
pub async fn prime_cache<T>(
    api: &T,
    ctx: &mut SeedContext,
    kind: ResourceKind,
) -> Result<usize, SeedError>
where
    T: Transport + ?Sized,
{
    let mut loaded = 0;
    let mut offset = 0;

    loop {
        let query = vec![
            ("limit".to_string(), PRIME_PAGE_LIMIT.to_string()),
            ("offset".to_string(), offset.to_string()),
        ];
        let response = api.get(kind.endpoint(), &query).await?;
        if !response.is_success() {
            return Err(SeedError::Rejected {
                kind: kind.label(),
                name: "*".to_string(),
                status: response.status,
                body: response.body,
            });
        }

        let items = items_of(&response.body);
        for item in items {
            let name = item.get("name").and_then(Value::as_str);
            let pk = item.get("pk").and_then(Value::as_u64);
            if let (Some(name), Some(pk)) = (name, pk) {
                let key = CacheKey::new(kind, parent_of(kind, item), name);
                ctx.cache.insert(key, pk);
                loaded += 1;
            }
        }

        let has_next = response
            .body
            .get("next")
            .map(|next| !next.is_null())
            .unwrap_or(false);
        if !has_next || items.is_empty() {
            break;
        }
        offset += items.len();
    }

    tracing::info!("Loaded {} existing {} entries", loaded, kind);
    Ok(loaded)
}
