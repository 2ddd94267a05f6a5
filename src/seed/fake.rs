//! In-memory stand-in for the inventory API, used by unit tests.
//!
//! Mimics the parts of the server the seeders depend on: scoped name
//! uniqueness reported as a 400, `name`/parent filters on list endpoints and
//! optional `limit`/`offset` pagination.

use super::kind::ResourceKind;
use crate::api::{ApiResponse, Transport};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct State {
    items: HashMap<ResourceKind, Vec<Value>>,
    next_pk: u64,
    posts: usize,
    rejections: HashMap<String, Value>,
    users: Vec<Value>,
}

pub struct FakeInventory {
    state: Mutex<State>,
    page_size: Option<usize>,
}

impl FakeInventory {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            page_size: None,
        }
    }

    /// Paginate list responses when the caller passes `limit`
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: Some(page_size),
            ..Self::new()
        }
    }

    /// Seed a resource directly, bypassing the create endpoint
    pub fn insert(&self, kind: ResourceKind, name: &str, parent: Option<u64>) -> u64 {
        let mut state = self.state.lock().unwrap();
        let mut body = Map::new();
        body.insert("name".to_string(), json!(name));
        if let Some(field) = kind.parent_field() {
            body.insert(field.to_string(), json!(parent));
        }
        Self::store(&mut state, kind, body)
    }

    pub fn add_user(&self, username: &str) {
        let mut state = self.state.lock().unwrap();
        state.next_pk += 1;
        let pk = state.next_pk;
        state.users.push(json!({"pk": pk, "username": username}));
    }

    /// Make every create of `name` fail with this 400 body
    pub fn reject_with(&self, name: &str, body: Value) {
        let mut state = self.state.lock().unwrap();
        state.rejections.insert(name.to_string(), body);
    }

    pub fn post_count(&self) -> usize {
        self.state.lock().unwrap().posts
    }

    pub fn len(&self, kind: ResourceKind) -> usize {
        self.state
            .lock()
            .unwrap()
            .items
            .get(&kind)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Sorted (name, parent) pairs of every stored resource of `kind`
    pub fn snapshot(&self, kind: ResourceKind) -> Vec<(String, Option<u64>)> {
        let state = self.state.lock().unwrap();
        let mut out: Vec<_> = state
            .items
            .get(&kind)
            .map(|items| {
                items
                    .iter()
                    .map(|item| {
                        let name = item["name"].as_str().unwrap_or_default().to_string();
                        let parent = kind
                            .parent_field()
                            .and_then(|f| item.get(f))
                            .and_then(Value::as_u64);
                        (name, parent)
                    })
                    .collect()
            })
            .unwrap_or_default();
        out.sort();
        out
    }

    fn store(state: &mut State, kind: ResourceKind, mut body: Map<String, Value>) -> u64 {
        state.next_pk += 1;
        let pk = state.next_pk;
        body.insert("pk".to_string(), json!(pk));
        state.items.entry(kind).or_default().push(Value::Object(body));
        pk
    }

    fn kind_for(path: &str) -> Option<ResourceKind> {
        ResourceKind::ALL.into_iter().find(|k| k.endpoint() == path)
    }

    fn matches(item: &Value, key: &str, wanted: &str) -> bool {
        match item.get(key) {
            Some(Value::String(s)) => s == wanted,
            Some(Value::Number(n)) => n.to_string() == wanted,
            _ => false,
        }
    }

    fn list(&self, items: Vec<Value>, query: &[(String, String)]) -> Value {
        let param = |name: &str| {
            query
                .iter()
                .find(|(k, _)| k == name)
                .and_then(|(_, v)| v.parse::<usize>().ok())
        };
        let filtered: Vec<Value> = items
            .into_iter()
            .filter(|item| {
                query
                    .iter()
                    .filter(|(k, _)| k != "limit" && k != "offset")
                    .all(|(k, v)| Self::matches(item, k, v))
            })
            .collect();

        match (self.page_size, param("limit")) {
            (Some(page_size), Some(limit)) => {
                let offset = param("offset").unwrap_or(0);
                let size = page_size.min(limit);
                let page: Vec<Value> = filtered.iter().skip(offset).take(size).cloned().collect();
                let next = if offset + page.len() < filtered.len() {
                    json!(format!("?offset={}", offset + page.len()))
                } else {
                    Value::Null
                };
                json!({"count": filtered.len(), "next": next, "results": page})
            }
            _ => Value::Array(filtered),
        }
    }
}

impl Default for FakeInventory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for FakeInventory {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<ApiResponse> {
        if path.is_empty() {
            return Ok(ApiResponse::new(200, json!({"server": "fake"})));
        }
        if path == "user/" {
            let users = self.state.lock().unwrap().users.clone();
            return Ok(ApiResponse::new(200, self.list(users, query)));
        }
        let Some(kind) = Self::kind_for(path) else {
            return Ok(ApiResponse::new(404, json!({"detail": "Not found."})));
        };
        let items = self
            .state
            .lock()
            .unwrap()
            .items
            .get(&kind)
            .cloned()
            .unwrap_or_default();
        Ok(ApiResponse::new(200, self.list(items, query)))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        let Some(kind) = Self::kind_for(path) else {
            return Ok(ApiResponse::new(405, json!({"detail": "Method not allowed."})));
        };
        let mut state = self.state.lock().unwrap();
        state.posts += 1;

        let name = body["name"].as_str().unwrap_or_default().to_string();
        if let Some(rejection) = state.rejections.get(&name) {
            return Ok(ApiResponse::new(400, rejection.clone()));
        }

        let parent = kind.parent_field().map(|f| body.get(f).and_then(Value::as_u64));
        let duplicate = state.items.get(&kind).is_some_and(|items| {
            items.iter().any(|item| {
                item["name"] == body["name"]
                    && parent.map_or(true, |p| {
                        kind.parent_field()
                            .and_then(|f| item.get(f))
                            .and_then(Value::as_u64)
                            == p
                    })
            })
        });
        if duplicate {
            return Ok(ApiResponse::new(
                400,
                json!({"name": [format!("{} with this Name already exists.", kind.label())]}),
            ));
        }

        let mut stored = body.as_object().cloned().unwrap_or_default();
        if let (Some(field), Some(None)) = (kind.parent_field(), parent) {
            stored.insert(field.to_string(), Value::Null);
        }
        let pk = Self::store(&mut state, kind, stored.clone());
        stored.insert("pk".to_string(), json!(pk));
        Ok(ApiResponse::new(201, Value::Object(stored)))
    }
}
