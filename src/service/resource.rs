//! Resource descriptor: everything the generic CRUD service needs to know about one
//! resource family.

use crate::error::AppError;
use crate::store::{ContentStore, Entity, ListQuery, StoreError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;

#[async_trait]
pub trait Resource: Send + Sync + 'static {
    type Record: Entity;
    type Create: DeserializeOwned + Send;
    type Update: DeserializeOwned + Send;

    /// Display name used in messages ("Page").
    const NAME: &'static str;
    /// Path segment and list key ("pages").
    const PLURAL: &'static str;

    /// Validate required fields and build a new record with defaults applied.
    fn build(req: Self::Create) -> Result<Self::Record, AppError>;

    /// Copy the fields present in `req` onto `record`.
    fn apply(record: &mut Self::Record, req: Self::Update) -> Result<(), AppError>;

    /// Resource-specific fields for responses. `id` and `soft_deleted` are added by the caller.
    fn project(record: &Self::Record) -> Map<String, Value>;

    /// Add resource-specific filters from the query string. Defaults to `site_id`.
    fn filter(query: ListQuery, params: &HashMap<String, String>) -> ListQuery {
        match params.get("site_id") {
            Some(site_id) if !site_id.is_empty() => query.set_site_id(site_id.as_str()),
            _ => query,
        }
    }

    async fn create(store: &dyn ContentStore, record: Self::Record) -> Result<Self::Record, StoreError>;
    async fn find_by_id(store: &dyn ContentStore, id: &str) -> Result<Option<Self::Record>, StoreError>;
    async fn list(store: &dyn ContentStore, query: &ListQuery) -> Result<Vec<Self::Record>, StoreError>;
    async fn update(store: &dyn ContentStore, record: Self::Record) -> Result<Self::Record, StoreError>;
    async fn soft_delete(store: &dyn ContentStore, id: &str) -> Result<(), StoreError>;
}

pub(crate) fn str_field(map: &mut Map<String, Value>, key: &str, value: &str) {
    map.insert(key.to_string(), Value::String(value.to_string()));
}
