//! Generic CRUD over any `Resource`.

use crate::error::AppError;
use crate::service::{RequestValidator, Resource};
use crate::store::{ContentStore, Entity, ListQuery, StoreError};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::marker::PhantomData;

pub struct CrudService<R>(PhantomData<R>);

impl<R: Resource> CrudService<R> {
    /// Response fields for one record: `id`, the resource projection, `soft_deleted`.
    pub fn project(record: &R::Record) -> Map<String, Value> {
        let mut map = R::project(record);
        map.insert("id".into(), Value::String(record.id().to_string()));
        map.insert("soft_deleted".into(), Value::Bool(record.is_soft_deleted()));
        map
    }

    pub async fn create(store: &dyn ContentStore, body: &[u8]) -> Result<Map<String, Value>, AppError> {
        let req: R::Create = RequestValidator::decode(body)?;
        let record = R::build(req)?;
        let created = R::create(store, record).await?;
        tracing::info!(resource = R::PLURAL, id = %created.id(), "created");
        Ok(Self::project(&created))
    }

    /// Fetch one record. With `include_soft_deleted` the lookup goes through a
    /// soft-deleted-inclusive list query instead of `find_by_id`.
    pub async fn read(
        store: &dyn ContentStore,
        id: &str,
        include_soft_deleted: bool,
    ) -> Result<Map<String, Value>, AppError> {
        let record = if include_soft_deleted {
            let query = ListQuery::new().set_id(id).set_soft_deleted_included(true).set_limit(1);
            R::list(store, &query).await.map_err(Self::store_err)?.into_iter().next()
        } else {
            R::find_by_id(store, id).await.map_err(Self::store_err)?
        };
        let record = record.ok_or_else(Self::not_found)?;
        Ok(Self::project(&record))
    }

    /// List with query-string filters plus `limit`, `offset`, `include_soft_deleted`.
    pub async fn list(
        store: &dyn ContentStore,
        params: &HashMap<String, String>,
    ) -> Result<Vec<Map<String, Value>>, AppError> {
        let query = Self::list_query(params)?;
        let rows = R::list(store, &query).await.map_err(Self::store_err)?;
        Ok(rows.iter().map(Self::project).collect())
    }

    pub async fn update(store: &dyn ContentStore, id: &str, body: &[u8]) -> Result<Map<String, Value>, AppError> {
        let mut record = R::find_by_id(store, id)
            .await
            .map_err(Self::store_err)?
            .ok_or_else(Self::not_found)?;
        let req: R::Update = RequestValidator::decode(body)?;
        R::apply(&mut record, req)?;
        let updated = R::update(store, record).await.map_err(Self::store_err)?;
        tracing::info!(resource = R::PLURAL, id = %updated.id(), "updated");
        Ok(Self::project(&updated))
    }

    pub async fn delete(store: &dyn ContentStore, id: &str) -> Result<(), AppError> {
        R::soft_delete(store, id).await.map_err(Self::store_err)?;
        tracing::info!(resource = R::PLURAL, id = %id, "soft deleted");
        Ok(())
    }

    fn list_query(params: &HashMap<String, String>) -> Result<ListQuery, AppError> {
        let mut query = ListQuery::new();
        if let Some(limit) = params.get("limit") {
            let limit: u32 = limit
                .parse()
                .map_err(|_| AppError::BadRequest(format!("Invalid limit: {}", limit)))?;
            query = query.set_limit(limit);
        }
        if let Some(offset) = params.get("offset") {
            let offset: u32 = offset
                .parse()
                .map_err(|_| AppError::BadRequest(format!("Invalid offset: {}", offset)))?;
            query = query.set_offset(offset);
        }
        if include_soft_deleted(params) {
            query = query.set_soft_deleted_included(true);
        }
        Ok(R::filter(query, params))
    }

    fn not_found() -> AppError {
        AppError::NotFound(format!("{} not found", R::NAME))
    }

    fn store_err(err: StoreError) -> AppError {
        match err {
            StoreError::NotFound { .. } => Self::not_found(),
            other => AppError::Store(other),
        }
    }
}

pub fn include_soft_deleted(params: &HashMap<String, String>) -> bool {
    params
        .get("include_soft_deleted")
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}
