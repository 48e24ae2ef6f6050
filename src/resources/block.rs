//! Blocks: content fragments placed on a page or template, optionally nested under a parent block.

use crate::error::AppError;
use crate::fields;
use crate::service::{set_non_empty, set_present, str_field, RequestValidator, Resource};
use crate::store::{Block, ContentStore, ListQuery, StoreError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BlockBody {
    #[serde(default, deserialize_with = "fields::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "fields::string")]
    pub site_id: Option<String>,
    #[serde(default, deserialize_with = "fields::string")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "fields::string")]
    pub page_id: Option<String>,
    #[serde(default, deserialize_with = "fields::string")]
    pub template_id: Option<String>,
    #[serde(default, deserialize_with = "fields::string")]
    pub parent_id: Option<String>,
    /// Ordering among siblings, defaults to 0.
    #[serde(default, deserialize_with = "fields::integer")]
    pub sequence: Option<i64>,
}

pub struct BlockResource;

#[async_trait]
impl Resource for BlockResource {
    type Record = Block;
    type Create = BlockBody;
    type Update = BlockBody;

    const NAME: &'static str = "Block";
    const PLURAL: &'static str = "blocks";

    fn build(req: BlockBody) -> Result<Block, AppError> {
        let name = RequestValidator::required(req.name, "Name")?;
        let site_id = RequestValidator::required(req.site_id, "Site ID")?;
        let mut block = Block::new(site_id, name);
        set_present(&mut block.content, req.content);
        set_present(&mut block.page_id, req.page_id);
        set_present(&mut block.template_id, req.template_id);
        set_present(&mut block.parent_id, req.parent_id);
        set_present(&mut block.sequence, req.sequence);
        Ok(block)
    }

    fn apply(block: &mut Block, req: BlockBody) -> Result<(), AppError> {
        set_non_empty(&mut block.name, req.name);
        set_non_empty(&mut block.site_id, req.site_id);
        set_present(&mut block.content, req.content);
        set_present(&mut block.page_id, req.page_id);
        set_present(&mut block.template_id, req.template_id);
        set_present(&mut block.parent_id, req.parent_id);
        set_present(&mut block.sequence, req.sequence);
        Ok(())
    }

    fn project(block: &Block) -> Map<String, Value> {
        let mut map = Map::new();
        str_field(&mut map, "name", &block.name);
        str_field(&mut map, "content", &block.content);
        str_field(&mut map, "site_id", &block.site_id);
        str_field(&mut map, "page_id", &block.page_id);
        str_field(&mut map, "template_id", &block.template_id);
        str_field(&mut map, "parent_id", &block.parent_id);
        map.insert("sequence".into(), Value::from(block.sequence));
        map
    }

    fn filter(mut query: ListQuery, params: &HashMap<String, String>) -> ListQuery {
        for (key, value) in params.iter().filter(|(_, v)| !v.is_empty()) {
            query = match key.as_str() {
                "site_id" => query.set_site_id(value.as_str()),
                "page_id" => query.set_page_id(value.as_str()),
                "template_id" => query.set_template_id(value.as_str()),
                "parent_id" => query.set_parent_id(value.as_str()),
                "name" => query.set_name_like(value.as_str()),
                _ => query,
            };
        }
        query
    }

    async fn create(store: &dyn ContentStore, block: Block) -> Result<Block, StoreError> {
        store.block_create(block).await
    }

    async fn find_by_id(store: &dyn ContentStore, id: &str) -> Result<Option<Block>, StoreError> {
        store.block_find_by_id(id).await
    }

    async fn list(store: &dyn ContentStore, query: &ListQuery) -> Result<Vec<Block>, StoreError> {
        store.block_list(query).await
    }

    async fn update(store: &dyn ContentStore, block: Block) -> Result<Block, StoreError> {
        store.block_update(block).await
    }

    async fn soft_delete(store: &dyn ContentStore, id: &str) -> Result<(), StoreError> {
        store.block_soft_delete_by_id(id).await
    }
}
