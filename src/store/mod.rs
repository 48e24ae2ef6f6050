//! Content store contract. Persistence lives behind `ContentStore`; this crate
//! only ships the in-process `MemoryStore`.

mod memory;
mod model;
mod query;

pub use memory::MemoryStore;
pub use model::{Block, Entity, Menu, Meta, ModelError, Page, Site, Template, Translation, PAGE_STATUS_DRAFT};
pub use query::{ListQuery, DEFAULT_LIMIT, MAX_LIMIT};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("invalid {kind}: {reason}")]
    Invalid { kind: &'static str, reason: String },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Per-resource operations consumed by the API layer.
///
/// `*_find_by_id` and `*_soft_delete_by_id` never see soft-deleted records; a
/// `ListQuery` with `soft_deleted_included` does. `*_create` assigns the id.
/// Translations have no soft-delete operation.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn page_create(&self, page: Page) -> Result<Page, StoreError>;
    async fn page_find_by_id(&self, id: &str) -> Result<Option<Page>, StoreError>;
    async fn page_list(&self, query: &ListQuery) -> Result<Vec<Page>, StoreError>;
    async fn page_update(&self, page: Page) -> Result<Page, StoreError>;
    async fn page_soft_delete_by_id(&self, id: &str) -> Result<(), StoreError>;

    async fn menu_create(&self, menu: Menu) -> Result<Menu, StoreError>;
    async fn menu_find_by_id(&self, id: &str) -> Result<Option<Menu>, StoreError>;
    async fn menu_list(&self, query: &ListQuery) -> Result<Vec<Menu>, StoreError>;
    async fn menu_update(&self, menu: Menu) -> Result<Menu, StoreError>;
    async fn menu_soft_delete_by_id(&self, id: &str) -> Result<(), StoreError>;

    async fn site_create(&self, site: Site) -> Result<Site, StoreError>;
    async fn site_find_by_id(&self, id: &str) -> Result<Option<Site>, StoreError>;
    async fn site_list(&self, query: &ListQuery) -> Result<Vec<Site>, StoreError>;
    async fn site_update(&self, site: Site) -> Result<Site, StoreError>;
    async fn site_soft_delete_by_id(&self, id: &str) -> Result<(), StoreError>;

    async fn template_create(&self, template: Template) -> Result<Template, StoreError>;
    async fn template_find_by_id(&self, id: &str) -> Result<Option<Template>, StoreError>;
    async fn template_list(&self, query: &ListQuery) -> Result<Vec<Template>, StoreError>;
    async fn template_update(&self, template: Template) -> Result<Template, StoreError>;
    async fn template_soft_delete_by_id(&self, id: &str) -> Result<(), StoreError>;

    async fn block_create(&self, block: Block) -> Result<Block, StoreError>;
    async fn block_find_by_id(&self, id: &str) -> Result<Option<Block>, StoreError>;
    async fn block_list(&self, query: &ListQuery) -> Result<Vec<Block>, StoreError>;
    async fn block_update(&self, block: Block) -> Result<Block, StoreError>;
    async fn block_soft_delete_by_id(&self, id: &str) -> Result<(), StoreError>;

    async fn translation_create(&self, translation: Translation) -> Result<Translation, StoreError>;
    async fn translation_find_by_id(&self, id: &str) -> Result<Option<Translation>, StoreError>;
    async fn translation_list(&self, query: &ListQuery) -> Result<Vec<Translation>, StoreError>;
    async fn translation_update(&self, translation: Translation) -> Result<Translation, StoreError>;
}
