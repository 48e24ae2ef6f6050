//! In-process `ContentStore`. Records live in insertion order behind one `RwLock`
//! per resource; soft-deleted rows stay in place.

use super::model::{Block, Entity, Menu, Page, Site, Template, Translation};
use super::query::ListQuery;
use super::{ContentStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;

/// Per-resource matching for list filters beyond id/site/soft-delete.
trait Record: Entity {
    const KIND: &'static str;

    fn site_id(&self) -> &str;

    /// Field that `name_like` applies to.
    fn name(&self) -> &str;

    fn matches_extra(&self, _query: &ListQuery) -> bool {
        true
    }

    fn matches(&self, query: &ListQuery) -> bool {
        if !query.soft_deleted_included && self.is_soft_deleted() {
            return false;
        }
        if query.id.as_deref().is_some_and(|id| id != self.id()) {
            return false;
        }
        if query.site_id.as_deref().is_some_and(|s| s != self.site_id()) {
            return false;
        }
        if let Some(needle) = query.name_like.as_deref() {
            if !self.name().to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        self.matches_extra(query)
    }
}

impl Record for Page {
    const KIND: &'static str = "page";
    fn site_id(&self) -> &str {
        &self.site_id
    }
    fn name(&self) -> &str {
        &self.title
    }
    fn matches_extra(&self, query: &ListQuery) -> bool {
        query.status.as_deref().map_or(true, |s| s == self.status)
    }
}

impl Record for Menu {
    const KIND: &'static str = "menu";
    fn site_id(&self) -> &str {
        &self.site_id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Record for Site {
    const KIND: &'static str = "site";
    // A site scopes itself.
    fn site_id(&self) -> &str {
        self.id()
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Record for Template {
    const KIND: &'static str = "template";
    fn site_id(&self) -> &str {
        &self.site_id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Record for Block {
    const KIND: &'static str = "block";
    fn site_id(&self) -> &str {
        &self.site_id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn matches_extra(&self, query: &ListQuery) -> bool {
        query.page_id.as_deref().map_or(true, |v| v == self.page_id)
            && query.template_id.as_deref().map_or(true, |v| v == self.template_id)
            && query.parent_id.as_deref().map_or(true, |v| v == self.parent_id)
    }
}

impl Record for Translation {
    const KIND: &'static str = "translation";
    fn site_id(&self) -> &str {
        &self.site_id
    }
    fn name(&self) -> &str {
        &self.key
    }
    fn matches_extra(&self, query: &ListQuery) -> bool {
        query.key.as_deref().map_or(true, |k| k == self.key)
            && query.locale.as_deref().map_or(true, |l| self.content.contains_key(l))
    }
}

struct Rows<T> {
    rows: Vec<T>,
    index: HashMap<String, usize>,
}

struct Table<T> {
    inner: RwLock<Rows<T>>,
}

impl<T: Record> Table<T> {
    fn new() -> Self {
        Self {
            inner: RwLock::new(Rows {
                rows: Vec::new(),
                index: HashMap::new(),
            }),
        }
    }

    fn poisoned() -> StoreError {
        StoreError::Unavailable(format!("{} table lock poisoned", T::KIND))
    }

    fn not_found(id: &str) -> StoreError {
        StoreError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        }
    }

    fn create(&self, mut record: T) -> Result<T, StoreError> {
        let now = Utc::now();
        let meta = record.meta_mut();
        meta.id = uuid::Uuid::new_v4().to_string();
        meta.created_at = Some(now);
        meta.updated_at = Some(now);
        meta.soft_deleted_at = None;

        let mut guard = self.inner.write().map_err(|_| Self::poisoned())?;
        let pos = guard.rows.len();
        guard.index.insert(record.id().to_string(), pos);
        guard.rows.push(record.clone());
        tracing::debug!(kind = T::KIND, id = %record.id(), "store create");
        Ok(record)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        let guard = self.inner.read().map_err(|_| Self::poisoned())?;
        let found = guard
            .index
            .get(id)
            .map(|&pos| &guard.rows[pos])
            .filter(|r| !r.is_soft_deleted())
            .cloned();
        Ok(found)
    }

    fn list(&self, query: &ListQuery) -> Result<Vec<T>, StoreError> {
        tracing::debug!(kind = T::KIND, query = ?query, "store list");
        let guard = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(guard
            .rows
            .iter()
            .filter(|r| r.matches(query))
            .skip(query.effective_offset())
            .take(query.effective_limit())
            .cloned()
            .collect())
    }

    /// Replaces the stored row, keeping `created_at`. Soft-deleted rows can be updated.
    fn update(&self, mut record: T) -> Result<T, StoreError> {
        if record.id().is_empty() {
            return Err(StoreError::Invalid {
                kind: T::KIND,
                reason: "update without id".into(),
            });
        }
        let mut guard = self.inner.write().map_err(|_| Self::poisoned())?;
        let pos = *guard.index.get(record.id()).ok_or_else(|| Self::not_found(record.id()))?;
        let created_at = guard.rows[pos].meta().created_at;
        let meta = record.meta_mut();
        meta.created_at = created_at;
        meta.updated_at = Some(Utc::now());
        guard.rows[pos] = record.clone();
        tracing::debug!(kind = T::KIND, id = %record.id(), "store update");
        Ok(record)
    }

    fn soft_delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let mut guard = self.inner.write().map_err(|_| Self::poisoned())?;
        let pos = *guard.index.get(id).ok_or_else(|| Self::not_found(id))?;
        let row = &mut guard.rows[pos];
        if row.is_soft_deleted() {
            return Err(Self::not_found(id));
        }
        let now = Utc::now();
        let meta = row.meta_mut();
        meta.soft_deleted_at = Some(now);
        meta.updated_at = Some(now);
        tracing::debug!(kind = T::KIND, id = %id, "store soft delete");
        Ok(())
    }
}

/// Memory-backed store. Cheap to construct; share it behind an `Arc`.
pub struct MemoryStore {
    pages: Table<Page>,
    menus: Table<Menu>,
    sites: Table<Site>,
    templates: Table<Template>,
    blocks: Table<Block>,
    translations: Table<Translation>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            pages: Table::new(),
            menus: Table::new(),
            sites: Table::new(),
            templates: Table::new(),
            blocks: Table::new(),
            translations: Table::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn page_create(&self, page: Page) -> Result<Page, StoreError> {
        self.pages.create(page)
    }
    async fn page_find_by_id(&self, id: &str) -> Result<Option<Page>, StoreError> {
        self.pages.find_by_id(id)
    }
    async fn page_list(&self, query: &ListQuery) -> Result<Vec<Page>, StoreError> {
        self.pages.list(query)
    }
    async fn page_update(&self, page: Page) -> Result<Page, StoreError> {
        self.pages.update(page)
    }
    async fn page_soft_delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        self.pages.soft_delete_by_id(id)
    }

    async fn menu_create(&self, menu: Menu) -> Result<Menu, StoreError> {
        self.menus.create(menu)
    }
    async fn menu_find_by_id(&self, id: &str) -> Result<Option<Menu>, StoreError> {
        self.menus.find_by_id(id)
    }
    async fn menu_list(&self, query: &ListQuery) -> Result<Vec<Menu>, StoreError> {
        self.menus.list(query)
    }
    async fn menu_update(&self, menu: Menu) -> Result<Menu, StoreError> {
        self.menus.update(menu)
    }
    async fn menu_soft_delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        self.menus.soft_delete_by_id(id)
    }

    async fn site_create(&self, site: Site) -> Result<Site, StoreError> {
        self.sites.create(site)
    }
    async fn site_find_by_id(&self, id: &str) -> Result<Option<Site>, StoreError> {
        self.sites.find_by_id(id)
    }
    async fn site_list(&self, query: &ListQuery) -> Result<Vec<Site>, StoreError> {
        self.sites.list(query)
    }
    async fn site_update(&self, site: Site) -> Result<Site, StoreError> {
        self.sites.update(site)
    }
    async fn site_soft_delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        self.sites.soft_delete_by_id(id)
    }

    async fn template_create(&self, template: Template) -> Result<Template, StoreError> {
        self.templates.create(template)
    }
    async fn template_find_by_id(&self, id: &str) -> Result<Option<Template>, StoreError> {
        self.templates.find_by_id(id)
    }
    async fn template_list(&self, query: &ListQuery) -> Result<Vec<Template>, StoreError> {
        self.templates.list(query)
    }
    async fn template_update(&self, template: Template) -> Result<Template, StoreError> {
        self.templates.update(template)
    }
    async fn template_soft_delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        self.templates.soft_delete_by_id(id)
    }

    async fn block_create(&self, block: Block) -> Result<Block, StoreError> {
        self.blocks.create(block)
    }
    async fn block_find_by_id(&self, id: &str) -> Result<Option<Block>, StoreError> {
        self.blocks.find_by_id(id)
    }
    async fn block_list(&self, query: &ListQuery) -> Result<Vec<Block>, StoreError> {
        self.blocks.list(query)
    }
    async fn block_update(&self, block: Block) -> Result<Block, StoreError> {
        self.blocks.update(block)
    }
    async fn block_soft_delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        self.blocks.soft_delete_by_id(id)
    }

    async fn translation_create(&self, translation: Translation) -> Result<Translation, StoreError> {
        self.translations.create(translation)
    }
    async fn translation_find_by_id(&self, id: &str) -> Result<Option<Translation>, StoreError> {
        self.translations.find_by_id(id)
    }
    async fn translation_list(&self, query: &ListQuery) -> Result<Vec<Translation>, StoreError> {
        self.translations.list(query)
    }
    async fn translation_update(&self, translation: Translation) -> Result<Translation, StoreError> {
        self.translations.update(translation)
    }
}
