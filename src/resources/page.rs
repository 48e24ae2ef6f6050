//! Pages: titled content with a publication status, scoped to a site.

use crate::error::AppError;
use crate::fields;
use crate::service::{set_non_empty, set_present, str_field, RequestValidator, Resource};
use crate::store::{ContentStore, ListQuery, Page, StoreError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Body for `POST /api/pages` and `PUT /api/pages/{id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PageBody {
    #[serde(default, deserialize_with = "fields::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "fields::string")]
    pub site_id: Option<String>,
    #[serde(default, deserialize_with = "fields::string")]
    pub content: Option<String>,
    /// Defaults to "draft".
    #[serde(default, deserialize_with = "fields::string")]
    pub status: Option<String>,
}

pub struct PageResource;

#[async_trait]
impl Resource for PageResource {
    type Record = Page;
    type Create = PageBody;
    type Update = PageBody;

    const NAME: &'static str = "Page";
    const PLURAL: &'static str = "pages";

    fn build(req: PageBody) -> Result<Page, AppError> {
        let title = RequestValidator::required(req.title, "Title")?;
        let site_id = RequestValidator::required(req.site_id, "Site ID")?;
        let mut page = Page::new(site_id, title);
        set_present(&mut page.content, req.content);
        set_non_empty(&mut page.status, req.status);
        Ok(page)
    }

    fn apply(page: &mut Page, req: PageBody) -> Result<(), AppError> {
        set_non_empty(&mut page.title, req.title);
        set_non_empty(&mut page.site_id, req.site_id);
        set_present(&mut page.content, req.content);
        set_non_empty(&mut page.status, req.status);
        Ok(())
    }

    fn project(page: &Page) -> Map<String, Value> {
        let mut map = Map::new();
        str_field(&mut map, "title", &page.title);
        str_field(&mut map, "content", &page.content);
        str_field(&mut map, "status", &page.status);
        str_field(&mut map, "site_id", &page.site_id);
        map
    }

    fn filter(mut query: ListQuery, params: &HashMap<String, String>) -> ListQuery {
        for (key, value) in params.iter().filter(|(_, v)| !v.is_empty()) {
            query = match key.as_str() {
                "site_id" => query.set_site_id(value.as_str()),
                "status" => query.set_status(value.as_str()),
                "title" => query.set_name_like(value.as_str()),
                _ => query,
            };
        }
        query
    }

    async fn create(store: &dyn ContentStore, page: Page) -> Result<Page, StoreError> {
        store.page_create(page).await
    }

    async fn find_by_id(store: &dyn ContentStore, id: &str) -> Result<Option<Page>, StoreError> {
        store.page_find_by_id(id).await
    }

    async fn list(store: &dyn ContentStore, query: &ListQuery) -> Result<Vec<Page>, StoreError> {
        store.page_list(query).await
    }

    async fn update(store: &dyn ContentStore, page: Page) -> Result<Page, StoreError> {
        store.page_update(page).await
    }

    async fn soft_delete(store: &dyn ContentStore, id: &str) -> Result<(), StoreError> {
        store.page_soft_delete_by_id(id).await
    }
}
