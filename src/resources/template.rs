//! Templates: named layouts scoped to a site.

use crate::error::AppError;
use crate::fields;
use crate::service::{set_non_empty, set_present, str_field, RequestValidator, Resource};
use crate::store::{ContentStore, ListQuery, StoreError, Template};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TemplateBody {
    #[serde(default, deserialize_with = "fields::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "fields::string")]
    pub site_id: Option<String>,
    #[serde(default, deserialize_with = "fields::string")]
    pub content: Option<String>,
}

pub struct TemplateResource;

#[async_trait]
impl Resource for TemplateResource {
    type Record = Template;
    type Create = TemplateBody;
    type Update = TemplateBody;

    const NAME: &'static str = "Template";
    const PLURAL: &'static str = "templates";

    fn build(req: TemplateBody) -> Result<Template, AppError> {
        let name = RequestValidator::required(req.name, "Name")?;
        let site_id = RequestValidator::required(req.site_id, "Site ID")?;
        let mut template = Template::new(site_id, name);
        set_present(&mut template.content, req.content);
        Ok(template)
    }

    fn apply(template: &mut Template, req: TemplateBody) -> Result<(), AppError> {
        set_non_empty(&mut template.name, req.name);
        set_non_empty(&mut template.site_id, req.site_id);
        set_present(&mut template.content, req.content);
        Ok(())
    }

    fn project(template: &Template) -> Map<String, Value> {
        let mut map = Map::new();
        str_field(&mut map, "name", &template.name);
        str_field(&mut map, "content", &template.content);
        str_field(&mut map, "site_id", &template.site_id);
        map
    }

    fn filter(mut query: ListQuery, params: &HashMap<String, String>) -> ListQuery {
        for (key, value) in params.iter().filter(|(_, v)| !v.is_empty()) {
            query = match key.as_str() {
                "site_id" => query.set_site_id(value.as_str()),
                "name" => query.set_name_like(value.as_str()),
                _ => query,
            };
        }
        query
    }

    async fn create(store: &dyn ContentStore, template: Template) -> Result<Template, StoreError> {
        store.template_create(template).await
    }

    async fn find_by_id(store: &dyn ContentStore, id: &str) -> Result<Option<Template>, StoreError> {
        store.template_find_by_id(id).await
    }

    async fn list(store: &dyn ContentStore, query: &ListQuery) -> Result<Vec<Template>, StoreError> {
        store.template_list(query).await
    }

    async fn update(store: &dyn ContentStore, template: Template) -> Result<Template, StoreError> {
        store.template_update(template).await
    }

    async fn soft_delete(store: &dyn ContentStore, id: &str) -> Result<(), StoreError> {
        store.template_soft_delete_by_id(id).await
    }
}
