//! Sites and their validated domain names.

use crate::error::AppError;
use crate::fields;
use crate::service::{set_non_empty, str_field, RequestValidator, Resource};
use crate::store::{ContentStore, ListQuery, Site, StoreError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SiteBody {
    #[serde(default, deserialize_with = "fields::string")]
    pub name: Option<String>,
    /// Host names served by the site, optionally with a port. Replaces the whole list.
    #[serde(default, deserialize_with = "fields::string_list")]
    pub domain_names: Option<Vec<String>>,
}

pub struct SiteResource;

#[async_trait]
impl Resource for SiteResource {
    type Record = Site;
    type Create = SiteBody;
    type Update = SiteBody;

    const NAME: &'static str = "Site";
    const PLURAL: &'static str = "sites";

    fn build(req: SiteBody) -> Result<Site, AppError> {
        let name = RequestValidator::required(req.name, "Name")?;
        let mut site = Site::new(name);
        if let Some(domains) = req.domain_names {
            site.set_domain_names(domains)?;
        }
        Ok(site)
    }

    fn apply(site: &mut Site, req: SiteBody) -> Result<(), AppError> {
        set_non_empty(&mut site.name, req.name);
        if let Some(domains) = req.domain_names {
            site.set_domain_names(domains)?;
        }
        Ok(())
    }

    fn project(site: &Site) -> Map<String, Value> {
        let mut map = Map::new();
        str_field(&mut map, "name", &site.name);
        map.insert(
            "domain_names".into(),
            Value::Array(site.domain_names().iter().cloned().map(Value::String).collect()),
        );
        map
    }

    /// Sites are not site-scoped; only `name` applies.
    fn filter(query: ListQuery, params: &HashMap<String, String>) -> ListQuery {
        match params.get("name") {
            Some(name) if !name.is_empty() => query.set_name_like(name.as_str()),
            _ => query,
        }
    }

    async fn create(store: &dyn ContentStore, site: Site) -> Result<Site, StoreError> {
        store.site_create(site).await
    }

    async fn find_by_id(store: &dyn ContentStore, id: &str) -> Result<Option<Site>, StoreError> {
        store.site_find_by_id(id).await
    }

    async fn list(store: &dyn ContentStore, query: &ListQuery) -> Result<Vec<Site>, StoreError> {
        store.site_list(query).await
    }

    async fn update(store: &dyn ContentStore, site: Site) -> Result<Site, StoreError> {
        store.site_update(site).await
    }

    async fn soft_delete(store: &dyn ContentStore, id: &str) -> Result<(), StoreError> {
        store.site_soft_delete_by_id(id).await
    }
}
