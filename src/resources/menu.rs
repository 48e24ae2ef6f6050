//! Menus, keyed by site and filterable by name.

use crate::error::AppError;
use crate::fields;
use crate::service::{set_non_empty, str_field, RequestValidator, Resource};
use crate::store::{ContentStore, ListQuery, Menu, StoreError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MenuBody {
    #[serde(default, deserialize_with = "fields::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "fields::string")]
    pub site_id: Option<String>,
}

pub struct MenuResource;

#[async_trait]
impl Resource for MenuResource {
    type Record = Menu;
    type Create = MenuBody;
    type Update = MenuBody;

    const NAME: &'static str = "Menu";
    const PLURAL: &'static str = "menus";

    fn build(req: MenuBody) -> Result<Menu, AppError> {
        let name = RequestValidator::required(req.name, "Name")?;
        let site_id = RequestValidator::required(req.site_id, "Site ID")?;
        Ok(Menu::new(site_id, name))
    }

    fn apply(menu: &mut Menu, req: MenuBody) -> Result<(), AppError> {
        set_non_empty(&mut menu.name, req.name);
        set_non_empty(&mut menu.site_id, req.site_id);
        Ok(())
    }

    fn project(menu: &Menu) -> Map<String, Value> {
        let mut map = Map::new();
        str_field(&mut map, "name", &menu.name);
        str_field(&mut map, "site_id", &menu.site_id);
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

    async fn create(store: &dyn ContentStore, menu: Menu) -> Result<Menu, StoreError> {
        store.menu_create(menu).await
    }

    async fn find_by_id(store: &dyn ContentStore, id: &str) -> Result<Option<Menu>, StoreError> {
        store.menu_find_by_id(id).await
    }

    async fn list(store: &dyn ContentStore, query: &ListQuery) -> Result<Vec<Menu>, StoreError> {
        store.menu_list(query).await
    }

    async fn update(store: &dyn ContentStore, menu: Menu) -> Result<Menu, StoreError> {
        store.menu_update(menu).await
    }

    async fn soft_delete(store: &dyn ContentStore, id: &str) -> Result<(), StoreError> {
        store.menu_soft_delete_by_id(id).await
    }
}
