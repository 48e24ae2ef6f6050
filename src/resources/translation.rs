//! Translations carry a locale -> text map. Bodies may send the whole map as
//! `content`, or a single `locale` + `text` pair; the map wins when both are sent.

use crate::error::AppError;
use crate::fields;
use crate::service::{set_non_empty, str_field, RequestValidator, Resource};
use crate::store::{ContentStore, Entity, ListQuery, StoreError, Translation};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TranslationBody {
    #[serde(default, deserialize_with = "fields::string")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "fields::string")]
    pub site_id: Option<String>,
    /// locale -> text. Replaces the stored map on update.
    #[serde(default, deserialize_with = "fields::string_map")]
    pub content: Option<BTreeMap<String, String>>,
    #[serde(default, deserialize_with = "fields::string")]
    pub locale: Option<String>,
    #[serde(default, deserialize_with = "fields::string")]
    pub text: Option<String>,
}

impl TranslationBody {
    fn merge_into(self, content: &mut BTreeMap<String, String>) {
        if let Some(map) = self.content {
            *content = map;
            return;
        }
        if let (Some(locale), Some(text)) = (self.locale, self.text) {
            if !locale.trim().is_empty() {
                content.insert(locale, text);
            }
        }
    }
}

pub struct TranslationResource;

#[async_trait]
impl Resource for TranslationResource {
    type Record = Translation;
    type Create = TranslationBody;
    type Update = TranslationBody;

    const NAME: &'static str = "Translation";
    const PLURAL: &'static str = "translations";

    fn build(mut req: TranslationBody) -> Result<Translation, AppError> {
        let key = RequestValidator::required(req.key.take(), "Key")?;
        let site_id = RequestValidator::required(req.site_id.take(), "Site ID")?;
        let mut translation = Translation::new(site_id, key);
        req.merge_into(&mut translation.content);
        Ok(translation)
    }

    fn apply(translation: &mut Translation, mut req: TranslationBody) -> Result<(), AppError> {
        set_non_empty(&mut translation.key, req.key.take());
        set_non_empty(&mut translation.site_id, req.site_id.take());
        req.merge_into(&mut translation.content);
        Ok(())
    }

    fn project(translation: &Translation) -> Map<String, Value> {
        let mut map = Map::new();
        str_field(&mut map, "key", &translation.key);
        str_field(&mut map, "site_id", &translation.site_id);
        let content = translation
            .content
            .iter()
            .map(|(locale, text)| (locale.clone(), Value::String(text.clone())))
            .collect();
        map.insert("content".into(), Value::Object(content));
        map
    }

    fn filter(mut query: ListQuery, params: &HashMap<String, String>) -> ListQuery {
        for (key, value) in params.iter().filter(|(_, v)| !v.is_empty()) {
            query = match key.as_str() {
                "site_id" => query.set_site_id(value.as_str()),
                "key" => query.set_key(value.as_str()),
                "locale" => query.set_locale(value.as_str()),
                _ => query,
            };
        }
        query
    }

    async fn create(store: &dyn ContentStore, translation: Translation) -> Result<Translation, StoreError> {
        store.translation_create(translation).await
    }

    async fn find_by_id(store: &dyn ContentStore, id: &str) -> Result<Option<Translation>, StoreError> {
        store.translation_find_by_id(id).await
    }

    async fn list(store: &dyn ContentStore, query: &ListQuery) -> Result<Vec<Translation>, StoreError> {
        store.translation_list(query).await
    }

    async fn update(store: &dyn ContentStore, translation: Translation) -> Result<Translation, StoreError> {
        store.translation_update(translation).await
    }

    // The store has no translation soft-delete; stamp the record and update it.
    async fn soft_delete(store: &dyn ContentStore, id: &str) -> Result<(), StoreError> {
        let mut translation = store
            .translation_find_by_id(id)
            .await?
            .ok_or_else(|| StoreError::NotFound {
                kind: "translation",
                id: id.to_string(),
            })?;
        translation.meta_mut().soft_deleted_at = Some(Utc::now());
        store.translation_update(translation).await?;
        Ok(())
    }
}
