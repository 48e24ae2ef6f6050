//! Resource dispatch: `/api/<resource>[/<id>]`, keyed on method.
//!
//! Well-formed paths arrive through axum `Path` extraction, which percent-decodes
//! the id segment. Everything else lands on the `dispatch` fallback.

use crate::error::AppError;
use crate::resources::{
    BlockResource, MenuResource, PageResource, ResourceKind, SiteResource, TemplateResource, TranslationResource,
};
use crate::response::{success_many, success_message, success_one};
use crate::service::{include_soft_deleted, CrudService, Resource};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{rejection::PathRejection, Path, Query, State},
    http::{Method, Uri},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;

pub const API_SEGMENT: &str = "api";

/// Parsed request path.
#[derive(Debug, PartialEq, Eq)]
pub struct ApiPath {
    pub resource: ResourceKind,
    pub id: Option<String>,
}

impl ApiPath {
    pub fn new(resource: &str, id: Option<String>) -> Result<Self, AppError> {
        let resource = ResourceKind::from_segment(resource)
            .ok_or_else(|| AppError::NotFound(format!("Unknown resource: {}", resource)))?;
        Ok(Self { resource, id })
    }

    /// Raw `/api/<resource>` or `/api/<resource>/<id>`. Empty segments are ignored, so
    /// trailing slashes are harmless.
    pub fn parse(path: &str) -> Result<Self, AppError> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < 2 || segments[0] != API_SEGMENT {
            return Err(AppError::BadRequest("Invalid API path".into()));
        }
        let id = match &segments[2..] {
            [] => None,
            [id] => Some(id.to_string()),
            _ => return Err(AppError::BadRequest("Invalid path".into())),
        };
        Self::new(segments[1], id)
    }
}

fn path_error(e: PathRejection) -> AppError {
    AppError::BadRequest(format!("Invalid path: {}", e))
}

/// `/api/:resource`
pub async fn dispatch_collection(
    State(state): State<AppState>,
    resource: Result<Path<String>, PathRejection>,
    method: Method,
    uri: Uri,
    body: Body,
) -> Result<Response, AppError> {
    let Path(resource) = resource.map_err(path_error)?;
    route(&state, ApiPath::new(&resource, None)?, method, &uri, body).await
}

/// `/api/:resource/:id`
pub async fn dispatch_item(
    State(state): State<AppState>,
    segments: Result<Path<(String, String)>, PathRejection>,
    method: Method,
    uri: Uri,
    body: Body,
) -> Result<Response, AppError> {
    let Path((resource, id)) = segments.map_err(path_error)?;
    route(&state, ApiPath::new(&resource, Some(id))?, method, &uri, body).await
}

/// Fallback for every other path, so malformed and unknown paths get JSON errors.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Body,
) -> Result<Response, AppError> {
    let path = ApiPath::parse(uri.path())?;
    route(&state, path, method, &uri, body).await
}

async fn route(state: &AppState, path: ApiPath, method: Method, uri: &Uri, body: Body) -> Result<Response, AppError> {
    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(uri)
        .map_err(|e| AppError::BadRequest(format!("Invalid query string: {}", e)))?;
    let req = EntityRequest {
        state,
        method,
        id: path.id,
        params,
        body,
    };
    match path.resource {
        ResourceKind::Page => serve::<PageResource>(req).await,
        ResourceKind::Menu => serve::<MenuResource>(req).await,
        ResourceKind::Site => serve::<SiteResource>(req).await,
        ResourceKind::Template => serve::<TemplateResource>(req).await,
        ResourceKind::Block => serve::<BlockResource>(req).await,
        ResourceKind::Translation => serve::<TranslationResource>(req).await,
    }
}

struct EntityRequest<'a> {
    state: &'a AppState,
    method: Method,
    id: Option<String>,
    params: HashMap<String, String>,
    body: Body,
}

impl EntityRequest<'_> {
    async fn read_body(self) -> Result<axum::body::Bytes, AppError> {
        axum::body::to_bytes(self.body, self.state.body_limit)
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {}", e)))
    }
}

async fn serve<R: Resource>(req: EntityRequest<'_>) -> Result<Response, AppError> {
    let state = req.state;
    let store = state.store.as_ref();
    match (req.method.clone(), req.id.clone()) {
        (Method::POST, None) => {
            let body = req.read_body().await?;
            Ok(success_one(CrudService::<R>::create(store, &body).await?).into_response())
        }
        (Method::GET, Some(id)) => {
            let fields = CrudService::<R>::read(store, &id, include_soft_deleted(&req.params)).await?;
            Ok(success_one(fields).into_response())
        }
        (Method::GET, None) => {
            let items = CrudService::<R>::list(store, &req.params).await?;
            Ok(success_many(R::PLURAL, items).into_response())
        }
        (Method::PUT, Some(id)) => {
            let body = req.read_body().await?;
            Ok(success_one(CrudService::<R>::update(store, &id, &body).await?).into_response())
        }
        (Method::PUT, None) => Err(AppError::BadRequest(format!("{} ID required for update", R::NAME))),
        (Method::DELETE, Some(id)) => {
            CrudService::<R>::delete(store, &id).await?;
            Ok(success_message(format!("{} deleted successfully", R::NAME)).into_response())
        }
        (Method::DELETE, None) => Err(AppError::BadRequest(format!("{} ID required for delete", R::NAME))),
        _ => Err(AppError::MethodNotAllowed),
    }
}
