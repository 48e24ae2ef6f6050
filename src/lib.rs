//! Content API: REST surface for pages, menus, sites, templates, blocks and
//! translations over a pluggable content store.

pub mod config;
pub mod error;
pub mod fields;
pub mod handlers;
pub mod resources;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use response::{error_body, success_many, success_one};
pub use routes::{app, common_routes, entity_routes};
pub use service::{CrudService, Resource};
pub use state::AppState;
pub use store::{ContentStore, ListQuery, MemoryStore, StoreError};
