//! CrudService: generic CRUD driven by per-resource descriptors.

mod crud;
mod resource;
mod validation;
pub use crud::{include_soft_deleted, CrudService};
pub(crate) use resource::str_field;
pub use resource::Resource;
pub use validation::{set_non_empty, set_present, RequestValidator};
