//! Query builder handed to the store's list operations.

pub const DEFAULT_LIMIT: u32 = 100;
pub const MAX_LIMIT: u32 = 1000;

/// Filters for a list call. Unset filters match everything; soft-deleted records
/// are excluded unless `soft_deleted_included` is set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub id: Option<String>,
    pub site_id: Option<String>,
    pub name_like: Option<String>,
    pub status: Option<String>,
    pub page_id: Option<String>,
    pub template_id: Option<String>,
    pub parent_id: Option<String>,
    pub key: Option<String>,
    pub locale: Option<String>,
    pub soft_deleted_included: bool,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn set_site_id(mut self, site_id: impl Into<String>) -> Self {
        self.site_id = Some(site_id.into());
        self
    }

    /// Case-insensitive substring match on the record's name (title for pages).
    pub fn set_name_like(mut self, name: impl Into<String>) -> Self {
        self.name_like = Some(name.into());
        self
    }

    pub fn set_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn set_page_id(mut self, page_id: impl Into<String>) -> Self {
        self.page_id = Some(page_id.into());
        self
    }

    pub fn set_template_id(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    pub fn set_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn set_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Translations having text for this locale.
    pub fn set_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn set_soft_deleted_included(mut self, included: bool) -> Self {
        self.soft_deleted_included = included;
        self
    }

    /// Clamped to `MAX_LIMIT`.
    pub fn set_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.min(MAX_LIMIT));
        self
    }

    pub fn set_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT) as usize
    }

    pub fn effective_offset(&self) -> usize {
        self.offset.unwrap_or(0) as usize
    }
}
