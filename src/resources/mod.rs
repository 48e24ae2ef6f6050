//! Resource descriptors, one per resource family.

mod block;
mod menu;
mod page;
mod site;
mod template;
mod translation;

pub use block::{BlockBody, BlockResource};
pub use menu::{MenuBody, MenuResource};
pub use page::{PageBody, PageResource};
pub use site::{SiteBody, SiteResource};
pub use template::{TemplateBody, TemplateResource};
pub use translation::{TranslationBody, TranslationResource};

use crate::service::Resource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Page,
    Menu,
    Site,
    Template,
    Block,
    Translation,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Page,
        ResourceKind::Menu,
        ResourceKind::Site,
        ResourceKind::Template,
        ResourceKind::Block,
        ResourceKind::Translation,
    ];

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.segment() == segment)
    }

    pub fn segment(self) -> &'static str {
        match self {
            ResourceKind::Page => PageResource::PLURAL,
            ResourceKind::Menu => MenuResource::PLURAL,
            ResourceKind::Site => SiteResource::PLURAL,
            ResourceKind::Template => TemplateResource::PLURAL,
            ResourceKind::Block => BlockResource::PLURAL,
            ResourceKind::Translation => TranslationResource::PLURAL,
        }
    }
}
