//! Domain records owned by the content store.
//!
//! Fields that carry no invariant are public; `Site::domain_names` goes through a
//! validating setter.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;
use thiserror::Error;

pub const PAGE_STATUS_DRAFT: &str = "draft";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),
    #[error("Duplicate domain name: {0}")]
    DuplicateDomainName(String),
}

/// Bookkeeping shared by every record. Populated by the store.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub soft_deleted_at: Option<DateTime<Utc>>,
}

/// Common accessors the store and the CRUD service rely on.
pub trait Entity: Clone + Send + Sync + 'static {
    fn meta(&self) -> &Meta;
    fn meta_mut(&mut self) -> &mut Meta;

    fn id(&self) -> &str {
        &self.meta().id
    }

    fn is_soft_deleted(&self) -> bool {
        self.meta().soft_deleted_at.is_some()
    }
}

macro_rules! entity {
    ($ty:ty) => {
        impl Entity for $ty {
            fn meta(&self) -> &Meta {
                &self.meta
            }
            fn meta_mut(&mut self) -> &mut Meta {
                &mut self.meta
            }
        }
    };
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(flatten)]
    pub meta: Meta,
    pub site_id: String,
    pub title: String,
    pub content: String,
    pub status: String,
}

impl Page {
    pub fn new(site_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            meta: Meta::default(),
            site_id: site_id.into(),
            title: title.into(),
            content: String::new(),
            status: PAGE_STATUS_DRAFT.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    #[serde(flatten)]
    pub meta: Meta,
    pub site_id: String,
    pub name: String,
}

impl Menu {
    pub fn new(site_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            meta: Meta::default(),
            site_id: site_id.into(),
            name: name.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Site {
    #[serde(flatten)]
    pub meta: Meta,
    pub name: String,
    domain_names: Vec<String>,
}

impl Site {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: Meta::default(),
            name: name.into(),
            domain_names: Vec::new(),
        }
    }

    pub fn domain_names(&self) -> &[String] {
        &self.domain_names
    }

    /// Replace the domain list. Names are trimmed and lower-cased; an invalid or
    /// repeated name rejects the whole list and leaves the current one in place.
    pub fn set_domain_names<I, S>(&mut self, names: I) -> Result<(), ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for raw in names {
            let name = raw.as_ref().trim().to_lowercase();
            if !is_valid_domain_name(&name) {
                return Err(ModelError::InvalidDomainName(raw.as_ref().to_string()));
            }
            if !seen.insert(name.clone()) {
                return Err(ModelError::DuplicateDomainName(name));
            }
            out.push(name);
        }
        self.domain_names = out;
        Ok(())
    }
}

fn domain_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)*[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?::[0-9]{1,5})?$")
            .expect("domain name pattern is valid")
    })
}

fn is_valid_domain_name(name: &str) -> bool {
    !name.is_empty() && name.len() <= 253 && domain_regex().is_match(name)
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(flatten)]
    pub meta: Meta,
    pub site_id: String,
    pub name: String,
    pub content: String,
}

impl Template {
    pub fn new(site_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            meta: Meta::default(),
            site_id: site_id.into(),
            name: name.into(),
            content: String::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(flatten)]
    pub meta: Meta,
    pub site_id: String,
    pub name: String,
    pub content: String,
    pub page_id: String,
    pub template_id: String,
    pub parent_id: String,
    pub sequence: i64,
}

impl Block {
    pub fn new(site_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            meta: Meta::default(),
            site_id: site_id.into(),
            name: name.into(),
            content: String::new(),
            page_id: String::new(),
            template_id: String::new(),
            parent_id: String::new(),
            sequence: 0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    #[serde(flatten)]
    pub meta: Meta,
    pub site_id: String,
    pub key: String,
    /// locale -> text
    pub content: BTreeMap<String, String>,
}

impl Translation {
    pub fn new(site_id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            meta: Meta::default(),
            site_id: site_id.into(),
            key: key.into(),
            content: BTreeMap::new(),
        }
    }
}

entity!(Page);
entity!(Menu);
entity!(Site);
entity!(Template);
entity!(Block);
entity!(Translation);
