//! Response bodies: page listings with navigation links, and link sets for writes.

use crate::schema::{Record, ResourceKind, PARENT_BUSINESS_FIELD};
use crate::service::Page;
use serde::Serialize;
use std::collections::BTreeMap;

pub type Links = BTreeMap<&'static str, String>;

#[derive(Serialize)]
pub struct PageBody {
    #[serde(flatten)]
    pub page: Page,
    pub links: Links,
}

#[derive(Serialize)]
pub struct CreatedBody {
    pub id: i64,
    pub links: Links,
}

#[derive(Serialize)]
pub struct LinksBody {
    pub links: Links,
}

/// `self`, plus `first`/`prev` and `next`/`last` when those pages exist.
pub fn page_links(kind: ResourceKind, page: &Page) -> Links {
    let href = |n: u64| format!("/{}?page={}", kind.path_segment(), n);
    let mut links = Links::new();
    links.insert("self", href(page.page));
    if page.page < page.total_pages {
        links.insert("next", href(page.page + 1));
        links.insert("last", href(page.total_pages));
    }
    if page.page > 1 {
        links.insert("prev", href(page.page - 1));
        links.insert("first", href(1));
    }
    links
}

/// Link to the record itself and, for reviews and photos, to the business it belongs to.
pub fn record_links(kind: ResourceKind, id: i64, record: &Record) -> Links {
    let mut links = Links::new();
    links.insert(kind.singular(), kind.link(id));
    if kind.has_parent_business() {
        if let Some(business) = record.get(PARENT_BUSINESS_FIELD).filter(|v| !v.is_null()) {
            let business = match business {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            links.insert(
                ResourceKind::Business.singular(),
                format!("/{}/{}", ResourceKind::Business.path_segment(), business),
            );
        }
    }
    links
}
