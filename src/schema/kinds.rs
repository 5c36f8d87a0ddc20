//! Resource kinds exposed by the API and their static schemas.

use super::{FieldRule, FieldSchema};
use std::fmt;

const BUSINESS_FIELDS: &[(&str, FieldRule)] = &[
    ("ownerid", FieldRule::REQUIRED),
    ("name", FieldRule::REQUIRED),
    ("address", FieldRule::REQUIRED),
    ("city", FieldRule::REQUIRED),
    ("state", FieldRule::REQUIRED),
    ("zip", FieldRule::REQUIRED),
    ("phone", FieldRule::REQUIRED),
    ("category", FieldRule::REQUIRED),
    ("subcategory", FieldRule::REQUIRED),
    ("website", FieldRule::OPTIONAL),
    ("email", FieldRule::OPTIONAL),
];

const REVIEW_FIELDS: &[(&str, FieldRule)] = &[
    ("userid", FieldRule::REQUIRED),
    ("businessid", FieldRule::REQUIRED),
    ("dollars", FieldRule::REQUIRED),
    ("stars", FieldRule::REQUIRED),
    ("review", FieldRule::OPTIONAL),
];

const PHOTO_FIELDS: &[(&str, FieldRule)] = &[
    ("userid", FieldRule::REQUIRED),
    ("businessid", FieldRule::REQUIRED),
    ("caption", FieldRule::OPTIONAL),
];

pub const BUSINESS_SCHEMA: FieldSchema = FieldSchema::new(BUSINESS_FIELDS);
pub const REVIEW_SCHEMA: FieldSchema = FieldSchema::new(REVIEW_FIELDS);
pub const PHOTO_SCHEMA: FieldSchema = FieldSchema::new(PHOTO_FIELDS);

/// Field on child resources that points at the owning business.
pub const PARENT_BUSINESS_FIELD: &str = "businessid";

/// Owner-identifying fields of reviews and photos. Fixed for the lifetime of a record.
const CHILD_OWNER_FIELDS: &[&str] = &["businessid", "userid"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Business,
    Review,
    Photo,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Business, ResourceKind::Review, ResourceKind::Photo];

    /// Resolve a URL path segment (`businesses`, `reviews`, `photos`).
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.path_segment() == segment)
    }

    /// Path segment; also the backing table name.
    pub fn path_segment(self) -> &'static str {
        match self {
            ResourceKind::Business => "businesses",
            ResourceKind::Review => "reviews",
            ResourceKind::Photo => "photos",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            ResourceKind::Business => "business",
            ResourceKind::Review => "review",
            ResourceKind::Photo => "photo",
        }
    }

    pub fn schema(self) -> &'static FieldSchema {
        match self {
            ResourceKind::Business => &BUSINESS_SCHEMA,
            ResourceKind::Review => &REVIEW_SCHEMA,
            ResourceKind::Photo => &PHOTO_SCHEMA,
        }
    }

    /// Fields that may not change when a record is replaced.
    pub fn owner_fields(self) -> &'static [&'static str] {
        match self {
            ResourceKind::Business => &[],
            ResourceKind::Review | ResourceKind::Photo => CHILD_OWNER_FIELDS,
        }
    }

    /// Whether records of this kind belong to a business through `businessid`.
    pub fn has_parent_business(self) -> bool {
        self.schema().contains(PARENT_BUSINESS_FIELD)
    }

    /// Location of a single record of this kind.
    pub fn link(self, id: i64) -> String {
        format!("/{}/{}", self.path_segment(), id)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}
