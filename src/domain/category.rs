use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, CategoryName, CoverImageUrl, ShortDescription, TypeConstraintError,
};

/// Parent links of a category.
///
/// A category is exactly one of two variants: a top-level `Root` grouping
/// node, or a `Sub` leaf attached to one or more parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParentLinks {
    Root,
    Sub(Vec<CategoryId>),
}

impl ParentLinks {
    /// Builds the variant from the wire flag and the referenced parent ids.
    ///
    /// A sub-category must reference at least one parent. A root category
    /// carries no links regardless of what the input listed. Duplicate
    /// references collapse, keeping first-seen order.
    pub fn new(
        is_sub_category: bool,
        parent_ids: Vec<CategoryId>,
    ) -> Result<Self, TypeConstraintError> {
        if !is_sub_category {
            return Ok(Self::Root);
        }
        let mut distinct: Vec<CategoryId> = Vec::with_capacity(parent_ids.len());
        for id in parent_ids {
            if !distinct.contains(&id) {
                distinct.push(id);
            }
        }
        if distinct.is_empty() {
            return Err(TypeConstraintError::InvalidValue(
                "a sub-category requires at least one parent".to_string(),
            ));
        }
        Ok(Self::Sub(distinct))
    }

    pub fn is_sub(&self) -> bool {
        matches!(self, Self::Sub(_))
    }

    /// Referenced parent ids; empty for root categories.
    pub fn parent_ids(&self) -> &[CategoryId] {
        match self {
            Self::Root => &[],
            Self::Sub(ids) => ids,
        }
    }
}

/// Canonical category record as held by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub short_description: ShortDescription,
    pub long_description: Option<String>,
    pub cover_image: Option<CoverImageUrl>,
    pub parents: ParentLinks,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn is_sub(&self) -> bool {
        self.parents.is_sub()
    }
}

/// Outbound create/update payload. `id` is absent when creating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub id: Option<CategoryId>,
    pub name: CategoryName,
    pub short_description: ShortDescription,
    pub long_description: Option<String>,
    pub cover_image: Option<CoverImageUrl>,
    pub parents: ParentLinks,
}
