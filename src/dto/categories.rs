use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::DEFAULT_COVER_IMAGE;
use crate::domain::category::Category;
use crate::domain::hierarchy::CategoryGroup;
use crate::viewstate::ExpandedNodes;

fn display_timestamp(value: Option<DateTime<Utc>>) -> Option<String> {
    value.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
}

/// Render-ready category row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    pub short_description: String,
    pub long_description: Option<String>,
    pub cover_image: String,
    pub is_sub_category: bool,
    pub parent_ids: Vec<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        let is_sub_category = value.is_sub();
        let parent_ids = value.parents.parent_ids().iter().map(|p| p.get()).collect();
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            short_description: value.short_description.into_inner(),
            long_description: value.long_description,
            cover_image: value
                .cover_image
                .map(|url| url.into_inner())
                .unwrap_or_else(|| DEFAULT_COVER_IMAGE.to_string()),
            is_sub_category,
            parent_ids,
            created_at: display_timestamp(value.created_at),
            updated_at: display_timestamp(value.updated_at),
        }
    }
}

/// One parent row with its sub-category rows and expansion flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroupDto {
    pub parent: CategoryDto,
    pub children: Vec<CategoryDto>,
    pub expanded: bool,
}

impl CategoryGroupDto {
    pub fn from_group(group: CategoryGroup, expanded: &ExpandedNodes) -> Self {
        let is_expanded = expanded.contains(group.parent.id);
        Self {
            parent: group.parent.into(),
            children: group.children.into_iter().map(Into::into).collect(),
            expanded: is_expanded,
        }
    }
}
