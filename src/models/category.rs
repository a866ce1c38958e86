//! Wire representations of category records.
//!
//! The remote API is loose about types: identifiers arrive as JSON numbers
//! or strings, the display name appears as `categoryName` or `name`, and
//! cover images may be absent or broken. All of that is normalised here so
//! the domain model stays strict.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::category::{Category, CategoryDraft, ParentLinks};
use crate::domain::types::{
    CategoryId, CategoryName, CoverImageUrl, ShortDescription, TypeConstraintError,
};

/// Identifier as delivered by the remote API: a JSON number or its string
/// form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FlexId {
    Num(i64),
    Text(String),
}

impl FlexId {
    /// Normalises either encoding into a positive [`CategoryId`].
    pub fn normalize(self) -> Result<CategoryId, TypeConstraintError> {
        match self {
            Self::Num(value) => CategoryId::new(value),
            Self::Text(text) => {
                let value = text.trim().parse::<i64>().map_err(|_| {
                    TypeConstraintError::InvalidValue(format!("category id: {text}"))
                })?;
                CategoryId::new(value)
            }
        }
    }
}

/// Category record as returned by the remote API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCategory {
    pub id: FlexId,
    #[serde(rename = "categoryName", alias = "name")]
    pub category_name: String,
    #[serde(rename = "shortDescription", default)]
    pub short_description: String,
    #[serde(rename = "longDescription", default)]
    pub long_description: Option<String>,
    #[serde(rename = "coverImage", default)]
    pub cover_image: Option<String>,
    #[serde(rename = "isSubCategory", default)]
    pub is_sub_category: bool,
    #[serde(rename = "parentCategoryIds", default)]
    pub parent_category_ids: Option<Vec<FlexId>>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<ApiCategory> for Category {
    type Error = TypeConstraintError;

    fn try_from(record: ApiCategory) -> Result<Self, Self::Error> {
        let parent_ids = record
            .parent_category_ids
            .unwrap_or_default()
            .into_iter()
            .map(FlexId::normalize)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: record.id.normalize()?,
            name: CategoryName::new(record.category_name)?,
            short_description: ShortDescription::new(record.short_description)?,
            long_description: record
                .long_description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            // A broken cover image URL degrades to the placeholder.
            cover_image: record
                .cover_image
                .and_then(|url| CoverImageUrl::new(url).ok()),
            parents: ParentLinks::new(record.is_sub_category, parent_ids)?,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Outbound body for `POST /category/createUpdateCategory`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiCategoryPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "categoryName")]
    pub category_name: String,
    #[serde(rename = "shortDescription")]
    pub short_description: String,
    #[serde(rename = "longDescription", skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(rename = "coverImage", skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(rename = "isSubCategory")]
    pub is_sub_category: bool,
    #[serde(rename = "parentCategoryIds")]
    pub parent_category_ids: Vec<i64>,
}

impl From<CategoryDraft> for ApiCategoryPayload {
    fn from(draft: CategoryDraft) -> Self {
        let is_sub_category = draft.parents.is_sub();
        let parent_category_ids = draft
            .parents
            .parent_ids()
            .iter()
            .map(|id| id.get())
            .collect();
        Self {
            id: draft.id.map(CategoryId::get),
            category_name: draft.name.into_inner(),
            short_description: draft.short_description.into_inner(),
            long_description: draft.long_description,
            cover_image: draft.cover_image.map(CoverImageUrl::into_inner),
            is_sub_category,
            parent_category_ids,
        }
    }
}

/// Outbound body for `DELETE /category/softDeleteOrDetach`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiDeleteCategory {
    #[serde(rename = "categoryId")]
    pub category_id: i64,
    #[serde(rename = "parentCategoryId", skip_serializing_if = "Option::is_none")]
    pub parent_category_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_numeric_and_string_ids() {
        assert_eq!(FlexId::Num(4).normalize().unwrap().get(), 4);
        assert_eq!(
            FlexId::Text(" 17 ".to_string()).normalize().unwrap().get(),
            17
        );
        assert!(FlexId::Text("banana".to_string()).normalize().is_err());
    }

    #[test]
    fn accepts_both_name_spellings() {
        let long: ApiCategory = serde_json::from_str(
            r#"{"id":1,"categoryName":"Produce","shortDescription":"Fruit and veg"}"#,
        )
        .unwrap();
        let short: ApiCategory = serde_json::from_str(
            r#"{"id":"1","name":"Produce","shortDescription":"Fruit and veg"}"#,
        )
        .unwrap();

        let long: Category = long.try_into().unwrap();
        let short: Category = short.try_into().unwrap();
        assert_eq!(long.name, short.name);
        assert_eq!(long.id, short.id);
    }

    #[test]
    fn sub_category_records_carry_their_parents() {
        let record: ApiCategory = serde_json::from_str(
            r#"{"id":2,"name":"Citrus","shortDescription":"Oranges and lemons",
                "isSubCategory":true,"parentCategoryIds":[1,"3"]}"#,
        )
        .unwrap();

        let category: Category = record.try_into().unwrap();
        assert!(category.is_sub());
        let ids: Vec<i64> = category.parents.parent_ids().iter().map(|p| p.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn broken_cover_image_degrades_to_none() {
        let record: ApiCategory = serde_json::from_str(
            r#"{"id":1,"name":"Produce","shortDescription":"Fruit","coverImage":"///nope"}"#,
        )
        .unwrap();

        let category: Category = record.try_into().unwrap();
        assert!(category.cover_image.is_none());
    }

    #[test]
    fn create_payload_omits_the_id() {
        let draft = CategoryDraft {
            id: None,
            name: CategoryName::new("Produce").unwrap(),
            short_description: ShortDescription::new("Fruit and veg").unwrap(),
            long_description: None,
            cover_image: None,
            parents: ParentLinks::Root,
        };

        let body = serde_json::to_value(ApiCategoryPayload::from(draft)).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["isSubCategory"], false);
        assert_eq!(body["parentCategoryIds"], serde_json::json!([]));
    }
}
