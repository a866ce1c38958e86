use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{CategoryDraft, ParentLinks};
use crate::domain::types::{
    CategoryId, CategoryName, CoverImageUrl, ShortDescription, TypeConstraintError,
};

/// Parses the hidden `parent_ids` field: a comma- or space-separated list
/// of identifiers assembled by the multi-select widget.
fn parse_parent_ids(raw: Option<&str>) -> Result<Vec<CategoryId>, TypeConstraintError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split([',', ' '])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| TypeConstraintError::InvalidValue(format!("parent id: {s}")))
                .and_then(CategoryId::new)
        })
        .collect()
}

#[derive(Deserialize, Validate)]
pub struct SaveCategoryForm {
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "super::empty_string_as_none")]
    pub id: Option<i64>,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub short_description: String,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub is_sub_category: bool,
    #[serde(default)]
    pub parent_ids: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveCategoryFormPayload {
    pub id: Option<CategoryId>,
    pub name: CategoryName,
    pub short_description: ShortDescription,
    pub long_description: Option<String>,
    pub cover_image: Option<CoverImageUrl>,
    pub parents: ParentLinks,
}

impl SaveCategoryFormPayload {
    pub fn into_draft(self) -> CategoryDraft {
        CategoryDraft {
            id: self.id,
            name: self.name,
            short_description: self.short_description,
            long_description: self.long_description,
            cover_image: self.cover_image,
            parents: self.parents,
        }
    }
}

#[derive(Debug, Error)]
pub enum SaveCategoryFormError {
    #[error("Save category form validation failed: {0}")]
    Validation(String),
    #[error("Save category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for SaveCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for SaveCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<SaveCategoryForm> for SaveCategoryFormPayload {
    type Error = SaveCategoryFormError;

    fn try_from(value: SaveCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let parent_ids = parse_parent_ids(value.parent_ids.as_deref())?;
        let cover_image = value
            .cover_image
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(CoverImageUrl::new)
            .transpose()?;

        Ok(Self {
            id: value.id.map(CategoryId::new).transpose()?,
            name: CategoryName::new(value.name)?,
            short_description: ShortDescription::new(value.short_description)?,
            long_description: value
                .long_description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            cover_image,
            parents: ParentLinks::new(value.is_sub_category, parent_ids)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct DeleteCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i64,
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "super::empty_string_as_none")]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCategoryFormPayload {
    pub category_id: CategoryId,
    pub parent_id: Option<CategoryId>,
}

#[derive(Debug, Error)]
pub enum DeleteCategoryFormError {
    #[error("Delete category form validation failed: {0}")]
    Validation(String),
    #[error("Delete category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for DeleteCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for DeleteCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<DeleteCategoryForm> for DeleteCategoryFormPayload {
    type Error = DeleteCategoryFormError;

    fn try_from(value: DeleteCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
            parent_id: value.parent_id.map(CategoryId::new).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> SaveCategoryForm {
        SaveCategoryForm {
            id: None,
            name: "Citrus".to_string(),
            short_description: "Oranges and lemons".to_string(),
            long_description: None,
            cover_image: None,
            is_sub_category: false,
            parent_ids: None,
        }
    }

    #[test]
    fn sub_category_without_parents_is_rejected() {
        let form = SaveCategoryForm {
            is_sub_category: true,
            ..base_form()
        };

        let payload: Result<SaveCategoryFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }

    #[test]
    fn parent_category_forces_links_empty() {
        let form = SaveCategoryForm {
            parent_ids: Some("3,4".to_string()),
            ..base_form()
        };

        let payload: SaveCategoryFormPayload = form.try_into().unwrap();
        assert_eq!(payload.parents, ParentLinks::Root);
    }

    #[test]
    fn parses_and_deduplicates_parent_ids() {
        let form = SaveCategoryForm {
            is_sub_category: true,
            parent_ids: Some(" 3, 4 3 ".to_string()),
            ..base_form()
        };

        let payload: SaveCategoryFormPayload = form.try_into().unwrap();
        let ids: Vec<i64> = payload.parents.parent_ids().iter().map(|p| p.get()).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn overlong_short_description_blocks_submission() {
        let form = SaveCategoryForm {
            short_description: "x".repeat(101),
            ..base_form()
        };

        let payload: Result<SaveCategoryFormPayload, _> = form.try_into();
        assert!(matches!(payload, Err(SaveCategoryFormError::Validation(_))));
    }

    #[test]
    fn blank_cover_image_is_dropped_but_invalid_is_rejected() {
        let blank = SaveCategoryForm {
            cover_image: Some("  ".to_string()),
            ..base_form()
        };
        let payload: SaveCategoryFormPayload = blank.try_into().unwrap();
        assert!(payload.cover_image.is_none());

        let broken = SaveCategoryForm {
            cover_image: Some("not a url".to_string()),
            ..base_form()
        };
        let payload: Result<SaveCategoryFormPayload, _> = broken.try_into();
        assert!(payload.is_err());
    }

    #[test]
    fn delete_form_accepts_an_optional_parent() {
        let form = DeleteCategoryForm {
            category_id: 2,
            parent_id: Some(1),
        };
        let payload: DeleteCategoryFormPayload = form.try_into().unwrap();
        assert_eq!(payload.category_id.get(), 2);
        assert_eq!(payload.parent_id.unwrap().get(), 1);
    }
}
