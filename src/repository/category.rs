use async_trait::async_trait;

use crate::domain::category::{Category, CategoryDraft};
use crate::domain::types::{AuthToken, CategoryId};
use crate::models::category::{ApiCategory, ApiCategoryPayload, ApiDeleteCategory};
use crate::models::envelope::ApiEnvelope;
use crate::repository::{
    CategoryReader, CategoryWriter, RepositoryResult, RestRepository,
};

impl RestRepository {
    async fn fetch_categories(
        &self,
        token: &AuthToken,
        path: &str,
    ) -> RepositoryResult<Vec<Category>> {
        let response = self
            .client()
            .get(self.endpoint(path))
            .bearer_auth(token.as_str())
            .send()
            .await?;

        let envelope: ApiEnvelope<Vec<ApiCategory>> = Self::read_envelope(response).await?;
        envelope
            .into_data()?
            .into_iter()
            .map(|record| Category::try_from(record).map_err(Into::into))
            .collect()
    }
}

#[async_trait]
impl CategoryReader for RestRepository {
    async fn list_categories(&self, token: &AuthToken) -> RepositoryResult<Vec<Category>> {
        self.fetch_categories(token, "/category/getAll").await
    }

    async fn list_parent_categories(&self, token: &AuthToken) -> RepositoryResult<Vec<Category>> {
        self.fetch_categories(token, "/category/getOnlyParentCategories")
            .await
    }

    async fn list_sub_categories(
        &self,
        token: &AuthToken,
        parent_id: CategoryId,
    ) -> RepositoryResult<Vec<Category>> {
        self.fetch_categories(
            token,
            &format!("/category/getSubCategories/{}", parent_id.get()),
        )
        .await
    }
}

#[async_trait]
impl CategoryWriter for RestRepository {
    async fn create_update_category(
        &self,
        token: &AuthToken,
        draft: &CategoryDraft,
    ) -> RepositoryResult<Category> {
        let body = ApiCategoryPayload::from(draft.clone());
        let response = self
            .client()
            .post(self.endpoint("/category/createUpdateCategory"))
            .bearer_auth(token.as_str())
            .json(&body)
            .send()
            .await?;

        let envelope: ApiEnvelope<ApiCategory> = Self::read_envelope(response).await?;
        Ok(envelope.into_data()?.try_into()?)
    }

    async fn delete_category(
        &self,
        token: &AuthToken,
        id: CategoryId,
        parent_id: Option<CategoryId>,
    ) -> RepositoryResult<()> {
        let body = ApiDeleteCategory {
            category_id: id.get(),
            parent_category_id: parent_id.map(CategoryId::get),
        };
        let response = self
            .client()
            .delete(self.endpoint("/category/softDeleteOrDetach"))
            .bearer_auth(token.as_str())
            .json(&body)
            .send()
            .await?;

        let envelope: ApiEnvelope<serde_json::Value> = Self::read_envelope(response).await?;
        Ok(envelope.into_ack()?)
    }
}
