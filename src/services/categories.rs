use crate::domain::auth::AuthenticatedUser;
use crate::domain::category::Category;
use crate::domain::hierarchy::{build_forest, filter_categories};
use crate::domain::types::CategoryId;
use crate::dto::categories::{CategoryDto, CategoryGroupDto};
use crate::forms::categories::{DeleteCategoryFormPayload, SaveCategoryFormPayload};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::viewstate::{CategoryStore, ExpandedNodes};

use super::{ServiceError, ServiceResult};

/// Render-ready dashboard page.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoriesPage {
    pub groups: Vec<CategoryGroupDto>,
    pub search: Option<String>,
    /// Number of records in the loaded collection.
    pub total: usize,
    /// Number of records surviving the search filter.
    pub matched: usize,
}

/// Replaces the store contents with a fresh full fetch.
async fn reload<R>(
    user: &AuthenticatedUser,
    repo: &R,
    store: &CategoryStore,
) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    store.begin_load();
    match repo.list_categories(&user.token).await {
        Ok(categories) => {
            store.finish_load(Ok(categories.clone()));
            Ok(categories)
        }
        Err(e) => {
            log::error!("Failed to load categories: {e}");
            let error = ServiceError::from(e);
            store.finish_load(Err(error.to_string()));
            Err(error)
        }
    }
}

/// Read-through rendering of the dashboard: serves the cached collection
/// when one is loaded, fetches otherwise, then derives the filtered and
/// grouped views. Expanded ids vanished from the collection are pruned.
pub async fn show_categories<R>(
    user: &AuthenticatedUser,
    search: Option<&str>,
    refresh: bool,
    expanded: &mut ExpandedNodes,
    repo: &R,
    store: &CategoryStore,
) -> ServiceResult<CategoriesPage>
where
    R: CategoryReader,
{
    let categories = match store.loaded() {
        Some(cached) if !refresh => cached,
        _ => reload(user, repo, store).await?,
    };

    expanded.prune(&categories);

    let term = search.unwrap_or("").trim();
    let visible = filter_categories(&categories, term);
    let forest = build_forest(&visible);
    let groups = forest
        .groups()
        .iter()
        .cloned()
        .map(|group| CategoryGroupDto::from_group(group, expanded))
        .collect();

    Ok(CategoriesPage {
        groups,
        search: (!term.is_empty()).then(|| term.to_string()),
        total: categories.len(),
        matched: visible.len(),
    })
}

/// Creates or updates a category, then reloads the full collection.
pub async fn save_category<R>(
    payload: SaveCategoryFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
    store: &CategoryStore,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    store.begin_submit();
    let draft = payload.into_draft();
    match repo.create_update_category(&user.token, &draft).await {
        Ok(_) => {
            reload(user, repo, store).await?;
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to save category: {e}");
            store.rollback_submit();
            Err(e.into())
        }
    }
}

/// Deletes a category, or detaches it from one parent, then reloads. On
/// failure the cached collection is left untouched.
pub async fn delete_category<R>(
    payload: DeleteCategoryFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
    store: &CategoryStore,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    store.begin_submit();
    match repo
        .delete_category(&user.token, payload.category_id, payload.parent_id)
        .await
    {
        Ok(()) => {
            reload(user, repo, store).await?;
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            store.rollback_submit();
            Err(e.into())
        }
    }
}

/// Parent-variant categories, for the save form's parent selector.
pub async fn parent_options<R>(
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    match repo.list_parent_categories(&user.token).await {
        Ok(parents) => Ok(parents.into_iter().map(CategoryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list parent categories: {e}");
            Err(e.into())
        }
    }
}

/// Sub-categories of one parent, for lazy row expansion.
pub async fn sub_categories_of<R>(
    parent_id: CategoryId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    match repo.list_sub_categories(&user.token, parent_id).await {
        Ok(subs) => Ok(subs.into_iter().map(CategoryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list sub-categories: {e}");
            Err(e.into())
        }
    }
}
