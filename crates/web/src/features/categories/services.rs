use storage::{
    dto::category::{CreateCategoryRequest, UpdateCategoryRequest},
    error::Result,
    models::Category,
    repository::CategoryRepository,
    store::DocumentStore,
};
use uuid::Uuid;

/// List all categories, earliest race date first
pub async fn list_categories(store: &dyn DocumentStore) -> Result<Vec<Category>> {
    CategoryRepository::new(store).list().await
}

/// Get one category by id
pub async fn get_category(store: &dyn DocumentStore, id: Uuid) -> Result<Category> {
    CategoryRepository::new(store).find_by_id(id).await
}

/// Create a new race category
pub async fn create_category(
    store: &dyn DocumentStore,
    req: &CreateCategoryRequest,
) -> Result<Category> {
    CategoryRepository::new(store).create(req).await
}

/// Apply a partial update to a category
pub async fn update_category(
    store: &dyn DocumentStore,
    id: Uuid,
    req: &UpdateCategoryRequest,
) -> Result<Category> {
    CategoryRepository::new(store).update(id, req).await
}

/// Delete a category; returns whether it existed
pub async fn delete_category(store: &dyn DocumentStore, id: Uuid) -> Result<bool> {
    CategoryRepository::new(store).delete(id).await
}
