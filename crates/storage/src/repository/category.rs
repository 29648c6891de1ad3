use chrono::Utc;
use uuid::Uuid;

use crate::dto::category::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::error::{Result, StorageError};
use crate::models::Category;
use crate::store::{DocumentStore, collections};

use super::{decode, decode_all, read_or_empty, read_or_missing};

pub struct CategoryRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// List all categories, earliest race date first.
    pub async fn list(&self) -> Result<Vec<Category>> {
        let docs = read_or_empty(self.store.list_all(collections::CATEGORIES).await)?;
        let mut categories: Vec<Category> = decode_all(docs)?;
        categories.sort_by_key(|c| c.race_date);
        Ok(categories)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Category> {
        read_or_missing(self.store.get(collections::CATEGORIES, id).await)?
            .map(decode)
            .transpose()?
            .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateCategoryRequest) -> Result<Category> {
        let category = Category {
            id: Uuid::new_v4(),
            category_type: req.category_type.clone(),
            race_date: req.race_date,
            race_end_date: req.race_end_date,
            max_duration_secs: req.max_duration_secs,
            lap_distance_m: req.lap_distance_m,
            created_by: req.created_by.clone(),
            created_at: Utc::now(),
            modified_by: None,
            modified_at: None,
        };
        self.put(&category).await?;
        Ok(category)
    }

    pub async fn update(&self, id: Uuid, req: &UpdateCategoryRequest) -> Result<Category> {
        let mut category = self.find_by_id(id).await?;
        if let Some(category_type) = &req.category_type {
            category.category_type = category_type.clone();
        }
        if let Some(race_date) = req.race_date {
            category.race_date = race_date;
        }
        if let Some(race_end_date) = req.race_end_date {
            category.race_end_date = Some(race_end_date);
        }
        if let Some(max_duration_secs) = req.max_duration_secs {
            category.max_duration_secs = max_duration_secs;
        }
        if let Some(lap_distance_m) = req.lap_distance_m {
            category.lap_distance_m = lap_distance_m;
        }
        category.modified_by = req.modified_by.clone();
        category.modified_at = Some(Utc::now());
        self.put(&category).await?;
        Ok(category)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        self.store.delete(collections::CATEGORIES, id).await
    }

    async fn put(&self, category: &Category) -> Result<()> {
        self.store
            .put(
                collections::CATEGORIES,
                category.id,
                serde_json::to_value(category)?,
            )
            .await
    }
}
