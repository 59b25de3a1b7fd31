//! Product Repository

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Product, ProductCategory, ProductCreate, ProductUpdate};

const TABLE: &str = "product";

/// Catalog list filters
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<ProductCategory>,
    pub available: Option<bool>,
    pub search: Option<String>,
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find products matching the filter, ordered by category then name
    pub async fn find_all(&self, filter: ProductFilter) -> RepoResult<Vec<Product>> {
        let search = filter.search.map(|s| s.to_lowercase());
        let products: Vec<Product> = self
            .base
            .db()
            .query(
                "SELECT * FROM product \
                 WHERE ($category IS NONE OR category = $category) \
                 AND ($available IS NONE OR available = $available) \
                 AND ($search IS NONE \
                     OR string::contains(string::lowercase(name), $search) \
                     OR string::contains(string::lowercase(description), $search)) \
                 ORDER BY category, name",
            )
            .bind(("category", filter.category))
            .bind(("available", filter.available))
            .bind(("search", search))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find available products in a category, ordered by name
    pub async fn find_by_category(&self, category: ProductCategory) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query(
                "SELECT * FROM product \
                 WHERE category = $category AND available = true \
                 ORDER BY name",
            )
            .bind(("category", category))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let record_id = parse_record_id(TABLE, id);
        let product: Option<Product> = self.base.db().select(record_id).await?;
        Ok(product)
    }

    /// Find all products referenced by the given ids (catalog snapshot for pricing)
    pub async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Product>> {
        let record_ids: Vec<surrealdb::RecordId> =
            ids.iter().map(|id| parse_record_id(TABLE, id)).collect();
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE id IN $ids")
            .bind(("ids", record_ids))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            image: data.image,
            available: data.available.unwrap_or(true),
            preparation_time: data.preparation_time.unwrap_or(15),
            created_at: now,
            updated_at: now,
        };

        let created: Option<Product> = self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let mut product = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {}", id)))?;

        if let Some(name) = data.name {
            product.name = name;
        }
        if let Some(description) = data.description {
            product.description = description;
        }
        if let Some(price) = data.price {
            product.price = price;
        }
        if let Some(category) = data.category {
            product.category = category;
        }
        if let Some(image) = data.image {
            product.image = image;
        }
        if let Some(available) = data.available {
            product.available = available;
        }
        if let Some(preparation_time) = data.preparation_time {
            product.preparation_time = preparation_time;
        }
        product.updated_at = Utc::now();
        // The update target carries the id
        product.id = None;

        let record_id = parse_record_id(TABLE, id);
        let updated: Option<Product> = self
            .base
            .db()
            .update(record_id)
            .content(product)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product {}", id)))
    }

    /// Hard delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let record_id = parse_record_id(TABLE, id);
        let deleted: Option<Product> = self.base.db().delete(record_id).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Product {}", id)));
        }
        Ok(true)
    }
}
