use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::products;

#[derive(Debug, Clone)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub owner_id: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            price: model.price,
            image_url: model.image_url,
            category: model.category,
            owner_id: model.owner_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Fields for a product insert. The slug is assigned by the caller at
/// creation time and is immutable afterwards.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub owner_id: Option<i32>,
}

/// Partial update; `None` fields are left untouched. The slug is never
/// part of a patch.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

impl ProductPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image_url.is_none()
            && self.category.is_none()
    }
}

pub struct ProductRepository {
    conn: DatabaseConnection,
}

impl ProductRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, product: &NewProduct) -> Result<Product> {
        let now = chrono::Utc::now().to_rfc3339();

        let active_model = products::ActiveModel {
            name: Set(product.name.clone()),
            slug: Set(product.slug.clone()),
            description: Set(product.description.clone()),
            price: Set(product.price),
            image_url: Set(product.image_url.clone()),
            category: Set(product.category.clone()),
            owner_id: Set(product.owner_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.conn)
            .await
            .context("Failed to insert product")?;

        Ok(Product::from(model))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>> {
        let product = products::Entity::find()
            .filter(products::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query product by slug")?;

        Ok(product.map(Product::from))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Product>> {
        let product = products::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query product by ID")?;

        Ok(product.map(Product::from))
    }

    /// List all products, newest first
    pub async fn list_all(&self) -> Result<Vec<Product>> {
        let rows = products::Entity::find()
            .order_by_desc(products::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list products")?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Apply a partial update to the product with the given slug.
    /// Returns the updated row, or `None` when no such product exists.
    pub async fn update(&self, slug: &str, patch: &ProductPatch) -> Result<Option<Product>> {
        let Some(existing) = products::Entity::find()
            .filter(products::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query product for update")?
        else {
            return Ok(None);
        };

        let mut active: products::ActiveModel = existing.into();

        if let Some(name) = &patch.name {
            active.name = Set(name.clone());
        }
        if let Some(description) = &patch.description {
            active.description = Set(Some(description.clone()));
        }
        if let Some(price) = patch.price {
            active.price = Set(price);
        }
        if let Some(image_url) = &patch.image_url {
            active.image_url = Set(Some(image_url.clone()));
        }
        if let Some(category) = &patch.category {
            active.category = Set(Some(category.clone()));
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update product")?;

        Ok(Some(Product::from(model)))
    }

    /// Delete the product with the given slug, returning the deleted row so
    /// the caller can clean up its stored image.
    pub async fn delete(&self, slug: &str) -> Result<Option<Product>> {
        let Some(existing) = products::Entity::find()
            .filter(products::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query product for delete")?
        else {
            return Ok(None);
        };

        let product = Product::from(existing.clone());
        existing
            .delete(&self.conn)
            .await
            .context("Failed to delete product")?;

        Ok(Some(product))
    }
}
