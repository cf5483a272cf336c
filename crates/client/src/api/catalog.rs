//! Catalog operations: categories, products, and reviews.
//!
//! Read endpoints are cached for 5 minutes. Search results and reviews are
//! not cached; posting a review invalidates the product's cache entry so the
//! updated rating is visible on the next fetch.

use serde::Serialize;
use tracing::instrument;

use constructo_core::{Price, ProductId};

use super::{ApiClient, ApiError, types::{Category, Product, Review}};

/// Cached catalog responses, one variant per endpoint shape.
#[derive(Clone)]
pub(crate) enum CacheValue {
    Categories(Vec<Category>),
    Products(Vec<Product>),
    Product(Box<Product>),
}

/// Filters for the product listing endpoint.
///
/// All fields are optional; an empty query lists the full catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<ProductSort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Server-side product orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    Price,
    Rating,
    CreatedAt,
    Name,
}

#[derive(Serialize)]
struct ReviewRequest<'a> {
    product_id: &'a ProductId,
    rating: u8,
    comment: &'a str,
}

impl ApiClient {
    /// List all categories.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        let cache_key = "categories".to_string();
        if let Some(CacheValue::Categories(cached)) =
            self.inner.catalog_cache.get(&cache_key).await
        {
            tracing::debug!("Cache hit for categories");
            return Ok(cached);
        }

        let categories: Vec<Category> = self.get("/categories").await?;
        self.inner
            .catalog_cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;
        Ok(categories)
    }

    /// List products matching the given filters.
    ///
    /// Search queries bypass the cache; filtered listings are cached per
    /// filter combination.
    #[instrument(skip(self))]
    pub async fn get_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        if query.search.is_some() {
            return self.get_with_query("/products", query).await;
        }

        let cache_key = format!("products:{query:?}");
        if let Some(CacheValue::Products(cached)) = self.inner.catalog_cache.get(&cache_key).await
        {
            tracing::debug!("Cache hit for product listing");
            return Ok(cached);
        }

        let products: Vec<Product> = self.get_with_query("/products", query).await?;
        self.inner
            .catalog_cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// List the featured products shown on the home screen.
    #[instrument(skip(self))]
    pub async fn get_featured_products(&self) -> Result<Vec<Product>, ApiError> {
        let cache_key = "products:featured".to_string();
        if let Some(CacheValue::Products(cached)) = self.inner.catalog_cache.get(&cache_key).await
        {
            tracing::debug!("Cache hit for featured products");
            return Ok(cached);
        }

        let products: Vec<Product> = self.get("/products/featured").await?;
        self.inner
            .catalog_cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown id.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let cache_key = format!("product:{id}");
        if let Some(CacheValue::Product(cached)) = self.inner.catalog_cache.get(&cache_key).await
        {
            tracing::debug!(product_id = %id, "Cache hit for product");
            return Ok(*cached);
        }

        let product: Product = self.get(&format!("/products/{id}")).await?;
        self.inner
            .catalog_cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// List reviews for a product, newest first.
    #[instrument(skip(self))]
    pub async fn get_product_reviews(&self, id: &ProductId) -> Result<Vec<Review>, ApiError> {
        self.get(&format!("/products/{id}/reviews")).await
    }

    /// Post a review for a product (requires a session).
    ///
    /// Invalidates the product's cache entry so its rating refreshes.
    #[instrument(skip(self, comment))]
    pub async fn create_review(
        &self,
        product_id: &ProductId,
        rating: u8,
        comment: &str,
    ) -> Result<Review, ApiError> {
        let review: Review = self
            .post(
                "/reviews",
                &ReviewRequest {
                    product_id,
                    rating,
                    comment,
                },
            )
            .await?;

        self.inner
            .catalog_cache
            .invalidate(&format!("product:{product_id}"))
            .await;
        Ok(review)
    }

    /// Drop all cached catalog responses.
    pub fn invalidate_catalog_cache(&self) {
        self.inner.catalog_cache.invalidate_all();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_query_serializes_only_set_fields() {
        let query = ProductQuery {
            category: Some("cement".to_string()),
            sort_by: Some(ProductSort::Price),
            ..ProductQuery::default()
        };

        let encoded = serde_urlencoded::to_string(&query).unwrap();
        assert_eq!(encoded, "category=cement&sort_by=price");
    }

    #[test]
    fn test_empty_query_serializes_to_nothing() {
        let encoded = serde_urlencoded::to_string(ProductQuery::default()).unwrap();
        assert!(encoded.is_empty());
    }
}
