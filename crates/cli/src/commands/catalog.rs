//! Catalog browsing commands.

use clap::{Args, ValueEnum};
use rust_decimal::Decimal;

use constructo_client::api::{ProductQuery, ProductSort};
use constructo_client::{ApiClient, ApiError};
use constructo_core::Price;

#[derive(Args)]
pub struct ProductsArgs {
    /// Filter by category id
    #[arg(short, long)]
    pub category: Option<String>,

    /// Full-text search over name, description, and brand
    #[arg(short, long)]
    pub search: Option<String>,

    /// Minimum price in rupees
    #[arg(long)]
    pub min_price: Option<Decimal>,

    /// Maximum price in rupees
    #[arg(long)]
    pub max_price: Option<Decimal>,

    /// Sort order
    #[arg(long, value_enum)]
    pub sort_by: Option<SortArg>,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<u32>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortArg {
    Price,
    Rating,
    Newest,
    Name,
}

impl From<SortArg> for ProductSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Price => Self::Price,
            SortArg::Rating => Self::Rating,
            SortArg::Newest => Self::CreatedAt,
            SortArg::Name => Self::Name,
        }
    }
}

#[derive(Args)]
pub struct ReviewArgs {
    /// Product id
    pub product_id: String,

    /// Rating, 1 to 5
    #[arg(short, long)]
    pub rating: u8,

    /// Review text
    #[arg(short, long)]
    pub comment: String,
}

pub async fn categories(api: &ApiClient) -> Result<(), ApiError> {
    for category in api.get_categories().await? {
        match &category.description {
            Some(description) => println!("{}  {} - {description}", category.id, category.name),
            None => println!("{}  {}", category.id, category.name),
        }
    }
    Ok(())
}

pub async fn products(api: &ApiClient, args: &ProductsArgs) -> Result<(), ApiError> {
    let query = ProductQuery {
        category: args.category.clone(),
        search: args.search.clone(),
        min_price: args.min_price.map(Price::new),
        max_price: args.max_price.map(Price::new),
        sort_by: args.sort_by.map(ProductSort::from),
        limit: args.limit,
    };

    for product in api.get_products(&query).await? {
        println!(
            "{}  {}  {}  ({:.1}\u{2605}, {} reviews)",
            product.id, product.name, product.price, product.rating, product.review_count
        );
    }
    Ok(())
}

pub async fn product(api: &ApiClient, id: &str) -> Result<(), ApiError> {
    let product = api.get_product(&id.into()).await?;

    println!("{}  [{}]", product.name, product.sku);
    match product.original_price {
        Some(original) => println!("{}  (was {original})", product.price),
        None => println!("{}", product.price),
    }
    if let Some(brand) = &product.brand {
        println!("brand: {brand}");
    }
    println!("stock: {}", product.stock);
    println!("{}", product.description);

    let reviews = api.get_product_reviews(&product.id).await?;
    if !reviews.is_empty() {
        println!("\nReviews:");
        for review in reviews {
            println!("  {}\u{2605}  {} - {}", review.rating, review.user_name, review.comment);
        }
    }
    Ok(())
}

pub async fn review(api: &ApiClient, args: &ReviewArgs) -> Result<(), ApiError> {
    let review = api
        .create_review(&args.product_id.as_str().into(), args.rating, &args.comment)
        .await?;
    println!("Review {} posted", review.id);
    Ok(())
}
