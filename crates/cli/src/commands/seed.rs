//! Seed the catalog with sample data for local development.

use sqlx::PgPool;
use tracing::info;

const CATEGORIES: &[(&str, &str, &str)] = &[
    ("Sweets", "#6c95d1", "https://img.example.com/categories/sweets.png"),
    ("Flowers", "#f08080", "https://img.example.com/categories/flowers.png"),
    ("Coffee", "#8b5a2b", "https://img.example.com/categories/coffee.png"),
];

/// Products per category: name, price, image, and the initial option's
/// name and quantity.
const PRODUCTS: &[(&str, i64, &str, &str, i64)] = &[
    ("Chocolate Gift Box", 25_000, "https://img.example.com/products/choco.png", "12 pieces", 120),
    ("Rose Bouquet", 42_000, "https://img.example.com/products/roses.png", "Dozen", 35),
    ("Drip Coffee Set", 18_000, "https://img.example.com/products/drip.png", "10 sachets", 200),
];

/// Seed sample categories, each with one product and its initial option.
///
/// Idempotence is not attempted; re-running inserts another copy.
///
/// # Errors
///
/// Returns an error if `GIFTWISE_DATABASE_URL` is unset or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    for (index, (name, color, image_url)) in CATEGORIES.iter().enumerate() {
        let category_id = insert_category(&pool, name, color, image_url).await?;
        let (product_name, price, product_image, option_name, quantity) = PRODUCTS[index];

        let product_id =
            insert_product(&pool, product_name, price, product_image, category_id).await?;
        insert_option(&pool, product_id, option_name, quantity).await?;

        info!(category = name, product = product_name, "seeded");
    }

    info!("Seeding complete");
    Ok(())
}

async fn insert_category(
    pool: &PgPool,
    name: &str,
    color: &str,
    image_url: &str,
) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO category (name, color, image_url) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(color)
    .bind(image_url)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn insert_product(
    pool: &PgPool,
    name: &str,
    price: i64,
    image_url: &str,
    category_id: i64,
) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO product (name, price, image_url, category_id) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(name)
    .bind(price)
    .bind(image_url)
    .bind(category_id)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn insert_option(
    pool: &PgPool,
    product_id: i64,
    name: &str,
    quantity: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO product_option (name, quantity, product_id) VALUES ($1, $2, $3)")
        .bind(name)
        .bind(quantity)
        .bind(product_id)
        .execute(pool)
        .await?;
    Ok(())
}
