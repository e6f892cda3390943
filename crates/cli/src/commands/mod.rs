//! CLI subcommand implementations.

pub mod migrate;
pub mod seed;

/// Connect to the database named by `GIFTWISE_DATABASE_URL`.
pub async fn connect() -> Result<sqlx::PgPool, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("GIFTWISE_DATABASE_URL")
        .map_err(|_| "GIFTWISE_DATABASE_URL not set")?;

    Ok(sqlx::PgPool::connect(&database_url).await?)
}
