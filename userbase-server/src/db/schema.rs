//! Startup schema ensure

use sqlx::MySqlPool;
use tracing::info;

/// Create the `users` table if it does not exist yet.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id   BIGINT AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            age  INT NOT NULL
        )
    "#,
    )
    .execute(pool)
    .await?;

    info!("users table ready");
    Ok(())
}
