use cart_discount_demo::{
    config::AppConfig,
    db::{create_orm_conn, ensure_indexes, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(config.database_url()?).await?;
    run_migrations(&orm).await?;
    ensure_indexes(&orm).await?;
    println!("Migrations and indexes applied");
    Ok(())
}
