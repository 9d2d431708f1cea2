use cart_discount_demo::{
    config::AppConfig,
    db::{create_orm_conn, ensure_indexes, run_migrations},
    repositories::{CartRepository, PgCartRepository},
    seed::seed_carts,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(config.database_url()?).await?;
    // Ensure the schema exists before writing.
    run_migrations(&orm).await?;
    ensure_indexes(&orm).await?;

    let carts = PgCartRepository::new(orm);
    let seeded = seed_carts(&carts, config.seed).await?;

    let stored = carts.find_all().await?;
    for cart in &stored {
        println!(
            "{id}  {user:<32} products={products:<2} quantity={quantity:<3} total={total}",
            id = cart.id,
            user = cart.user_id,
            products = cart.total_products,
            quantity = cart.total_quantity,
            total = cart.total,
        );
    }
    println!("Seed completed: {} carts ({} stored)", seeded.len(), stored.len());
    Ok(())
}
