//! Cart queries and the discount operation.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    models::{Cart, DiscountOutOfRange},
    repositories::{CartRepository, StoreError},
};

#[derive(Debug, Error)]
pub enum CartServiceError {
    #[error("cart not found")]
    NotFound,

    #[error(transparent)]
    InvalidDiscount(#[from] DiscountOutOfRange),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Every cart whose total is at least `threshold`, ascending by total.
pub async fn find_all_cart_total_greater_than(
    carts: &dyn CartRepository,
    threshold: Decimal,
) -> Result<Vec<Cart>, CartServiceError> {
    let found = carts.find_all_total_at_least(threshold).await?;
    tracing::debug!(%threshold, matches = found.len(), "cart range query");
    Ok(found)
}

pub async fn find_by_id(carts: &dyn CartRepository, id: &str) -> Result<Cart, CartServiceError> {
    carts
        .find_by_id(id)
        .await?
        .ok_or(CartServiceError::NotFound)
}

pub async fn find_one_by_user_id(
    carts: &dyn CartRepository,
    user_id: &str,
) -> Result<Cart, CartServiceError> {
    carts
        .find_one_by_user_id(user_id)
        .await?
        .ok_or(CartServiceError::NotFound)
}

/// Sets the cart's discount and subtracts it from the stored total, then saves.
///
/// Returns `Ok(None)` when no cart has `id`; nothing is written in that case.
/// The subtraction is applied to the current total, so discounts compound
/// across calls. The load and save are not atomic: concurrent calls for the
/// same cart can lose an update.
pub async fn apply_discount(
    carts: &dyn CartRepository,
    id: &str,
    discount: Decimal,
) -> Result<Option<Cart>, CartServiceError> {
    let mut cart = match find_by_id(carts, id).await {
        Ok(cart) => cart,
        Err(CartServiceError::NotFound) => {
            tracing::warn!(cart_id = %id, "discount requested for unknown cart");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    let previous_total = cart.total;
    cart.apply_discount(discount)?;
    let saved = carts.save(&cart).await?;

    tracing::info!(
        cart_id = %saved.id,
        %discount,
        %previous_total,
        total = %saved.total,
        "discount applied"
    );
    Ok(Some(saved))
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use testresult::TestResult;

    use super::*;
    use crate::{
        models::Product,
        repositories::{InMemoryCartRepository, MockCartRepository},
    };

    fn cart_worth(id: &str, cents: i64) -> Cart {
        Cart::new(
            id,
            format!("{id}@example.com"),
            "session",
            vec![Product::new(
                format!("{id}-1"),
                "Gandalf",
                "Minas Tirith",
                "https://example.com/g.png",
                Decimal::new(cents, 2),
                1,
            )],
        )
    }

    async fn repo_with(carts: &[Cart]) -> Result<InMemoryCartRepository, StoreError> {
        let repo = InMemoryCartRepository::new();
        for cart in carts {
            repo.save(cart).await?;
        }
        Ok(repo)
    }

    #[tokio::test]
    async fn search_returns_carts_at_or_above_threshold_sorted() -> TestResult {
        let repo = repo_with(&[
            cart_worth("a", 9000),
            cart_worth("b", 2500),
            cart_worth("c", 5000),
            cart_worth("d", 4999),
        ])
        .await?;

        let found = find_all_cart_total_greater_than(&repo, Decimal::from(50)).await?;

        let totals: Vec<_> = found.iter().map(|c| c.total).collect();
        assert_eq!(totals, [Decimal::new(5000, 2), Decimal::new(9000, 2)]);
        Ok(())
    }

    #[tokio::test]
    async fn search_above_every_total_is_empty() -> TestResult {
        let repo = repo_with(&[cart_worth("a", 1000)]).await?;
        let found = find_all_cart_total_greater_than(&repo, Decimal::from(1000)).await?;
        assert!(found.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn discount_compounds_across_calls() -> TestResult {
        let repo = repo_with(&[cart_worth("a", 5000)]).await?;

        let first = apply_discount(&repo, "a", Decimal::from(10)).await?;
        let first = first.ok_or(CartServiceError::NotFound)?;
        assert_eq!(first.total, Decimal::new(4000, 2));
        assert_eq!(first.discount, Decimal::from(10));

        let second = apply_discount(&repo, "a", Decimal::from(5)).await?;
        let second = second.ok_or(CartServiceError::NotFound)?;
        assert_eq!(second.total, Decimal::new(3500, 2));
        assert_eq!(second.discount, Decimal::from(5));

        let stored = find_by_id(&repo, "a").await?;
        assert_eq!(stored, second);
        Ok(())
    }

    #[tokio::test]
    async fn discount_on_unknown_cart_creates_nothing() -> TestResult {
        let repo = repo_with(&[cart_worth("a", 5000)]).await?;

        let result = apply_discount(&repo, "missing", Decimal::from(10)).await?;

        assert!(result.is_none());
        assert_eq!(repo.count().await?, 1);
        assert!(repo.find_by_id("missing").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn discount_on_unknown_cart_never_saves() -> TestResult {
        let mut repo = MockCartRepository::new();
        repo.expect_find_by_id()
            .with(eq("missing"))
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_save().never();

        let result = apply_discount(&repo, "missing", Decimal::ONE).await?;
        assert!(result.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn store_failure_during_discount_propagates() {
        let mut repo = MockCartRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Err(StoreError::Database(sea_orm::DbErr::Custom("down".into()))));

        let result = apply_discount(&repo, "a", Decimal::ONE).await;
        assert!(
            matches!(result, Err(CartServiceError::Store(_))),
            "expected Store error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn overflowing_discount_is_rejected_without_saving() -> TestResult {
        let repo = repo_with(&[cart_worth("a", 5000)]).await?;

        let result = apply_discount(&repo, "a", Decimal::MIN).await;

        assert!(
            matches!(result, Err(CartServiceError::InvalidDiscount(_))),
            "expected InvalidDiscount, got {result:?}"
        );
        assert_eq!(find_by_id(&repo, "a").await?, cart_worth("a", 5000));
        Ok(())
    }

    #[tokio::test]
    async fn saved_discount_is_rounded_to_cents() -> TestResult {
        let repo = repo_with(&[cart_worth("a", 5000)]).await?;

        let saved = apply_discount(&repo, "a", Decimal::new(5, 3))
            .await?
            .ok_or(CartServiceError::NotFound)?;

        assert_eq!(saved.discount, Decimal::new(1, 2));
        assert_eq!(saved.total, Decimal::new(4999, 2));
        assert_eq!(find_by_id(&repo, "a").await?, saved);
        Ok(())
    }

    #[tokio::test]
    async fn find_by_id_unknown_is_not_found() -> TestResult {
        let repo = repo_with(&[]).await?;
        let result = find_by_id(&repo, "nope").await;
        assert!(matches!(result, Err(CartServiceError::NotFound)));
        Ok(())
    }

    #[tokio::test]
    async fn find_one_by_user_id_matches_owner() -> TestResult {
        let repo = repo_with(&[cart_worth("a", 1000), cart_worth("b", 2000)]).await?;

        let cart = find_one_by_user_id(&repo, "b@example.com").await?;
        assert_eq!(cart.id, "b");

        let missing = find_one_by_user_id(&repo, "z@example.com").await;
        assert!(matches!(missing, Err(CartServiceError::NotFound)));
        Ok(())
    }
}
