use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Stored money amounts carry whole cents.
pub const MONEY_SCALE: u32 = 2;

/// Rounds to cents, halves away from zero (the rounding of a `NUMERIC` cast).
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("discount {discount} cannot be taken off a total of {total}")]
pub struct DiscountOutOfRange {
    pub total: Decimal,
    pub discount: Decimal,
}

/// A line item embedded in a [`Cart`]. Products have no lifecycle of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    pub quantity: i64,
    /// `price * quantity`, fixed when the product is built.
    #[schema(value_type = String, example = "39.98")]
    pub total: Decimal,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        thumbnail_url: impl Into<String>,
        price: Decimal,
        quantity: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            thumbnail_url: thumbnail_url.into(),
            price,
            quantity,
            total: price * Decimal::from(quantity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    pub id: String,
    pub user_id: String,
    pub session_id: String,
    pub products: Vec<Product>,
    #[schema(value_type = String, example = "40.00")]
    pub total: Decimal,
    #[schema(value_type = String, example = "10.00")]
    pub discount: Decimal,
    pub total_products: i64,
    pub total_quantity: i64,
}

impl Cart {
    /// Builds a cart with its derived fields computed from `products` and no discount.
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        session_id: impl Into<String>,
        products: Vec<Product>,
    ) -> Self {
        let total = products.iter().map(|p| p.total).sum();
        let total_quantity = products.iter().map(|p| p.quantity).sum();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            session_id: session_id.into(),
            total_products: products.len() as i64,
            total_quantity,
            products,
            total,
            discount: Decimal::ZERO,
        }
    }

    /// Sum of the line totals, ignoring any discount.
    pub fn line_items_total(&self) -> Decimal {
        self.products.iter().map(|p| p.total).sum()
    }

    /// Overwrites the discount and subtracts it from the *stored* total.
    ///
    /// The total is not re-derived from the line items, so calling this twice
    /// subtracts twice: 50.00 -> discount 10 -> 40.00 -> discount 5 -> 35.00.
    ///
    /// Both amounts are rounded to cents. The cart is left untouched when the
    /// new total does not fit in a [`Decimal`].
    pub fn apply_discount(&mut self, discount: Decimal) -> Result<(), DiscountOutOfRange> {
        let discount = round_money(discount);
        let total = self
            .total
            .checked_sub(discount)
            .ok_or(DiscountOutOfRange {
                total: self.total,
                discount,
            })?;
        self.discount = discount;
        self.total = round_money(total);
        Ok(())
    }
}
