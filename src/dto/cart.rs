use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Cart;

/// `POST /searchCart` form.
#[derive(Debug, Deserialize)]
pub struct SearchCartForm {
    pub total: Decimal,
}

/// `POST /applyDiscount` form; `total` is the threshold to re-render with.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyDiscountForm {
    pub cart_id: String,
    pub total: Decimal,
    pub discount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct TotalQuery {
    pub total: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DiscountRequest {
    #[schema(value_type = String, example = "10.00")]
    pub discount: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartList {
    pub items: Vec<Cart>,
}
