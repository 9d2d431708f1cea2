use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::cart::{CartList, DiscountRequest},
    models::{Cart, Product},
    response::{ApiResponse, Meta},
    routes::{cart, health},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        cart::search_carts,
        cart::get_cart,
        cart::get_cart_by_user,
        cart::apply_discount,
    ),
    components(
        schemas(
            Cart,
            Product,
            CartList,
            DiscountRequest,
            health::HealthData,
            Meta,
            ApiResponse<Cart>,
            ApiResponse<CartList>,
            ApiResponse<health::HealthData>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Carts", description = "Cart search and discount endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_cart_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/carts",
            "/api/carts/{id}",
            "/api/carts/by-user/{user_id}",
            "/api/carts/{id}/discount",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
