//! Synthetic demo data: wipes the cart store and refills it with fake carts.

use std::collections::HashSet;

use fake::Fake;
use fake::faker::address::raw::CityName;
use fake::faker::internet::raw::SafeEmail;
use fake::faker::name::raw::Name;
use fake::locales::EN;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

use crate::{
    models::{Cart, Product},
    repositories::{CartRepository, StoreError},
};

pub const DEFAULT_CART_COUNT: usize = 10;

const MIN_PRODUCTS: usize = 1;
const MAX_PRODUCTS: usize = 10;
const MIN_QUANTITY: i64 = 1;
const MAX_QUANTITY: i64 = 10;
/// Unit prices are drawn in cents from 1.00 to 100.00.
const MIN_PRICE_CENTS: i64 = 100;
const MAX_PRICE_CENTS: i64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOptions {
    pub cart_count: usize,
    /// Fixed RNG seed for reproducible data; a fresh one is drawn when `None`.
    pub rng_seed: Option<u64>,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            cart_count: DEFAULT_CART_COUNT,
            rng_seed: None,
        }
    }
}

/// Deletes every stored cart and saves `options.cart_count` freshly generated ones.
pub async fn seed_carts(
    carts: &dyn CartRepository,
    options: SeedOptions,
) -> Result<Vec<Cart>, StoreError> {
    let removed = carts.delete_all().await?;
    let rng_seed = options.rng_seed.unwrap_or_else(|| rand::rng().random());
    let generated = generate_carts(rng_seed, options.cart_count);

    let mut saved = Vec::with_capacity(generated.len());
    for cart in &generated {
        saved.push(carts.save(cart).await?);
    }

    tracing::info!(removed, created = saved.len(), rng_seed, "cart store seeded");
    Ok(saved)
}

/// Generates `count` carts; the same `rng_seed` always yields the same carts.
pub fn generate_carts(rng_seed: u64, count: usize) -> Vec<Cart> {
    let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
    let mut ids = HashSet::with_capacity(count);
    let mut carts = Vec::with_capacity(count);
    while carts.len() < count {
        let cart = generate_cart(&mut rng);
        // cart ids are the store's primary key
        if ids.insert(cart.id.clone()) {
            carts.push(cart);
        }
    }
    carts
}

fn generate_cart<R: Rng>(rng: &mut R) -> Cart {
    let id = gtin8(rng);
    let session_id = uuid::Builder::from_random_bytes(rng.random()).into_uuid();
    let user_id: String = SafeEmail(EN).fake_with_rng(rng);
    let product_count = rng.random_range(MIN_PRODUCTS..=MAX_PRODUCTS);
    let products = (0..product_count).map(|_| generate_product(rng)).collect();

    Cart::new(id, user_id, session_id.to_string(), products)
}

fn generate_product<R: Rng>(rng: &mut R) -> Product {
    let id = gtin8(rng);
    let title: String = Name(EN).fake_with_rng(rng);
    let description: String = CityName(EN).fake_with_rng(rng);
    let thumbnail_url = format!("https://picsum.photos/seed/{id}/200");
    let price = Decimal::new(rng.random_range(MIN_PRICE_CENTS..=MAX_PRICE_CENTS), 2);
    let quantity = rng.random_range(MIN_QUANTITY..=MAX_QUANTITY);

    Product::new(id, title, description, thumbnail_url, price, quantity)
}

/// Eight-digit GTIN code: seven random digits plus the GS1 check digit.
fn gtin8<R: Rng>(rng: &mut R) -> String {
    let digits: Vec<u32> = (0..7).map(|_| rng.random_range(0..10)).collect();
    let weighted: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { d * 3 } else { *d })
        .sum();
    let check = (10 - weighted % 10) % 10;

    let mut code: String = digits
        .iter()
        .filter_map(|d| char::from_digit(*d, 10))
        .collect();
    code.extend(char::from_digit(check, 10));
    code
}
