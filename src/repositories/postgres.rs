use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::{CartRepository, StoreError};
use crate::{
    entity::carts::{ActiveModel, Column, Entity as Carts, Model as CartModel},
    models::Cart,
};

#[derive(Debug, Clone)]
pub struct PgCartRepository {
    orm: DatabaseConnection,
}

impl PgCartRepository {
    pub fn new(orm: DatabaseConnection) -> Self {
        Self { orm }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Cart>, StoreError> {
        Carts::find_by_id(id.to_string())
            .one(&self.orm)
            .await?
            .map(cart_from_entity)
            .transpose()
    }

    async fn find_one_by_user_id(&self, user_id: &str) -> Result<Option<Cart>, StoreError> {
        Carts::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::Id)
            .one(&self.orm)
            .await?
            .map(cart_from_entity)
            .transpose()
    }

    async fn find_all_total_at_least(&self, threshold: Decimal) -> Result<Vec<Cart>, StoreError> {
        Carts::find()
            .filter(Column::Total.gte(threshold))
            .order_by_asc(Column::Total)
            .order_by_asc(Column::Id)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(cart_from_entity)
            .collect()
    }

    async fn find_all(&self) -> Result<Vec<Cart>, StoreError> {
        Carts::find()
            .order_by_asc(Column::Id)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(cart_from_entity)
            .collect()
    }

    async fn save(&self, cart: &Cart) -> Result<Cart, StoreError> {
        let active = active_from_cart(cart)?;
        let saved = Carts::insert(active)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::UserId,
                        Column::SessionId,
                        Column::Products,
                        Column::Total,
                        Column::Discount,
                        Column::TotalProducts,
                        Column::TotalQuantity,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.orm)
            .await?;
        tracing::debug!(cart_id = %saved.id, total = %saved.total, "cart saved");
        cart_from_entity(saved)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = Carts::delete_many().exec(&self.orm).await?;
        Ok(result.rows_affected)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(Carts::find().count(&self.orm).await?)
    }
}

fn cart_from_entity(model: CartModel) -> Result<Cart, StoreError> {
    Ok(Cart {
        id: model.id,
        user_id: model.user_id,
        session_id: model.session_id,
        products: serde_json::from_value(model.products)?,
        total: model.total,
        discount: model.discount,
        total_products: model.total_products,
        total_quantity: model.total_quantity,
    })
}

fn active_from_cart(cart: &Cart) -> Result<ActiveModel, StoreError> {
    Ok(ActiveModel {
        id: Set(cart.id.clone()),
        user_id: Set(cart.user_id.clone()),
        session_id: Set(cart.session_id.clone()),
        products: Set(serde_json::to_value(&cart.products)?),
        total: Set(cart.total),
        discount: Set(cart.discount),
        total_products: Set(cart.total_products),
        total_quantity: Set(cart.total_quantity),
    })
}
