use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "carts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,
    pub user_id: String,
    pub session_id: String,
    /// Embedded products, stored as a JSON array.
    #[sea_orm(column_type = "JsonBinary")]
    pub products: Json,
    #[sea_orm(column_type = "Decimal(None)")]
    pub total: Decimal,
    #[sea_orm(column_type = "Decimal(None)")]
    pub discount: Decimal,
    pub total_products: i64,
    pub total_quantity: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
