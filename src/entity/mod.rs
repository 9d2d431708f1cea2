pub mod carts;
pub mod sessions;

pub use carts::Entity as Carts;
pub use sessions::Entity as Sessions;
