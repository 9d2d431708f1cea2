pub mod cart;
pub mod session;
