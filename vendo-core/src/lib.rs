pub mod cart;
pub mod error;
pub mod product;
pub mod repository;

pub use cart::{Cart, CartDraft, CartItem, CartLine};
pub use error::CommerceError;
pub use product::Product;
