//! CLI command implementations.

pub mod lookup;
pub mod wishlist;

pub use lookup::LookupCommand;
pub use wishlist::WishlistCommand;
