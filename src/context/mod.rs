pub mod store_context;

pub use store_context::*;
