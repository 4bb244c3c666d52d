pub mod feed;
pub mod models;

pub use models::*;
