//! Secret word sources

mod static_list;

pub use static_list::{Category, DEFAULT_CATEGORIES, StaticWordList};
