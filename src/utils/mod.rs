pub mod keywords;
pub mod validate;

pub use keywords::normalize_keywords;
