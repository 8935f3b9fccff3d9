pub mod find;
pub mod index;
pub mod models;
pub mod tokens;
