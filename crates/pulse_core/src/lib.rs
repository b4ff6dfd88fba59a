pub mod canonicalize;
pub mod db;
pub mod domain;
pub mod error;
pub mod sources;
pub mod store;
pub mod summary;
