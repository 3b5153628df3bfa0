pub mod asset;
pub mod chart;
pub mod schema;
pub mod summary;
