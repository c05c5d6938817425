pub mod schema_repo;
pub use schema_repo::{SalesTable, SchemaRepository};
pub mod sales_repo;
pub use sales_repo::SalesRepository;
