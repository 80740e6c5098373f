pub mod schema;
pub mod sqlx_repo;

pub use schema::ensure_schema;
pub use sqlx_repo::SqlxEnquiriesRepository;
