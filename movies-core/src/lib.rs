//! Shared building blocks for the movie API functions.
//!
//! Both Lambda functions (`get-movie` and `delete-movie`) read the same
//! configuration, build the same DynamoDB client once per process and shape
//! their API Gateway responses the same way. That shared logic lives here so
//! the function crates only hold their request handling.

pub mod catalog;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod model;
pub mod movie_id;
pub mod response;
pub mod store;

pub use catalog::MovieCatalog;
pub use config::MovieConfig;
pub use error::{ApiError, ConfigError, StoreError};
pub use model::{Movie, MovieResponse};
pub use movie_id::MovieId;
pub use response::ApiResponse;
pub use store::{DynamoStore, Item, KeyValueStore};
