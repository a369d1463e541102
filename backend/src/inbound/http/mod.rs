//! HTTP inbound adapter exposing the REST endpoints.

pub mod chapters;
pub mod courses;
pub mod error;
pub mod health;
pub mod profiles;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
