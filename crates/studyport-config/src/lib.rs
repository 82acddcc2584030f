//! # Studyport Config
//!
//! Configuration types for the Studyport API.
//!
//! This crate provides configuration structures loaded from environment
//! variables:
//!
//! - [`jwt`]: JWT authentication configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`upload`]: file upload policy configuration
//!
//! Each struct can equally be built with a literal in tests, so nothing in
//! the application reads the environment outside of `from_env`.

pub mod cors;
pub mod jwt;
pub mod upload;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use upload::UploadConfig;
