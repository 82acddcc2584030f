//! # Studyport Core
//!
//! Core types, errors, and utilities for the Studyport API.
//!
//! This crate provides foundational pieces used throughout the application:
//!
//! - [`errors`]: application error type with HTTP response conversion
//! - [`password`]: secure password hashing and verification
//! - [`upload`]: upload policy, descriptors, and storage naming
//! - [`storage`]: trait-based file storage with a local filesystem backend

pub mod errors;
pub mod password;
pub mod storage;
pub mod upload;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, verify_password};
pub use storage::{FileStorage, LocalFileStorage, StorageError};
pub use upload::{UploadDescriptor, UploadError, UploadPolicy};
