//! Common utilities and shared types for edura.
//!
//! This crate provides foundational components used across all edura crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Tokens**: JWT access/refresh pair issuance via [`TokenIssuer`]
//! - **Validation**: Phone, password and upload rules
//! - **Storage**: Local file storage for uploaded course material
//!
//! # Example
//!
//! ```no_run
//! use edura_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {}", id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod storage;
pub mod token;
pub mod validation;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use storage::{LocalStorage, StorageBackend, StorageConfig, UploadedFile, generate_storage_key};
pub use token::{Claims, TokenIssuer, TokenKind, TokenPair};
pub use validation::{
    HOMEWORK_FILE_EXTENSIONS, SUBMISSION_FILE_EXTENSIONS, VIDEO_EXTENSIONS, validate_extension,
    validate_password, validate_phone,
};
