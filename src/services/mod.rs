pub mod auth;
pub mod image;

pub use auth::{AuthService, LoginError, RegisterError};
pub use image::{ImageStore, StorageError};
