//! `accounts` crate — user-account domain: request validation, password
//! hashing, and the sign-up / login / profile-update use-cases.

pub mod models;
pub mod error;
pub mod password;
pub mod validation;
pub mod service;

pub use models::{PublicUser, SignupRequest, UpdateUserRequest};
pub use error::AccountError;
pub use service::{authenticate, signup, update_profile};
