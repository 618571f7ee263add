//! Session authentication.
//!
//! Provides:
//! - JWT issuance and verification for users and admins
//! - The session gate that turns a request's cookies into a principal
//! - Session cookie formatting
//! - Password hashing with Argon2

pub mod cookies;
pub mod gate;
pub mod password;
pub mod token;

pub use gate::{authenticate_admin, authenticate_user, CurrentAdmin, CurrentUser, SessionState};
pub use password::{hash_password, verify_password, PasswordError};
pub use token::{Claims, PrincipalKind, TokenError, TokenService};
