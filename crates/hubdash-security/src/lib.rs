//! # Hubdash Security
//!
//! Password hashing, signed session tokens, and the login user directory.

pub mod password;
pub mod session;
pub mod users;

pub use password::{PasswordError, PasswordService};
pub use session::{Role, SessionError, SessionManager, SessionUser};
pub use users::{LoginStats, UserDirectory};
