//! Authentication: JWT tokens, password hashing, request middleware

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtService, TokenError};
pub use middleware::{require_auth, AuthUser};
pub use password::PasswordService;
