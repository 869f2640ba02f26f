//! Authentication module
//!
//! Session tokens are HS256 JWTs; passwords are hashed with bcrypt.

mod clock;
mod jwt;
mod middleware;
mod password;

pub use clock::{Clock, FixedClock, SystemClock};
pub use jwt::{JwtKeys, TokenService};
pub use middleware::{auth_middleware, bearer_token, AuthUser};
pub use password::PasswordService;
