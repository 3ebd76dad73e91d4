pub mod claims;
pub mod jwt;

pub use claims::SessionClaims;
pub use jwt::{mint_session_token, verify_session_token};
