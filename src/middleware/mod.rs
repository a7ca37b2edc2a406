pub mod session;

pub use session::{AdminSession, RequireAdmin, SESSION_COOKIE};
