pub mod captcha;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;
pub mod types;

pub use error::RelayError;
pub use router::{RelayState, relay_router};
