//! # demo-core
//!
//! Domain layer containing the demo user entity, the domain error type and the
//! repository trait that request handlers depend on.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{DemoUser, NewDemoUser, USERNAME_MAX_LEN};
pub use error::DomainError;
pub use traits::{DemoUserRepository, RepoResult};
