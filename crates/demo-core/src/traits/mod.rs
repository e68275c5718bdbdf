//! Repository traits (ports)

mod repositories;

pub use repositories::{DemoUserRepository, RepoResult};
