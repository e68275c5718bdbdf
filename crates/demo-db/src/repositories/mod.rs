//! Repository implementations

mod demo_user;
mod error;

pub use demo_user::PgDemoUserRepository;
