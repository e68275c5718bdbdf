//! Database models - SQLx-compatible structs for PostgreSQL tables

mod demo_user;

pub use demo_user::DemoUserModel;
