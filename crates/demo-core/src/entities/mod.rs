//! Domain entities - core business objects

mod user;

pub use user::{DemoUser, NewDemoUser, USERNAME_MAX_LEN};
