//! Schema bootstrap

mod bootstrap;

pub use bootstrap::{bootstrap, is_undefined_table, DEMO_TABLE, SEED_USERNAME};
