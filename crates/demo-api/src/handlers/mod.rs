//! Route handlers

pub mod demo;
pub mod health;
