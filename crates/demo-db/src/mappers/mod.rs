//! Entity <-> model mappers

mod demo_user;
