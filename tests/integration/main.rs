//! Integration tests for the Spellbook HTTP API.

mod auth_test;
mod helpers;
mod middleware_test;
