//! # spellbook-entity
//!
//! Domain entity models for Spellbook. Every struct in this crate is either
//! a stored record or a domain value object handed between the auth core
//! and its store collaborators.

pub mod account;

pub use account::{Account, AccountUpdate, NewAccount, Role};
