//! Services Layer
//!
//! Business flows built on top of the repositories, callable from HTTP
//! handlers or directly.

pub mod account_service;

pub use account_service::{Registration, SignInError, register, sign_in};
