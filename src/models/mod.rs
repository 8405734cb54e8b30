pub mod account;
pub mod course;
