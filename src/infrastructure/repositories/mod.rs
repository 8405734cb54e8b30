//! Repository implementations using SeaORM

pub mod account_repository;
pub mod course_repository;

pub use account_repository::SeaOrmAccountRepository;
pub use course_repository::SeaOrmCourseRepository;
