pub mod assessment;
pub mod catalog;
pub mod content;
pub mod course;
pub mod enrollment;
pub mod error;
pub mod quiz;
pub mod review;
pub mod user;

pub use error::AppError;
pub use user::{Role, User};
