pub mod common;

mod assessment_tests;
mod enrollment_tests;
mod quiz_tests;
mod review_tests;
mod user_tests;
