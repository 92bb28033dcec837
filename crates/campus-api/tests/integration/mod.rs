
mod assessments_api_tests;
mod courses_api_tests;
