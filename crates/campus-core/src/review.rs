use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::course::CourseRef;
use crate::user::UserRef;

/// Rating bounds for course reviews (inclusive).
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// A student's review of a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseReview {
    pub id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub course: CourseRef,
    pub student: UserRef,
}

/// Input for creating a review.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub course_id: i64,
    pub student_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Field-wise update of a review.
#[derive(Debug, Clone, Default)]
pub struct ReviewUpdate {
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub course_id: Option<i64>,
    pub student_id: Option<i64>,
}

/// Checks that a rating falls within the allowed 1..=5 range.
pub fn rating_in_range(rating: i32) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}
