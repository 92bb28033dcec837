use campus_core::error::AppError;
use campus_core::review::{CourseReview, NewReview, ReviewUpdate, rating_in_range};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CourseInfo, UserInfo};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseReviewRequest {
    pub rating: i32,
    pub comment: Option<String>,
    /// May be omitted when the course comes from the path.
    pub course_id: Option<i64>,
    /// May be omitted when the student comes from the path.
    pub student_id: Option<i64>,
}

impl CourseReviewRequest {
    /// Validation for the body-only create; both ids are required.
    pub fn validate(&self) -> Result<NewReview, AppError> {
        let course_id = self
            .course_id
            .ok_or_else(|| AppError::Validation("courseId is required".into()))?;
        let student_id = self
            .student_id
            .ok_or_else(|| AppError::Validation("studentId is required".into()))?;
        self.validate_for(course_id, student_id)
    }

    /// Validation when course and student ids come from the path.
    pub fn validate_for(&self, course_id: i64, student_id: i64) -> Result<NewReview, AppError> {
        if !rating_in_range(self.rating) {
            return Err(AppError::Validation(
                "rating must be between 1 and 5".into(),
            ));
        }
        Ok(NewReview {
            course_id,
            student_id,
            rating: self.rating,
            comment: self.comment.clone(),
        })
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseReviewUpdateRequest {
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub course_id: Option<i64>,
    pub student_id: Option<i64>,
}

impl CourseReviewUpdateRequest {
    pub fn validate(&self) -> Result<ReviewUpdate, AppError> {
        if let Some(rating) = self.rating {
            if !rating_in_range(rating) {
                return Err(AppError::Validation(
                    "rating must be between 1 and 5".into(),
                ));
            }
        }
        Ok(ReviewUpdate {
            rating: self.rating,
            comment: self.comment.clone(),
            course_id: self.course_id,
            student_id: self.student_id,
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseReviewResponse {
    pub id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub course: CourseInfo,
    pub student: UserInfo,
}

impl From<CourseReview> for CourseReviewResponse {
    fn from(review: CourseReview) -> Self {
        Self {
            id: review.id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
            course: review.course.into(),
            student: review.student.into(),
        }
    }
}
