use campus_core::enrollment::Enrollment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CourseInfo, UserInfo};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EnrollParams {
    pub user_id: i64,
    pub course_id: i64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub id: i64,
    pub user: UserInfo,
    pub course: CourseInfo,
    pub enroll_date: DateTime<Utc>,
    pub status: String,
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(enrollment: Enrollment) -> Self {
        Self {
            id: enrollment.id,
            user: enrollment.user.into(),
            course: enrollment.course.into(),
            enroll_date: enrollment.enroll_date,
            status: enrollment.status.to_string(),
        }
    }
}
