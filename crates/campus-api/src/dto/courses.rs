use campus_core::course::{Course, CourseUpdate, NewCourse};
use campus_core::error::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CategoryInfo, UserInfo};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    pub title: String,
    pub description: Option<String>,
    pub teacher_id: i64,
    pub category_id: i64,
    pub start_date: Option<NaiveDate>,
    /// Planned length in weeks.
    pub duration: Option<i32>,
}

impl CourseRequest {
    pub fn validate(&self) -> Result<NewCourse, AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title must not be empty".into()));
        }
        Ok(NewCourse {
            title: self.title.clone(),
            description: self.description.clone(),
            teacher_id: self.teacher_id,
            category_id: self.category_id,
            start_date: self.start_date,
            duration: self.duration,
        })
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseUpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub teacher_id: Option<i64>,
    pub category_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub duration: Option<i32>,
}

impl CourseUpdateRequest {
    pub fn validate(&self) -> Result<CourseUpdate, AppError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(AppError::Validation("title must not be empty".into()));
            }
        }
        Ok(CourseUpdate {
            title: self.title.clone(),
            description: self.description.clone(),
            teacher_id: self.teacher_id,
            category_id: self.category_id,
            start_date: self.start_date,
            duration: self.duration,
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub teacher: UserInfo,
    pub category: CategoryInfo,
    pub start_date: Option<NaiveDate>,
    pub duration: Option<i32>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            teacher: course.teacher.into(),
            category: course.category.into(),
            start_date: course.start_date,
            duration: course.duration,
        }
    }
}
