use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::CategoryRef;
use crate::user::UserRef;

/// A course led by a teacher, filed under a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub teacher: UserRef,
    pub category: CategoryRef,
    pub start_date: Option<NaiveDate>,
    /// Planned length in weeks.
    pub duration: Option<i32>,
}

/// Shallow course summary embedded in other entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRef {
    pub id: i64,
    pub title: String,
}

/// Input for creating a course.
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: Option<String>,
    pub teacher_id: i64,
    pub category_id: i64,
    pub start_date: Option<NaiveDate>,
    pub duration: Option<i32>,
}

/// Field-wise update of a course; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub teacher_id: Option<i64>,
    pub category_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub duration: Option<i32>,
}
