//! Wire-format types. JSON fields are camelCase; related entities appear as
//! shallow `*Info` summaries.

pub mod assessments;
pub mod catalog;
pub mod content;
pub mod courses;
pub mod enrollments;
pub mod profiles;
pub mod quizzes;
pub mod reviews;
pub mod users;

use campus_core::assessment::AssignmentRef;
use campus_core::catalog::CategoryRef;
use campus_core::content::{LessonRef, ModuleRef};
use campus_core::course::CourseRef;
use campus_core::quiz::QuizRef;
use campus_core::user::UserRef;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

// ---------------------------------------------------------------------------
// Nested summaries
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
}

impl From<UserRef> for UserInfo {
    fn from(r: UserRef) -> Self {
        Self {
            id: r.id,
            name: r.name,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CategoryInfo {
    pub id: i64,
    pub name: String,
}

impl From<CategoryRef> for CategoryInfo {
    fn from(r: CategoryRef) -> Self {
        Self {
            id: r.id,
            name: r.name,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CourseInfo {
    pub id: i64,
    pub title: String,
}

impl From<CourseRef> for CourseInfo {
    fn from(r: CourseRef) -> Self {
        Self {
            id: r.id,
            title: r.title,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ModuleInfo {
    pub id: i64,
    pub title: String,
}

impl From<ModuleRef> for ModuleInfo {
    fn from(r: ModuleRef) -> Self {
        Self {
            id: r.id,
            title: r.title,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LessonInfo {
    pub id: i64,
    pub title: String,
}

impl From<LessonRef> for LessonInfo {
    fn from(r: LessonRef) -> Self {
        Self {
            id: r.id,
            title: r.title,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AssignmentInfo {
    pub id: i64,
    pub title: String,
}

impl From<AssignmentRef> for AssignmentInfo {
    fn from(r: AssignmentRef) -> Self {
        Self {
            id: r.id,
            title: r.title,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct QuizInfo {
    pub id: i64,
    pub title: String,
}

impl From<QuizRef> for QuizInfo {
    fn from(r: QuizRef) -> Self {
        Self {
            id: r.id,
            title: r.title,
        }
    }
}
