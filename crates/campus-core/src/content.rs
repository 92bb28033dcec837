use serde::{Deserialize, Serialize};

use crate::course::CourseRef;

/// An ordered section of a course; holds lessons and quizzes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub id: i64,
    pub title: String,
    pub order_index: i32,
    pub course: CourseRef,
}

/// Shallow module summary embedded in lessons and quizzes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleRef {
    pub id: i64,
    pub title: String,
}

/// Input for creating a module.
#[derive(Debug, Clone)]
pub struct NewModule {
    pub title: String,
    pub order_index: i32,
    pub course_id: i64,
}

/// Field-wise update of a module.
#[derive(Debug, Clone, Default)]
pub struct ModuleUpdate {
    pub title: Option<String>,
    pub order_index: Option<i32>,
    pub course_id: Option<i64>,
}

/// A single lesson inside a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub module: ModuleRef,
}

/// Shallow lesson summary embedded in assignments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonRef {
    pub id: i64,
    pub title: String,
}

/// Input for creating a lesson.
#[derive(Debug, Clone)]
pub struct NewLesson {
    pub title: String,
    pub content: String,
    pub module_id: i64,
}

/// Field-wise update of a lesson.
#[derive(Debug, Clone, Default)]
pub struct LessonUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub module_id: Option<i64>,
}
