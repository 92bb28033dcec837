use campus_core::content::{Lesson, LessonUpdate, Module, ModuleUpdate, NewLesson, NewModule};
use campus_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::{CourseInfo, ModuleInfo};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRequest {
    pub title: String,
    /// Position within the course; defaults to 0.
    pub order_index: Option<i32>,
    pub course_id: i64,
}

impl ModuleRequest {
    pub fn validate(&self) -> Result<NewModule, AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title must not be empty".into()));
        }
        Ok(NewModule {
            title: self.title.clone(),
            order_index: self.order_index.unwrap_or(0),
            course_id: self.course_id,
        })
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleUpdateRequest {
    pub title: Option<String>,
    pub order_index: Option<i32>,
    pub course_id: Option<i64>,
}

impl ModuleUpdateRequest {
    pub fn validate(&self) -> Result<ModuleUpdate, AppError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(AppError::Validation("title must not be empty".into()));
            }
        }
        Ok(ModuleUpdate {
            title: self.title.clone(),
            order_index: self.order_index,
            course_id: self.course_id,
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleResponse {
    pub id: i64,
    pub title: String,
    pub order_index: i32,
    pub course: CourseInfo,
}

impl From<Module> for ModuleResponse {
    fn from(module: Module) -> Self {
        Self {
            id: module.id,
            title: module.title,
            order_index: module.order_index,
            course: module.course.into(),
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonRequest {
    pub title: String,
    pub content: String,
    pub module_id: i64,
}

impl LessonRequest {
    pub fn validate(&self) -> Result<NewLesson, AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title must not be empty".into()));
        }
        Ok(NewLesson {
            title: self.title.clone(),
            content: self.content.clone(),
            module_id: self.module_id,
        })
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonUpdateRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub module_id: Option<i64>,
}

impl LessonUpdateRequest {
    pub fn validate(&self) -> Result<LessonUpdate, AppError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(AppError::Validation("title must not be empty".into()));
            }
        }
        Ok(LessonUpdate {
            title: self.title.clone(),
            content: self.content.clone(),
            module_id: self.module_id,
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub module: ModuleInfo,
}

impl From<Lesson> for LessonResponse {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: lesson.id,
            title: lesson.title,
            content: lesson.content,
            module: lesson.module.into(),
        }
    }
}
