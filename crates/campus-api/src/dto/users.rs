use campus_core::error::AppError;
use campus_core::user::{NewUser, User, UserUpdate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub name: String,
    pub email: String,
    /// Either `teacher` or `student` (case insensitive).
    pub role: String,
}

impl UserRequest {
    pub fn validate(&self) -> Result<NewUser, AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".into()));
        }
        if !self.email.contains('@') {
            return Err(AppError::Validation("email must be a valid address".into()));
        }
        let role = self.role.parse().map_err(AppError::Validation)?;
        Ok(NewUser {
            name: self.name.clone(),
            email: self.email.clone(),
            role,
        })
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl UserUpdateRequest {
    pub fn validate(&self) -> Result<UserUpdate, AppError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("name must not be empty".into()));
            }
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(AppError::Validation("email must be a valid address".into()));
            }
        }
        let role = match &self.role {
            Some(raw) => Some(raw.parse().map_err(AppError::Validation)?),
            None => None,
        };
        Ok(UserUpdate {
            name: self.name.clone(),
            email: self.email.clone(),
            role,
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
        }
    }
}
