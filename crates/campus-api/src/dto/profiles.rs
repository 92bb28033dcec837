use campus_core::error::AppError;
use campus_core::user::{NewProfile, Profile, ProfileUpdate};
use serde::{Deserialize, Serialize};

use super::UserInfo;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub contact_info: Option<String>,
    pub user_id: i64,
}

impl ProfileRequest {
    pub fn validate(&self) -> Result<NewProfile, AppError> {
        Ok(NewProfile {
            user_id: self.user_id,
            bio: self.bio.clone(),
            avatar_url: self.avatar_url.clone(),
            contact_info: self.contact_info.clone(),
        })
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub contact_info: Option<String>,
}

impl ProfileUpdateRequest {
    pub fn into_changes(self) -> ProfileUpdate {
        ProfileUpdate {
            bio: self.bio,
            avatar_url: self.avatar_url,
            contact_info: self.contact_info,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i64,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub contact_info: Option<String>,
    pub user: UserInfo,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            bio: profile.bio,
            avatar_url: profile.avatar_url,
            contact_info: profile.contact_info,
            user: profile.user.into(),
        }
    }
}
