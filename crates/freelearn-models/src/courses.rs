//! Course domain models and DTOs.

use crate::ids::{CourseId, UserId};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Lowest accepted rating score.
pub const MIN_SCORE: i64 = 1;
/// Highest accepted rating score.
pub const MAX_SCORE: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Lesson {
    pub name: String,
    #[serde(default)]
    pub link: String,
}

/// A named, ordered group of lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Module {
    pub name: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

/// A single student's verdict on a course. Never edited once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Rating {
    pub user_id: UserId,
    pub score: u8,
    pub review: String,
}

/// A published course.
///
/// `creator_id` is set once at creation and is the only identity allowed to
/// update or delete the course. `ratings` holds at most one entry per user and
/// never one from the creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Course {
    pub id: CourseId,
    pub creator_id: UserId,
    pub name: String,
    pub description: String,
    pub image: String,
    pub link: String,
    pub modules: Vec<Module>,
    pub ratings: Vec<Rating>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    /// Builds a new course owned by `creator_id` with no ratings.
    pub fn new(creator_id: UserId, fields: CourseFields) -> Self {
        Self {
            id: CourseId::new(),
            creator_id,
            name: fields.name,
            description: fields.description,
            image: fields.image,
            link: fields.link,
            modules: fields.modules,
            ratings: Vec::new(),
            created_at: chrono::Utc::now(),
        }
    }

    pub fn is_created_by(&self, user_id: UserId) -> bool {
        self.creator_id == user_id
    }

    pub fn has_rating_from(&self, user_id: UserId) -> bool {
        self.ratings.iter().any(|r| r.user_id == user_id)
    }

    /// Overwrites every editable field. Identity, creator and ratings are kept.
    pub fn apply(&mut self, fields: CourseFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.image = fields.image;
        self.link = fields.link;
        self.modules = fields.modules;
    }

    /// Case-insensitive literal substring match on name or description.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// The editable part of a course. Creation requires a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CourseFields {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub modules: Vec<Module>,
}

/// Body of a course update. Every field is optional and an omitted field is
/// overwritten with its empty value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateCourseRequest {
    pub name: String,
    pub description: String,
    pub image: String,
    pub link: String,
    pub modules: Vec<Module>,
}

impl From<UpdateCourseRequest> for CourseFields {
    fn from(dto: UpdateCourseRequest) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            image: dto.image,
            link: dto.link,
            modules: dto.modules,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RateCourseRequest {
    /// Optional; when present it must be the caller's own id.
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub score: i64,
    #[serde(default)]
    pub review: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Text to look for in course names and descriptions.
    pub q: Option<String>,
}
