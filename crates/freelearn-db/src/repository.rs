use async_trait::async_trait;

use freelearn_models::{Course, CourseFields, CourseId, Rating, User, UserId};

use crate::error::StoreError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists `user` unless its email is already registered.
    ///
    /// Returns `false` when the email was taken; nothing is written then.
    async fn insert_if_absent(&self, user: &User) -> Result<bool, StoreError>;

    /// Looks a user up by their normalized (lowercase) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Adds `course_id` to the user's enrollments if it is not there yet.
    ///
    /// Returns `false` when no such user exists.
    async fn add_enrollment(&self, user_id: UserId, course_id: CourseId)
    -> Result<bool, StoreError>;
}

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn insert(&self, course: &Course) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, StoreError>;

    /// Every course, oldest first.
    async fn find_all(&self) -> Result<Vec<Course>, StoreError>;

    /// The courses among `ids` that still exist, oldest first.
    async fn find_by_ids(&self, ids: &[CourseId]) -> Result<Vec<Course>, StoreError>;

    /// Case-insensitive literal substring match on name or description.
    async fn search(&self, query: &str) -> Result<Vec<Course>, StoreError>;

    /// Overwrites the editable fields if `creator_id` owns the course.
    ///
    /// Returns `false` when the course is missing or owned by someone else.
    async fn update_owned(
        &self,
        id: CourseId,
        creator_id: UserId,
        fields: &CourseFields,
    ) -> Result<bool, StoreError>;

    /// Removes the course if `creator_id` owns it. Same return contract as
    /// [`update_owned`](Self::update_owned).
    async fn delete_owned(&self, id: CourseId, creator_id: UserId) -> Result<bool, StoreError>;

    /// Appends `rating` only if its author is not the creator and has not
    /// rated the course before.
    ///
    /// Returns `false` when any of those conditions (or existence) fails.
    async fn append_rating(&self, id: CourseId, rating: &Rating) -> Result<bool, StoreError>;
}
