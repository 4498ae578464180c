use tracing::{info, instrument, warn};

use freelearn_db::{CourseRepository, UserRepository};
use freelearn_models::{Course, CourseId};

use crate::modules::users::model::{UserError, UserId};

pub struct UserService;

impl UserService {
    /// Adds `course_id` to `user_id`'s enrollments. Re-enrolling is a no-op.
    #[instrument(skip(users, courses))]
    pub async fn enroll(
        users: &dyn UserRepository,
        courses: &dyn CourseRepository,
        requester_id: UserId,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<(), UserError> {
        if requester_id != user_id {
            warn!(requester.id = %requester_id, "Enrollment for another user refused");
            return Err(UserError::NotOwnAccount);
        }

        if courses.find_by_id(course_id).await?.is_none() {
            return Err(UserError::CourseNotFound);
        }

        if !users.add_enrollment(user_id, course_id).await? {
            return Err(UserError::NotFound);
        }

        info!(user.id = %user_id, course.id = %course_id, "User enrolled");
        Ok(())
    }

    /// The courses `user_id` is enrolled in that still exist.
    #[instrument(skip(users, courses))]
    pub async fn list_enrolled_courses(
        users: &dyn UserRepository,
        courses: &dyn CourseRepository,
        requester_id: UserId,
        user_id: UserId,
    ) -> Result<Vec<Course>, UserError> {
        if requester_id != user_id {
            warn!(requester.id = %requester_id, "Course list for another user refused");
            return Err(UserError::NotOwnAccount);
        }

        let user = users
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)?;

        Ok(courses.find_by_ids(&user.enrolled_course_ids).await?)
    }
}
