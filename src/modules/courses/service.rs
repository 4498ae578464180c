use tracing::{debug, info, instrument, warn};

use freelearn_db::CourseRepository;

use super::model::{
    Course, CourseError, CourseFields, CourseId, MAX_SCORE, MIN_SCORE, RateCourseRequest, Rating,
    UserId,
};

pub struct CourseService;

impl CourseService {
    #[instrument(skip(courses, dto), fields(course.name = %dto.name))]
    pub async fn create_course(
        courses: &dyn CourseRepository,
        author_id: UserId,
        dto: CourseFields,
    ) -> Result<Course, CourseError> {
        let course = Course::new(author_id, dto);
        courses.insert(&course).await?;

        info!(course.id = %course.id, creator.id = %author_id, "Course created");
        Ok(course)
    }

    #[instrument(skip(courses))]
    pub async fn get_course(
        courses: &dyn CourseRepository,
        course_id: CourseId,
    ) -> Result<Course, CourseError> {
        courses
            .find_by_id(course_id)
            .await?
            .ok_or(CourseError::NotFound)
    }

    #[instrument(skip(courses))]
    pub async fn list_courses(courses: &dyn CourseRepository) -> Result<Vec<Course>, CourseError> {
        Ok(courses.find_all().await?)
    }

    #[instrument(skip(courses))]
    pub async fn search_courses(
        courses: &dyn CourseRepository,
        query: &str,
    ) -> Result<Vec<Course>, CourseError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CourseError::EmptyQuery);
        }

        let found = courses.search(query).await?;
        debug!(count = found.len(), "Search completed");
        Ok(found)
    }

    /// Replaces every editable field. Only the creator may do this.
    #[instrument(skip(courses, dto))]
    pub async fn update_course(
        courses: &dyn CourseRepository,
        requester_id: UserId,
        course_id: CourseId,
        dto: CourseFields,
    ) -> Result<(), CourseError> {
        if courses.update_owned(course_id, requester_id, &dto).await? {
            info!(course.id = %course_id, "Course updated");
            return Ok(());
        }

        Err(Self::ownership_failure(courses, course_id, requester_id).await?)
    }

    #[instrument(skip(courses))]
    pub async fn delete_course(
        courses: &dyn CourseRepository,
        requester_id: UserId,
        course_id: CourseId,
    ) -> Result<(), CourseError> {
        if courses.delete_owned(course_id, requester_id).await? {
            info!(course.id = %course_id, "Course deleted");
            return Ok(());
        }

        Err(Self::ownership_failure(courses, course_id, requester_id).await?)
    }

    /// Records `rater_id`'s rating. Checks run in a fixed order: rater
    /// identity, existence, score range, self-rating, duplicate. The final
    /// append is conditional, so a concurrent duplicate still loses.
    #[instrument(skip(courses, dto), fields(score = dto.score))]
    pub async fn rate_course(
        courses: &dyn CourseRepository,
        rater_id: UserId,
        course_id: CourseId,
        dto: RateCourseRequest,
    ) -> Result<(), CourseError> {
        if dto.user_id.is_some_and(|claimed| claimed != rater_id) {
            warn!(rater.id = %rater_id, "Rating submitted on behalf of another user");
            return Err(CourseError::RaterMismatch);
        }

        let course = courses
            .find_by_id(course_id)
            .await?
            .ok_or(CourseError::NotFound)?;

        if !(MIN_SCORE..=MAX_SCORE).contains(&dto.score) {
            return Err(CourseError::ScoreOutOfRange);
        }
        if course.is_created_by(rater_id) {
            return Err(CourseError::SelfRating);
        }
        if course.has_rating_from(rater_id) {
            return Err(CourseError::DuplicateRating);
        }

        let rating = Rating {
            user_id: rater_id,
            score: dto.score as u8,
            review: dto.review,
        };

        if courses.append_rating(course_id, &rating).await? {
            info!(course.id = %course_id, rater.id = %rater_id, "Course rated");
            return Ok(());
        }

        // Lost a race: the course vanished or the same user rated concurrently.
        match courses.find_by_id(course_id).await? {
            None => Err(CourseError::NotFound),
            Some(_) => Err(CourseError::DuplicateRating),
        }
    }

    /// Explains why a creator-conditional write matched nothing.
    async fn ownership_failure(
        courses: &dyn CourseRepository,
        course_id: CourseId,
        requester_id: UserId,
    ) -> Result<CourseError, CourseError> {
        match courses.find_by_id(course_id).await? {
            None => Ok(CourseError::NotFound),
            Some(course) => {
                warn!(
                    course.id = %course_id,
                    requester.id = %requester_id,
                    creator.id = %course.creator_id,
                    "Modification by non-creator refused"
                );
                Ok(CourseError::NotAuthorized)
            }
        }
    }
}
