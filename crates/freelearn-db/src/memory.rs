use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use freelearn_models::{Course, CourseFields, CourseId, Rating, User, UserId};

use crate::error::StoreError;
use crate::repository::{CourseRepository, UserRepository};

/// In-process store with the same conditional-write contract as Postgres.
///
/// Courses are kept in insertion order so listings come back oldest first.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    courses: RwLock<Vec<Course>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert_if_absent(&self, user: &User) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Ok(false);
        }
        users.insert(user.id, user.clone());
        Ok(true)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn add_enrollment(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&user_id) else {
            return Ok(false);
        };
        if !user.is_enrolled_in(course_id) {
            user.enrolled_course_ids.push(course_id);
        }
        Ok(true)
    }
}

#[async_trait]
impl CourseRepository for MemoryStore {
    async fn insert(&self, course: &Course) -> Result<(), StoreError> {
        self.courses.write().await.push(course.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, StoreError> {
        let courses = self.courses.read().await;
        Ok(courses.iter().find(|c| c.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Course>, StoreError> {
        Ok(self.courses.read().await.clone())
    }

    async fn find_by_ids(&self, ids: &[CourseId]) -> Result<Vec<Course>, StoreError> {
        let courses = self.courses.read().await;
        Ok(courses
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<Course>, StoreError> {
        let courses = self.courses.read().await;
        Ok(courses.iter().filter(|c| c.matches(query)).cloned().collect())
    }

    async fn update_owned(
        &self,
        id: CourseId,
        creator_id: UserId,
        fields: &CourseFields,
    ) -> Result<bool, StoreError> {
        let mut courses = self.courses.write().await;
        match courses
            .iter_mut()
            .find(|c| c.id == id && c.is_created_by(creator_id))
        {
            Some(course) => {
                course.apply(fields.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_owned(&self, id: CourseId, creator_id: UserId) -> Result<bool, StoreError> {
        let mut courses = self.courses.write().await;
        let before = courses.len();
        courses.retain(|c| !(c.id == id && c.is_created_by(creator_id)));
        Ok(courses.len() < before)
    }

    async fn append_rating(&self, id: CourseId, rating: &Rating) -> Result<bool, StoreError> {
        let mut courses = self.courses.write().await;
        let Some(course) = courses.iter_mut().find(|c| c.id == id) else {
            return Ok(false);
        };
        if course.is_created_by(rating.user_id) || course.has_rating_from(rating.user_id) {
            return Ok(false);
        }
        course.ratings.push(rating.clone());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freelearn_models::Role;

    fn sample_course(creator: UserId, name: &str) -> Course {
        Course::new(
            creator,
            CourseFields {
                name: name.to_string(),
                description: format!("{name} description"),
                image: String::new(),
                link: String::new(),
                modules: Vec::new(),
            },
        )
    }

    fn rating(user_id: UserId) -> Rating {
        Rating {
            user_id,
            score: 4,
            review: "solid".into(),
        }
    }

    #[tokio::test]
    async fn test_insert_if_absent_rejects_duplicate_email() {
        let store = MemoryStore::new();
        let first = User::new("dup@example.com", "h".into(), Role::Student);
        let second = User::new("DUP@example.com", "h".into(), Role::Professor);

        assert!(store.insert_if_absent(&first).await.unwrap());
        assert!(!store.insert_if_absent(&second).await.unwrap());
        assert!(UserRepository::find_by_id(&store, second.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_enrollment_is_idempotent() {
        let store = MemoryStore::new();
        let user = User::new("s@example.com", "h".into(), Role::Student);
        store.insert_if_absent(&user).await.unwrap();
        let course_id = CourseId::new();

        assert!(store.add_enrollment(user.id, course_id).await.unwrap());
        assert!(store.add_enrollment(user.id, course_id).await.unwrap());

        let stored = UserRepository::find_by_id(&store, user.id).await.unwrap().unwrap();
        assert_eq!(stored.enrolled_course_ids, vec![course_id]);
    }

    #[tokio::test]
    async fn test_add_enrollment_unknown_user() {
        let store = MemoryStore::new();
        assert!(!store.add_enrollment(UserId::new(), CourseId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn test_listing_preserves_creation_order() {
        let store = MemoryStore::new();
        let creator = UserId::new();
        let a = sample_course(creator, "Alpha");
        let b = sample_course(creator, "Beta");
        store.insert(&a).await.unwrap();
        store.insert(&b).await.unwrap();

        let names: Vec<String> = store.find_all().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);

        let only_b = store.find_by_ids(&[b.id, CourseId::new()]).await.unwrap();
        assert_eq!(only_b.len(), 1);
        assert_eq!(only_b[0].id, b.id);
    }

    #[tokio::test]
    async fn test_owned_mutations_check_creator() {
        let store = MemoryStore::new();
        let creator = UserId::new();
        let stranger = UserId::new();
        let course = sample_course(creator, "Alpha");
        store.insert(&course).await.unwrap();

        let fields = CourseFields {
            name: "Renamed".into(),
            description: String::new(),
            image: String::new(),
            link: String::new(),
            modules: Vec::new(),
        };
        assert!(!store.update_owned(course.id, stranger, &fields).await.unwrap());
        assert!(store.update_owned(course.id, creator, &fields).await.unwrap());

        assert!(!store.delete_owned(course.id, stranger).await.unwrap());
        assert!(store.delete_owned(course.id, creator).await.unwrap());
        assert!(CourseRepository::find_by_id(&store, course.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_append_rating_is_conditional() {
        let store = MemoryStore::new();
        let creator = UserId::new();
        let student = UserId::new();
        let course = sample_course(creator, "Alpha");
        store.insert(&course).await.unwrap();

        assert!(!store.append_rating(course.id, &rating(creator)).await.unwrap());
        assert!(store.append_rating(course.id, &rating(student)).await.unwrap());
        assert!(!store.append_rating(course.id, &rating(student)).await.unwrap());
        assert!(!store.append_rating(CourseId::new(), &rating(student)).await.unwrap());

        let stored = CourseRepository::find_by_id(&store, course.id).await.unwrap().unwrap();
        assert_eq!(stored.ratings.len(), 1);
    }
}
