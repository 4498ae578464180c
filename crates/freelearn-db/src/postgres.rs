use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{debug, instrument};

use freelearn_config::DatabaseConfig;
use freelearn_models::{Course, CourseFields, CourseId, Module, Rating, Role, User, UserId};

use crate::error::StoreError;
use crate::repository::{CourseRepository, UserRepository};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

const USER_COLUMNS: &str = "id, email, password_hash, is_professor, course_ids, created_at";
const COURSE_COLUMNS: &str =
    "id, creator_id, name, description, image, link, modules, ratings, created_at";

/// Opens a connection pool against `config.name` on the configured server.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let options = PgConnectOptions::from_str(&config.connection_string)?.database(&config.name);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.timeout())
        .connect_with(options)
        .await?;

    Ok(pool)
}

#[derive(FromRow)]
struct UserRow {
    id: UserId,
    email: String,
    password_hash: String,
    is_professor: bool,
    course_ids: Vec<CourseId>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            role: Role::from_flag(row.is_professor),
            enrolled_course_ids: row.course_ids,
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct CourseRow {
    id: CourseId,
    creator_id: UserId,
    name: String,
    description: String,
    image: String,
    link: String,
    modules: Json<Vec<Module>>,
    ratings: Json<Vec<Rating>>,
    created_at: DateTime<Utc>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            id: row.id,
            creator_id: row.creator_id,
            name: row.name,
            description: row.description,
            image: row.image,
            link: row.link,
            modules: row.modules.0,
            ratings: row.ratings.0,
            created_at: row.created_at,
        }
    }
}

/// Escapes `LIKE` metacharacters so the query is matched literally.
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Postgres-backed store. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Applies any pending migrations from `migrations/`.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    /// Runs `query` under the configured deadline.
    async fn within<T, F>(&self, query: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        tokio::time::timeout(self.timeout, query)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))?
            .map_err(StoreError::from)
    }
}

#[async_trait]
impl UserRepository for PostgresStore {
    #[instrument(skip(self, user), fields(db.operation = "INSERT", db.table = "users"))]
    async fn insert_if_absent(&self, user: &User) -> Result<bool, StoreError> {
        let result = self
            .within(
                sqlx::query(
                    "INSERT INTO users (id, email, password_hash, is_professor, course_ids, created_at)
                     VALUES ($1, $2, $3, $4, $5, $6)
                     ON CONFLICT (email) DO NOTHING",
                )
                .bind(user.id)
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(user.role.is_professor())
                .bind(&user.enrolled_course_ids)
                .bind(user.created_at)
                .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "users"))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = self
            .within(
                sqlx::query_as::<_, UserRow>(&sql)
                    .bind(email)
                    .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(User::from))
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "users"))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = self
            .within(
                sqlx::query_as::<_, UserRow>(&sql)
                    .bind(id)
                    .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(User::from))
    }

    #[instrument(skip(self), fields(db.operation = "UPDATE", db.table = "users"))]
    async fn add_enrollment(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<bool, StoreError> {
        let result = self
            .within(
                sqlx::query(
                    "UPDATE users
                     SET course_ids = CASE
                         WHEN $2 = ANY(course_ids) THEN course_ids
                         ELSE array_append(course_ids, $2)
                     END
                     WHERE id = $1",
                )
                .bind(user_id)
                .bind(course_id)
                .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl CourseRepository for PostgresStore {
    #[instrument(skip(self, course), fields(course.id = %course.id, db.operation = "INSERT", db.table = "courses"))]
    async fn insert(&self, course: &Course) -> Result<(), StoreError> {
        self.within(
            sqlx::query(
                "INSERT INTO courses
                 (id, creator_id, name, description, image, link, modules, ratings, created_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .bind(course.id)
            .bind(course.creator_id)
            .bind(&course.name)
            .bind(&course.description)
            .bind(&course.image)
            .bind(&course.link)
            .bind(Json(&course.modules))
            .bind(Json(&course.ratings))
            .bind(course.created_at)
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "courses"))]
    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, StoreError> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1");
        let row = self
            .within(
                sqlx::query_as::<_, CourseRow>(&sql)
                    .bind(id)
                    .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(Course::from))
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "courses"))]
    async fn find_all(&self) -> Result<Vec<Course>, StoreError> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses ORDER BY created_at, id");
        let rows = self
            .within(sqlx::query_as::<_, CourseRow>(&sql).fetch_all(&self.pool))
            .await?;

        debug!(count = rows.len(), "Fetched courses");
        Ok(rows.into_iter().map(Course::from).collect())
    }

    #[instrument(skip(self, ids), fields(count = ids.len(), db.operation = "SELECT", db.table = "courses"))]
    async fn find_by_ids(&self, ids: &[CourseId]) -> Result<Vec<Course>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = ANY($1) ORDER BY created_at, id"
        );
        let rows = self
            .within(
                sqlx::query_as::<_, CourseRow>(&sql)
                    .bind(ids)
                    .fetch_all(&self.pool),
            )
            .await?;

        Ok(rows.into_iter().map(Course::from).collect())
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "courses"))]
    async fn search(&self, query: &str) -> Result<Vec<Course>, StoreError> {
        let sql = format!(
            r"SELECT {COURSE_COLUMNS} FROM courses
              WHERE name ILIKE $1 ESCAPE '\' OR description ILIKE $1 ESCAPE '\'
              ORDER BY created_at, id"
        );
        let rows = self
            .within(
                sqlx::query_as::<_, CourseRow>(&sql)
                    .bind(like_pattern(query))
                    .fetch_all(&self.pool),
            )
            .await?;

        debug!(count = rows.len(), "Search matched courses");
        Ok(rows.into_iter().map(Course::from).collect())
    }

    #[instrument(skip(self, fields), fields(db.operation = "UPDATE", db.table = "courses"))]
    async fn update_owned(
        &self,
        id: CourseId,
        creator_id: UserId,
        fields: &CourseFields,
    ) -> Result<bool, StoreError> {
        let result = self
            .within(
                sqlx::query(
                    "UPDATE courses
                     SET name = $3, description = $4, image = $5, link = $6, modules = $7
                     WHERE id = $1 AND creator_id = $2",
                )
                .bind(id)
                .bind(creator_id)
                .bind(&fields.name)
                .bind(&fields.description)
                .bind(&fields.image)
                .bind(&fields.link)
                .bind(Json(&fields.modules))
                .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self), fields(db.operation = "DELETE", db.table = "courses"))]
    async fn delete_owned(&self, id: CourseId, creator_id: UserId) -> Result<bool, StoreError> {
        let result = self
            .within(
                sqlx::query("DELETE FROM courses WHERE id = $1 AND creator_id = $2")
                    .bind(id)
                    .bind(creator_id)
                    .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self, rating), fields(rating.user_id = %rating.user_id, db.operation = "UPDATE", db.table = "courses"))]
    async fn append_rating(&self, id: CourseId, rating: &Rating) -> Result<bool, StoreError> {
        let result = self
            .within(
                sqlx::query(
                    "UPDATE courses
                     SET ratings = ratings || jsonb_build_array($2::jsonb)
                     WHERE id = $1
                       AND creator_id <> $3
                       AND NOT ratings @> jsonb_build_array(jsonb_build_object('user_id', $4::text))",
                )
                .bind(id)
                .bind(Json(rating))
                .bind(rating.user_id)
                .bind(rating.user_id.to_string())
                .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_plain_text() {
        assert_eq!(like_pattern("rust"), "%rust%");
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("100%"), r"%100\%%");
        assert_eq!(like_pattern("a_b"), r"%a\_b%");
        assert_eq!(like_pattern(r"c:\dir"), r"%c:\\dir%");
    }
}
