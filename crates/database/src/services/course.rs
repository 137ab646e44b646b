use crate::{entities::course, error::RepositoryError};
use models::course::{CoursePatch, NewCourse};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryOrder, SqlErr,
};

/// CRUD access to the `courses` table, keyed by `Course_Number`.
///
/// Keys are compared verbatim; callers pass them already normalized.
#[derive(Debug, Clone)]
pub struct CourseService {
    db: DatabaseConnection,
}

impl CourseService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a new course, failing with [`RepositoryError::DuplicateKey`] if the key is taken
    pub async fn create(&self, new_course: NewCourse) -> Result<course::Model, RepositoryError> {
        let key = new_course.course_number.clone();
        let active = course::ActiveModel {
            course_number: Set(new_course.course_number),
            dept: Set(new_course.dept),
            level: Set(new_course.level),
            hours: Set(new_course.hours),
            name: Set(new_course.name),
            description: Set(new_course.description),
        };

        match active.insert(&self.db).await {
            Ok(model) => Ok(model),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(RepositoryError::DuplicateKey(key))
            }
            Err(err) => {
                // Some drivers report primary key collisions with codes sea-orm does not classify
                let existing = course::Entity::find_by_id(key.clone()).one(&self.db).await?;
                match existing {
                    Some(_) => Err(RepositoryError::DuplicateKey(key)),
                    None => Err(err.into()),
                }
            }
        }
    }

    /// All courses ordered by `Course_Number` ascending
    pub async fn find_all(&self) -> Result<Vec<course::Model>, RepositoryError> {
        let courses = course::Entity::find()
            .order_by_asc(course::Column::CourseNumber)
            .all(&self.db)
            .await?;

        Ok(courses)
    }

    pub async fn find_by_key(&self, key: &str) -> Result<course::Model, RepositoryError> {
        course::Entity::find_by_id(key.to_owned())
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(key.to_owned()))
    }

    /// Apply the columns present in `patch` to the course stored under `key`
    pub async fn update_by_key(
        &self,
        key: &str,
        patch: CoursePatch,
    ) -> Result<course::Model, RepositoryError> {
        if let Some(number) = &patch.course_number
            && number != key
        {
            return Err(RepositoryError::KeyChange);
        }

        let existing = self.find_by_key(key).await?;
        if patch.is_empty() {
            return Ok(existing);
        }

        let mut active = existing.into_active_model();
        if let Some(dept) = patch.dept {
            active.dept = Set(dept);
        }
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(level) = patch.level {
            active.level = Set(level);
        }
        if let Some(hours) = patch.hours {
            active.hours = Set(hours);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }

        match active.update(&self.db).await {
            Ok(model) => Ok(model),
            // The row was deleted between the lookup and the update
            Err(DbErr::RecordNotUpdated) => Err(RepositoryError::NotFound(key.to_owned())),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn delete_by_key(&self, key: &str) -> Result<(), RepositoryError> {
        let result = course::Entity::delete_by_id(key.to_owned())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound(key.to_owned()));
        }

        Ok(())
    }

    /// Remove every course, returning how many rows were deleted
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = course::Entity::delete_many().exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    /// Check that the database answers
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        self.db.ping().await?;
        Ok(())
    }
}
