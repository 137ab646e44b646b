use database::services::CourseService;
use sea_orm::DatabaseConnection;

/// Shared by every handler; cloning only clones pool handles
#[derive(Debug, Clone)]
pub struct AppState {
    pub courses: CourseService,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            courses: CourseService::new(db),
        }
    }
}
