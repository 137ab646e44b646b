use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "Courses", description = "Course catalog endpoints"),
        (name = "Health", description = "Liveness and database connectivity"),
        (name = "Authentication", description = "Authentication related endpoints"),
    ),
    info(
        title = "Course API",
        version = "1.0.0",
        description = "CRUD API for the course catalog",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
