use utoipa::OpenApi;

pub const HEALTH_TAG: &str = "Health";
pub const JOB_TAG: &str = "Jobs";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "defer-rs",
        description = "Deferred job scheduling API",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::jobs::JobStatus,
        )
    ),
    tags(
        (name = JOB_TAG, description = "Job scheduling endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
