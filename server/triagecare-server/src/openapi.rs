//! OpenAPI documentation for the TriageCare API

use utoipa::OpenApi;

use crate::handlers::{admin, dashboard, health, hospitals, intake};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::version_info,
        intake::transcribe,
        intake::questions,
        intake::assess,
        intake::submit,
        hospitals::nearby_hospitals,
        dashboard::queue_stats,
        dashboard::list_patients,
        dashboard::patient_detail,
        dashboard::update_status,
        dashboard::tracking,
        dashboard::health_record,
        admin::clear_queue,
        admin::seed_queue,
    ),
    components(schemas(
        health::HealthResponse,
        health::VersionResponse,
        intake::TranscribeRequest,
        intake::TranscribeResponse,
        intake::QuestionsRequest,
        intake::QuestionsResponse,
        intake::AnsweredQuestion,
        intake::AssessRequest,
        intake::AssessResponse,
        intake::SubmitRequest,
        intake::SubmitResponse,
        hospitals::HospitalsResponse,
        dashboard::StatsResponse,
        dashboard::StatusUpdateRequest,
        dashboard::StatusUpdateResponse,
        admin::ClearResponse,
        admin::SeedResponse,
        crate::error::ApiErrorResponse,
    )),
    tags(
        (name = "health", description = "Liveness and version"),
        (name = "intake", description = "Patient triage flow"),
        (name = "hospitals", description = "Hospital lookup and ETA"),
        (name = "dashboard", description = "Staff dashboard queue API"),
        (name = "admin", description = "Demo/test helpers"),
    ),
    info(
        title = "TriageCare API",
        description = "Patient triage API and ER dashboard backend",
    )
)]
pub struct ApiDoc;
