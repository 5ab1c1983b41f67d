//! OpenAPI documentation aggregator.
//!
//! Collects all `#[utoipa::path]`-annotated handlers and `ToSchema`-derived
//! types into a single OpenAPI spec, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "uhrwerk API",
        version = "0.1.0",
        description = "Dynamic cron job registration and dispatch service.",
    ),
    tags(
        (name = "Health", description = "Server readiness and job counts"),
        (name = "Crons", description = "Cron job registration, listing, and removal"),
    ),
    paths(
        crate::api::health::health,
        crate::api::crons::register_cron,
        crate::api::crons::list_crons,
        crate::api::crons::run_cron,
        crate::api::crons::remove_cron,
    ),
    components(schemas(
        crate::api::health::HealthResponse,
        crate::api::crons::CronRequest,
        crate::api::crons::CronResponse,
    ))
)]
pub struct ApiDoc;
