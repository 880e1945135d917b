// File: services/counselsync_backend/src/main.rs
use axum::{routing::get, Router};
use counselsync_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[cfg(feature = "booking")]
use counselsync_booking::store::InMemoryCounselorStore;
#[cfg(feature = "booking")]
use counselsync_common::services::CounselorStore;
#[cfg(any(feature = "zoom", feature = "booking"))]
use counselsync_common::services::CredentialStore;
#[cfg(any(feature = "zoom", feature = "booking"))]
use counselsync_zoom::auth::InMemoryCredentialStore;

#[tokio::main]
async fn main() {
    let config = Arc::new(load_config().expect("Failed to load config"));
    counselsync_common::logging::init();

    // Session-scoped collaborator stores, shared by the OAuth routes and the
    // booking engine so both see the same credential
    #[cfg(any(feature = "zoom", feature = "booking"))]
    let credentials: Arc<dyn CredentialStore> = Arc::new(InMemoryCredentialStore::new());
    #[cfg(feature = "booking")]
    let counselors: Arc<dyn CounselorStore> = Arc::new(
        InMemoryCounselorStore::from_config(&config).expect("invalid working hours config"),
    );

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to Counselsync API!" }))
        .with_state(config.clone());

    let api_router = Router::new().nest("/api", {
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut router = api_router;
        #[cfg(feature = "zoom")]
        {
            if counselsync_common::is_zoom_enabled(&config) {
                router = router.merge(counselsync_zoom::routes(
                    config.clone(),
                    credentials.clone(),
                ));
            } else {
                info!("Zoom integration disabled by configuration");
            }
        }
        #[cfg(feature = "booking")]
        {
            if counselsync_common::is_zoom_enabled(&config)
                && counselsync_common::is_gcal_enabled(&config)
            {
                router = router.merge(counselsync_booking::routes(
                    config.clone(),
                    credentials.clone(),
                    counselors.clone(),
                ));
            } else {
                info!("Booking engine disabled: both providers must be configured");
            }
        }
        router
    });

    #[allow(unused_mut)]
    let mut app = api_router;

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        #[cfg(feature = "booking")]
        use counselsync_booking::doc::BookingApiDoc;
        #[cfg(feature = "zoom")]
        use counselsync_zoom::doc::ZoomApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        // Define the Merged OpenAPI Documentation struct
        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Counselsync API",
                version = "0.1.0",
                description = "Counselsync Service API Docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Counselsync", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut openapi_doc = ApiDoc::openapi();
        #[cfg(feature = "zoom")]
        openapi_doc.merge(ZoomApiDoc::openapi());
        #[cfg(feature = "booking")]
        openapi_doc.merge(BookingApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    let app = app.layer(TraceLayer::new_for_http());

    // Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.unwrap();
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}
