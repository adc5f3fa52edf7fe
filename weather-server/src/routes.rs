use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;
use weather_core::{Coordinates, WeatherLookup};

pub const LIVENESS_MESSAGE: &str = "Weather API is running with Open-Meteo";

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub lat: f64,
    pub lon: f64,
}

pub fn router(lookup: WeatherLookup) -> Router {
    // Mirrors origin and headers; a wildcard origin cannot carry credentials.
    let cors = CorsLayer::very_permissive();

    Router::new()
        .route("/", get(root))
        .route("/weather", get(weather))
        .with_state(lookup)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": LIVENESS_MESSAGE }))
}

/// Always answers 200 once the query parses; failures carry an `error` key.
async fn weather(
    State(lookup): State<WeatherLookup>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": rejection.body_text() })),
            )
                .into_response();
        }
    };

    match lookup
        .fetch_weather(Coordinates::new(query.lat, query.lon))
        .await
    {
        Ok(report) => Json(report).into_response(),
        Err(err) => {
            warn!(error = %err, message = ?err.message(), "weather lookup failed");
            Json(err).into_response()
        }
    }
}
