//! JSON API behind the form page

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::TripPlannerError;
use crate::models::{DEFAULT_DURATION_DAYS, Month, TravelDates, TripPlan, TripRequest};
use crate::planner::TripPlanner;
use crate::report::{export_filename, export_text};

#[derive(Clone)]
pub struct AppState {
    planner: Arc<TripPlanner>,
}

/// Fields submitted by the form
#[derive(Debug, Deserialize)]
pub struct PlanForm {
    pub city: String,
    #[serde(default = "default_duration")]
    pub duration: u8,
    #[serde(default)]
    pub month: Month,
}

fn default_duration() -> u8 {
    DEFAULT_DURATION_DAYS
}

impl PlanForm {
    fn request(&self) -> crate::Result<TripRequest> {
        TripRequest::new(&self.city, self.duration, self.month)
    }
}

/// A produced plan; also the body accepted by the export route so the
/// download matches what was displayed
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResponse {
    pub plan: TripPlan,
    pub travel_dates: TravelDates,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Handler error carrying the user-facing message
pub struct ApiError(TripPlannerError);

impl From<TripPlannerError> for ApiError {
    fn from(err: TripPlannerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            TripPlannerError::Validation { .. } => StatusCode::BAD_REQUEST,
            _ => {
                error!("Request failed: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            error: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(planner: Arc<TripPlanner>) -> Router {
    Router::new()
        .route("/cities", get(get_cities))
        .route("/plan", post(create_plan))
        .route("/plan/export", post(export_plan))
        .with_state(AppState { planner })
}

async fn get_cities(State(state): State<AppState>) -> Json<Vec<String>> {
    let cities = state
        .planner
        .catalog()
        .city_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(cities)
}

async fn create_plan(
    State(state): State<AppState>,
    Json(form): Json<PlanForm>,
) -> Result<Json<PlanResponse>, ApiError> {
    let request = form.request()?;
    let plan = state.planner.plan_trip(&request).await;
    let travel_dates = TravelDates::from_today(request.duration());
    info!("Served plan for {}", request.city());
    Ok(Json(PlanResponse { plan, travel_dates }))
}

async fn export_plan(Json(produced): Json<PlanResponse>) -> impl IntoResponse {
    let PlanResponse { plan, travel_dates } = produced;
    info!("Exporting plan for {}", plan.city);

    let filename = export_filename(&plan.city, plan.duration);
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, attachment(&filename)),
        ],
        export_text(&plan, &travel_dates),
    )
}

/// `Content-Disposition` value; quotes, backslashes and control characters
/// cannot appear inside the quoted file name
fn attachment(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}
