use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::effectiveness::{self, AttackEntry, DefendingType, Verdict};
use crate::error::QueryError;
use crate::server::AppState;

#[derive(Debug)]
pub enum ApiError {
    Query(QueryError),
}

#[derive(Serialize)]
struct ErrorResponse {
    status: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Query(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        };
        (
            status,
            Json(ErrorResponse {
                status: "error",
                message,
            }),
        )
            .into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self::Query(err)
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct TypesResponse {
    pub types: Vec<String>,
    pub creation_date: String,
    pub rom_version: Option<String>,
}

/// One query-string key per defending dropdown.
#[derive(Debug, Default, Deserialize)]
pub struct DefendingSlots {
    pub defend1: Option<String>,
    pub defend2: Option<String>,
    pub defend3: Option<String>,
}

impl DefendingSlots {
    /// Missing slots are unused. All three missing still counts as one "no type" entry.
    fn to_defenders(&self) -> Vec<DefendingType> {
        let defenders: Vec<DefendingType> = [&self.defend1, &self.defend2, &self.defend3]
            .into_iter()
            .flatten()
            .map(|raw| DefendingType::parse(raw))
            .collect();
        if defenders.is_empty() {
            vec![DefendingType::NoType]
        } else {
            defenders
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EffectivenessParams {
    pub attack: String,
    #[serde(flatten)]
    pub slots: DefendingSlots,
}

#[derive(Serialize)]
pub struct EffectivenessResponse {
    pub attack: String,
    pub defend: Vec<String>,
    pub multiplier: f64,
    pub verdict: Verdict,
    pub label: &'static str,
}

#[derive(Serialize)]
pub struct DefenseResponse {
    pub defend: Vec<String>,
    pub attackers: Vec<AttackEntry>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn types(State(state): State<AppState>) -> Json<TypesResponse> {
    let chart = &state.chart;
    Json(TypesResponse {
        types: chart.types().to_vec(),
        creation_date: chart.creation_date().to_string(),
        rom_version: chart.rom_version().map(str::to_string),
    })
}

pub async fn effectiveness(
    State(state): State<AppState>,
    Query(params): Query<EffectivenessParams>,
) -> Result<Json<EffectivenessResponse>, ApiError> {
    let defenders = params.slots.to_defenders();
    let multiplier = effectiveness::effectiveness(&state.chart, &params.attack, &defenders)?;
    let verdict = Verdict::from_multiplier(multiplier);
    Ok(Json(EffectivenessResponse {
        attack: params.attack,
        defend: defenders.iter().map(ToString::to_string).collect(),
        multiplier,
        verdict,
        label: verdict.as_str(),
    }))
}

pub async fn defense(
    State(state): State<AppState>,
    Query(slots): Query<DefendingSlots>,
) -> Result<Json<DefenseResponse>, ApiError> {
    let defenders = slots.to_defenders();
    let attackers = effectiveness::defensive_profile(&state.chart, &defenders)?;
    Ok(Json(DefenseResponse {
        defend: defenders.iter().map(ToString::to_string).collect(),
        attackers,
    }))
}
