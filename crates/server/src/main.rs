// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod config;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use protown_api::{
    ApiError, AuthenticatedActor, AuthenticationService, CatalogEntryInfo,
    CreateCatalogEntryRequest, CreateCustomerRequest, CreateLeadRequest,
    CreateProfessionalPairRequest, CreateProfessionalRequest, CreateServiceCityPairRequest,
    CustomerInfo, DeleteLeadResponse, DeleteProfessionalPairResponse, LeadReportRequest,
    LeadResponse, LeadStatusBreakdownResponse, LinkCityToStateRequest, ListCitiesResponse,
    ListLeadsResponse, ListProfessionalPairsResponse, ListServiceCityPairsResponse,
    ListServicesResponse, ListStatesResponse, NextPairResponse, PairRosterResponse,
    PairUtilizationResponse, ProfessionalInfo, ProfessionalPairInfo, ServiceCityPairInfo,
    SetProfessionalVerificationRequest, StateCityPairInfo, UpdateLeadStatusRequest,
};
use protown_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::config::{Args, ServerConfig};

/// Header carrying the caller's actor id.
const ACTOR_ID_HEADER: &str = "x-actor-id";
/// Header carrying the caller's role.
const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// Application state shared across handlers.
///
/// Requests are serialized on the mutex; the assignment lock in the
/// database covers writers in other processes.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
}

// ============================================================================
// Wire request types
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
struct CatalogEntryApiRequest {
    name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct LinkCityToStateApiRequest {
    state_id: i64,
    city_id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateServiceCityPairApiRequest {
    service_id: i64,
    city_id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateProfessionalPairApiRequest {
    service_city_pair_id: i64,
    #[serde(default)]
    professional_id_1: Option<i64>,
    #[serde(default)]
    professional_id_2: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateProfessionalApiRequest {
    name: String,
    email: String,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    business_name: Option<String>,
    #[serde(default)]
    service_id: Option<i64>,
    #[serde(default)]
    state_id: Option<i64>,
    #[serde(default)]
    city_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct SetVerificationApiRequest {
    verified: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateCustomerApiRequest {
    first_name: String,
    last_name: String,
    email: String,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

/// Lead submission body. The customer comes from the actor headers and the
/// pair is always chosen by the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateLeadApiRequest {
    service_id: i64,
    city_id: i64,
    #[serde(default)]
    state_id: Option<i64>,
    description: String,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateLeadStatusApiRequest {
    status: String,
}

/// Query parameters for listing professional pairs.
#[derive(Debug, Deserialize)]
struct ListProfessionalPairsQuery {
    /// Restricts the listing to one service/city pairing.
    #[serde(default)]
    service_city_pair_id: Option<i64>,
}

/// Query parameters bounding a lead report.
#[derive(Debug, Deserialize)]
struct LeadReportQuery {
    #[serde(default)]
    service_id: Option<i64>,
    /// `YYYY-MM-DD`, inclusive.
    #[serde(default)]
    date_from: Option<String>,
    /// `YYYY-MM-DD`, inclusive.
    #[serde(default)]
    date_to: Option<String>,
}

impl From<LeadReportQuery> for LeadReportRequest {
    fn from(query: LeadReportQuery) -> Self {
        Self {
            service_id: query.service_id,
            date_from: query.date_from,
            date_to: query.date_to,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

// ============================================================================
// Errors
// ============================================================================

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    error: bool,
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } | ApiError::AssignmentNotConfigured { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Authenticates the caller from the actor headers.
fn authenticate(headers: &HeaderMap) -> Result<AuthenticatedActor, HttpError> {
    let header = |name: &str| -> Result<String, HttpError> {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string)
            .ok_or_else(|| HttpError {
                status: StatusCode::UNAUTHORIZED,
                message: format!("Authentication failed: missing '{name}' header"),
            })
    };

    let actor_id: String = header(ACTOR_ID_HEADER)?;
    let role: String = header(ACTOR_ROLE_HEADER)?;
    AuthenticationService::authenticate(&actor_id, &role)
        .map_err(|err| HttpError::from(ApiError::from(err)))
}

// ============================================================================
// Catalog
// ============================================================================

/// Handler for POST `/services`.
async fn handle_create_service(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CatalogEntryApiRequest>,
) -> Result<Json<CatalogEntryInfo>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(actor_id = actor.id, name = %req.name, "Handling create_service request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CatalogEntryInfo = protown_api::create_service(
        &mut persistence,
        &CreateCatalogEntryRequest { name: req.name },
        &actor,
    )?;
    drop(persistence);

    info!(service_id = response.id, "Created service");
    Ok(Json(response))
}

/// Handler for GET `/services`.
async fn handle_list_services(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListServicesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(protown_api::list_services(&mut persistence)?))
}

/// Handler for POST `/cities`.
async fn handle_create_city(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CatalogEntryApiRequest>,
) -> Result<Json<CatalogEntryInfo>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(actor_id = actor.id, name = %req.name, "Handling create_city request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CatalogEntryInfo = protown_api::create_city(
        &mut persistence,
        &CreateCatalogEntryRequest { name: req.name },
        &actor,
    )?;
    Ok(Json(response))
}

/// Handler for GET `/cities`.
async fn handle_list_cities(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListCitiesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(protown_api::list_cities(&mut persistence)?))
}

/// Handler for POST `/states`.
async fn handle_create_state(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CatalogEntryApiRequest>,
) -> Result<Json<CatalogEntryInfo>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(actor_id = actor.id, name = %req.name, "Handling create_state request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CatalogEntryInfo = protown_api::create_state(
        &mut persistence,
        &CreateCatalogEntryRequest { name: req.name },
        &actor,
    )?;
    Ok(Json(response))
}

/// Handler for GET `/states`.
async fn handle_list_states(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListStatesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(protown_api::list_states(&mut persistence)?))
}

/// Handler for POST `/state_city_pairs`.
async fn handle_link_city_to_state(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<LinkCityToStateApiRequest>,
) -> Result<Json<StateCityPairInfo>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(
        actor_id = actor.id,
        state_id = req.state_id,
        city_id = req.city_id,
        "Handling link_city_to_state request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: StateCityPairInfo = protown_api::link_city_to_state(
        &mut persistence,
        &LinkCityToStateRequest {
            state_id: req.state_id,
            city_id: req.city_id,
        },
        &actor,
    )?;
    Ok(Json(response))
}

/// Handler for POST `/service_city_pairs`.
async fn handle_create_service_city_pair(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateServiceCityPairApiRequest>,
) -> Result<Json<ServiceCityPairInfo>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(
        actor_id = actor.id,
        service_id = req.service_id,
        city_id = req.city_id,
        "Handling create_service_city_pair request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ServiceCityPairInfo = protown_api::create_service_city_pair(
        &mut persistence,
        &CreateServiceCityPairRequest {
            service_id: req.service_id,
            city_id: req.city_id,
        },
        &actor,
    )?;
    drop(persistence);

    info!(
        service_city_pair_id = response.service_city_pair_id,
        "Created service/city pairing"
    );
    Ok(Json(response))
}

/// Handler for GET `/service_city_pairs`.
async fn handle_list_service_city_pairs(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListServiceCityPairsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(protown_api::list_service_city_pairs(&mut persistence)?))
}

// ============================================================================
// Pair Registry
// ============================================================================

/// Handler for GET `/service_city_pairs/{id}/pairs`.
async fn handle_get_pair_roster(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(service_city_pair_id): Path<i64>,
) -> Result<Json<PairRosterResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: PairRosterResponse =
        protown_api::get_pair_roster(&mut persistence, service_city_pair_id, &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/service_city_pairs/{id}/next_pair`.
async fn handle_preview_next_pair(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(service_city_pair_id): Path<i64>,
) -> Result<Json<NextPairResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: NextPairResponse =
        protown_api::preview_next_pair(&mut persistence, service_city_pair_id, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/professional_pairs`.
async fn handle_create_professional_pair(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateProfessionalPairApiRequest>,
) -> Result<Json<ProfessionalPairInfo>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(
        actor_id = actor.id,
        service_city_pair_id = req.service_city_pair_id,
        "Handling create_professional_pair request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ProfessionalPairInfo = protown_api::create_professional_pair(
        &mut persistence,
        &CreateProfessionalPairRequest {
            service_city_pair_id: req.service_city_pair_id,
            professional_id_1: req.professional_id_1,
            professional_id_2: req.professional_id_2,
        },
        &actor,
    )?;
    drop(persistence);

    info!(pair_id = response.pair_id, "Created professional pair");
    Ok(Json(response))
}

/// Handler for DELETE `/professional_pairs/{id}`.
async fn handle_delete_professional_pair(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(pair_id): Path<i64>,
) -> Result<Json<DeleteProfessionalPairResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(actor_id = actor.id, pair_id, "Handling delete_professional_pair request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteProfessionalPairResponse =
        protown_api::delete_professional_pair(&mut persistence, pair_id, &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/professional_pairs`.
async fn handle_list_professional_pairs(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListProfessionalPairsQuery>,
) -> Result<Json<ListProfessionalPairsResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListProfessionalPairsResponse =
        protown_api::list_professional_pairs(&mut persistence, query.service_city_pair_id, &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/professional_pairs/{id}`.
async fn handle_get_professional_pair(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(pair_id): Path<i64>,
) -> Result<Json<ProfessionalPairInfo>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ProfessionalPairInfo =
        protown_api::get_professional_pair(&mut persistence, pair_id, &actor)?;
    Ok(Json(response))
}

// ============================================================================
// Directory
// ============================================================================

/// Handler for POST `/professionals`.
async fn handle_create_professional(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateProfessionalApiRequest>,
) -> Result<Json<ProfessionalInfo>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(actor_id = actor.id, "Handling create_professional request");

    let request: CreateProfessionalRequest = CreateProfessionalRequest {
        name: req.name,
        email: req.email,
        phone_number: req.phone_number,
        business_name: req.business_name,
        service_id: req.service_id,
        state_id: req.state_id,
        city_id: req.city_id,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ProfessionalInfo =
        protown_api::create_professional(&mut persistence, &request, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/professionals/{id}/verification`.
async fn handle_set_professional_verification(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(professional_id): Path<i64>,
    Json(req): Json<SetVerificationApiRequest>,
) -> Result<Json<ProfessionalInfo>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(
        actor_id = actor.id,
        professional_id,
        verified = req.verified,
        "Handling set_professional_verification request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ProfessionalInfo = protown_api::set_professional_verification(
        &mut persistence,
        professional_id,
        &SetProfessionalVerificationRequest {
            verified: req.verified,
        },
        &actor,
    )?;
    Ok(Json(response))
}

/// Handler for POST `/customers`. Sign-up needs no actor headers.
async fn handle_create_customer(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateCustomerApiRequest>,
) -> Result<Json<CustomerInfo>, HttpError> {
    let request: CreateCustomerRequest = CreateCustomerRequest {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        phone_number: req.phone_number,
        address: req.address,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CustomerInfo = protown_api::create_customer(&mut persistence, &request)?;
    drop(persistence);

    info!(customer_id = response.customer_id, "Registered customer");
    Ok(Json(response))
}

// ============================================================================
// Leads
// ============================================================================

/// Handler for POST `/leads`.
async fn handle_create_lead(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateLeadApiRequest>,
) -> Result<Json<LeadResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(
        actor_id = actor.id,
        service_id = req.service_id,
        city_id = req.city_id,
        "Handling create_lead request"
    );

    let request: CreateLeadRequest = CreateLeadRequest {
        service_id: req.service_id,
        city_id: req.city_id,
        state_id: req.state_id,
        description: req.description,
        status: req.status,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: LeadResponse = protown_api::create_lead(&mut persistence, &request, &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/leads`.
async fn handle_list_leads(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListLeadsResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(protown_api::list_leads(&mut persistence, &actor)?))
}

/// Handler for GET `/leads/{id}`.
async fn handle_get_lead(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(lead_id): Path<i64>,
) -> Result<Json<LeadResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(protown_api::get_lead(&mut persistence, lead_id, &actor)?))
}

/// Handler for PUT `/leads/{id}/status`.
async fn handle_update_lead_status(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(lead_id): Path<i64>,
    Json(req): Json<UpdateLeadStatusApiRequest>,
) -> Result<Json<LeadResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(
        actor_id = actor.id,
        lead_id,
        status = %req.status,
        "Handling update_lead_status request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: LeadResponse = protown_api::update_lead_status(
        &mut persistence,
        lead_id,
        &UpdateLeadStatusRequest { status: req.status },
        &actor,
    )?;
    Ok(Json(response))
}

/// Handler for DELETE `/leads/{id}`.
async fn handle_delete_lead(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(lead_id): Path<i64>,
) -> Result<Json<DeleteLeadResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(actor_id = actor.id, lead_id, "Handling delete_lead request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteLeadResponse = protown_api::delete_lead(&mut persistence, lead_id, &actor)?;
    Ok(Json(response))
}

// ============================================================================
// Reports
// ============================================================================

/// Handler for GET `/analytics/pairs/utilization`.
async fn handle_pair_utilization(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<LeadReportQuery>,
) -> Result<Json<PairUtilizationResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    let request: LeadReportRequest = query.into();

    let mut persistence = app_state.persistence.lock().await;
    let response: PairUtilizationResponse =
        protown_api::pair_utilization(&mut persistence, &request, &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/analytics/leads/status_breakdown`.
async fn handle_lead_status_breakdown(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<LeadReportQuery>,
) -> Result<Json<LeadStatusBreakdownResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    let request: LeadReportRequest = query.into();

    let mut persistence = app_state.persistence.lock().await;
    let response: LeadStatusBreakdownResponse =
        protown_api::lead_status_breakdown(&mut persistence, &request, &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route(
            "/services",
            post(handle_create_service).get(handle_list_services),
        )
        .route("/cities", post(handle_create_city).get(handle_list_cities))
        .route("/states", post(handle_create_state).get(handle_list_states))
        .route("/state_city_pairs", post(handle_link_city_to_state))
        .route(
            "/service_city_pairs",
            post(handle_create_service_city_pair).get(handle_list_service_city_pairs),
        )
        .route(
            "/service_city_pairs/{id}/pairs",
            get(handle_get_pair_roster),
        )
        .route(
            "/service_city_pairs/{id}/next_pair",
            get(handle_preview_next_pair),
        )
        .route(
            "/professional_pairs",
            post(handle_create_professional_pair).get(handle_list_professional_pairs),
        )
        .route(
            "/professional_pairs/{id}",
            get(handle_get_professional_pair).delete(handle_delete_professional_pair),
        )
        .route("/professionals", post(handle_create_professional))
        .route(
            "/professionals/{id}/verification",
            post(handle_set_professional_verification),
        )
        .route("/customers", post(handle_create_customer))
        .route("/leads", post(handle_create_lead).get(handle_list_leads))
        .route(
            "/leads/{id}",
            get(handle_get_lead).delete(handle_delete_lead),
        )
        .route("/leads/{id}/status", put(handle_update_lead_status))
        .route("/analytics/pairs/utilization", get(handle_pair_utilization))
        .route(
            "/analytics/leads/status_breakdown",
            get(handle_lead_status_breakdown),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing ProTown Server");

    let config: ServerConfig = ServerConfig::from_args(args)?;
    let persistence: Persistence = config.open_persistence()?;

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };
    let app: Router = build_router(app_state);

    info!("Server listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
