use actix_web::{
    delete, get, post, put,
    web::{self, Path},
    HttpResponse,
};
use tracing::{instrument, Instrument};

use crate::{
    api::{
        rest::{DistrictDetailsResponse, DistrictResponse, DistrictUpsertRequest, MessageResponse, StateResponse, StateStatsResponse},
        state::AppState,
    },
    model::{
        apperror::{ApplicationError, ErrorType},
        models::DistrictUpsertInputType,
    },
};

/**
 * Endpoint to retrieve all states.
 */
#[instrument(level = "info", skip(app_state), fields(service = "listStates", result))]
#[get("/states/")]
pub async fn states_list(app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let states = app_state.covid_service.get_state_list().instrument(span).await?;
    let response: Vec<StateResponse> = states.into_iter().map(StateResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/**
 * Endpoint to retrieve a single state by its ID.
 */
#[instrument(level = "info", skip(app_state), fields(service = "getState", result))]
#[get("/states/{stateId}/")]
pub async fn state_get(path: Path<i64>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let state_id = path.into_inner();
    let state = app_state
        .covid_service
        .get_state(state_id)
        .instrument(span)
        .await?
        .ok_or_else(|| ApplicationError::new(ErrorType::NotFound, "State not found".to_string()))?;
    Ok(HttpResponse::Ok().json(StateResponse::from(state)))
}

/**
 * Endpoint to sum the case counts across all districts of a state. A state
 * with no districts yields null totals rather than zeros.
 */
#[instrument(level = "info", skip(app_state), fields(service = "getStateStats", result))]
#[get("/states/{stateId}/stats/")]
pub async fn state_stats(path: Path<i64>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let state_id = path.into_inner();
    let stats = app_state.covid_service.get_state_stats(state_id).instrument(span).await?;
    Ok(HttpResponse::Ok().json(StateStatsResponse::from(stats)))
}

/**
 * Endpoint to add a new district. The district id is assigned by the
 * database. Body fields are passed through without validation.
 */
#[instrument(level = "info", skip(app_state, request_body), fields(service = "addDistrict", result))]
#[post("/districts/")]
pub async fn district_add(request_body: web::Json<DistrictUpsertRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let district_upsert_input = DistrictUpsertInputType::from(request_body.into_inner());
    let district_id = app_state.covid_service.add_district(district_upsert_input).instrument(span).await?;
    tracing::debug!("Added district with ID {}", district_id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("District Successfully Added")))
}

/**
 * Endpoint to retrieve a single district by its ID.
 */
#[instrument(level = "info", skip(app_state), fields(service = "getDistrict", result))]
#[get("/districts/{districtId}/")]
pub async fn district_get(path: Path<i64>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let district_id = path.into_inner();
    let district = app_state
        .covid_service
        .get_district(district_id)
        .instrument(span)
        .await?
        .ok_or_else(|| ApplicationError::new(ErrorType::InvalidRequest, "District not found".to_string()))?;
    Ok(HttpResponse::Ok().json(DistrictResponse::from(district)))
}

/**
 * Endpoint to delete a district by its ID. Deleting an id with no matching
 * row still reports success.
 */
#[instrument(level = "info", skip(app_state), fields(service = "deleteDistrict", result))]
#[delete("/districts/{districtId}/")]
pub async fn district_delete(path: Path<i64>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let district_id = path.into_inner();
    app_state.covid_service.delete_district(district_id).instrument(span).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("District Removed")))
}

/**
 * Endpoint to update all mutable fields of a district. Updating an id with
 * no matching row still reports success.
 */
#[instrument(level = "info", skip(app_state, request_body), fields(service = "updateDistrict", result))]
#[put("/districts/{districtId}/")]
pub async fn district_update(path: Path<i64>, request_body: web::Json<DistrictUpsertRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let district_id = path.into_inner();
    let district_upsert_input = DistrictUpsertInputType::from(request_body.into_inner());
    app_state.covid_service.update_district(district_id, district_upsert_input).instrument(span).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("District Details Updated")))
}

/**
 * Endpoint to retrieve the name of the state a district belongs to.
 */
#[instrument(level = "info", skip(app_state), fields(service = "getDistrictDetails", result))]
#[get("/districts/{districtId}/details/")]
pub async fn district_details(path: Path<i64>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let district_id = path.into_inner();
    let state_name = app_state
        .covid_service
        .get_district_state_name(district_id)
        .instrument(span)
        .await?
        .ok_or_else(|| ApplicationError::new(ErrorType::InvalidRequest, "District not found".to_string()))?;
    Ok(HttpResponse::Ok().json(DistrictDetailsResponse { state_name }))
}
