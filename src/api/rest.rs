use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::model::{
    apperror::{ApplicationError, ErrorType},
    models::{DistrictDetailType, DistrictUpsertInputType, StateDetailType, StateStatsType},
};

/***************** State models *********************/

/**
 * Response structure for a single state.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    /**
     * The unique identifier for the state.
     */
    pub state_id: i64,
    /**
     * The name of the state.
     */
    pub state_name: String,
    /**
     * The population of the state.
     */
    pub population: i64,
}

/**
 * Converts from the internal state row type to the API response shape.
 */
impl From<StateDetailType> for StateResponse {
    fn from(state: StateDetailType) -> Self {
        StateResponse { state_id: state.state_id, state_name: state.state_name, population: state.population }
    }
}

/**
 * Response structure for the aggregated case counts of one state. A state
 * with no districts serializes every total as null.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateStatsResponse {
    pub total_cases: Option<i64>,
    pub total_cured: Option<i64>,
    pub total_active: Option<i64>,
    pub total_deaths: Option<i64>,
}

impl From<StateStatsType> for StateStatsResponse {
    fn from(stats: StateStatsType) -> Self {
        StateStatsResponse { total_cases: stats.total_cases, total_cured: stats.total_cured, total_active: stats.total_active, total_deaths: stats.total_deaths }
    }
}

/***************** District models *********************/

/**
 * Request structure for creating or updating a district. Fields are passed
 * through to the database without validation.
 */
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictUpsertRequest {
    pub district_name: String,
    pub state_id: i64,
    pub cases: i64,
    pub cured: i64,
    pub active: i64,
    pub deaths: i64,
}

/**
 * Converts the request body into the service-level input type.
 */
impl From<DistrictUpsertRequest> for DistrictUpsertInputType {
    fn from(request: DistrictUpsertRequest) -> Self {
        DistrictUpsertInputType::new(request.district_name, request.state_id, request.cases, request.cured, request.active, request.deaths)
    }
}

/**
 * Response structure for a single district.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictResponse {
    /**
     * The unique identifier for the district, assigned by the database.
     */
    pub district_id: i64,
    /**
     * The name of the district.
     */
    pub district_name: String,
    /**
     * The ID of the state the district belongs to.
     */
    pub state_id: i64,
    /**
     * Total number of cases.
     */
    pub cases: i64,
    /**
     * Number of cured cases.
     */
    pub cured: i64,
    /**
     * Number of active cases.
     */
    pub active: i64,
    /**
     * Number of deaths.
     */
    pub deaths: i64,
}

/**
 * Converts from the internal district row type to the API response shape.
 */
impl From<DistrictDetailType> for DistrictResponse {
    fn from(district: DistrictDetailType) -> Self {
        DistrictResponse {
            district_id: district.district_id,
            district_name: district.district_name,
            state_id: district.state_id,
            cases: district.cases,
            cured: district.cured,
            active: district.active,
            deaths: district.deaths,
        }
    }
}

/**
 * Response structure for the district details endpoint, carrying only the
 * owning state's name.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictDetailsResponse {
    pub state_name: String,
}

/***************** Common models *********************/

/**
 * Confirmation response for write operations.
 */
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /**
     * Creates a new instance of MessageResponse.
     *
     * # Arguments
     * `message`: The confirmation text.
     */
    pub fn new(message: &str) -> Self {
        MessageResponse { message: message.to_string() }
    }
}

/***************** Error models *********************/

/**
 * Custom error response for the application.
 */
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /**
     * The error code associated with the error type.
     */
    pub code: u16,
    /**
     * A human-readable message describing the error.
     */
    pub message: String,
}

impl ResponseError for ApplicationError {
    /**
     * Generates an error response for the application error.
     */
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse { code: get_error_code(&self.error_type), message: self.message.clone() };
        HttpResponse::build(get_statuscode(&self.error_type)).json(&error_response)
    }
}

/**
* Maps application errors to HTTP status codes.
*
* Missing states surface as 404 while missing districts surface as 400. The
* original service behaved this way and clients depend on it.
*
* # Arguments
* `application_error`: The type of error that occurred.
*
* # Returns
* The corresponding HTTP status code.
*/
fn get_statuscode(application_error: &ErrorType) -> StatusCode {
    match application_error {
        ErrorType::Initialization => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorType::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorType::NotFound => StatusCode::NOT_FOUND,
        ErrorType::InvalidRequest => StatusCode::BAD_REQUEST,
    }
}

/**
 * Maps application errors to error codes.
 *
 * # Arguments
 * `application_error`: The type of error that occurred.
 *
 * # Returns
 * The corresponding error code.
 */
fn get_error_code(application_error: &ErrorType) -> u16 {
    match application_error {
        ErrorType::Initialization => 1001,
        ErrorType::DatabaseError => 1003,
        ErrorType::NotFound => 1004,
        ErrorType::InvalidRequest => 1005,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_statuscode_mapping() {
        assert_eq!(get_statuscode(&ErrorType::Initialization), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(get_statuscode(&ErrorType::DatabaseError), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(get_statuscode(&ErrorType::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(get_statuscode(&ErrorType::InvalidRequest), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_state_response_camel_case() {
        let response = StateResponse::from(StateDetailType::new(1, "Kerala".to_string(), 35000000));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["stateId"], 1);
        assert_eq!(json["stateName"], "Kerala");
        assert_eq!(json["population"], 35000000);
    }

    #[test]
    fn test_district_response_camel_case() {
        let response = DistrictResponse::from(DistrictDetailType::new(7, "Ernakulam".to_string(), 1, 100, 80, 15, 5));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["districtId"], 7);
        assert_eq!(json["districtName"], "Ernakulam");
        assert_eq!(json["stateId"], 1);
        assert_eq!(json["cases"], 100);
    }

    #[test]
    fn test_state_stats_response_nulls_for_empty_state() {
        let response = StateStatsResponse::from(StateStatsType::new(None, None, None, None));
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["totalCases"].is_null());
        assert!(json["totalCured"].is_null());
        assert!(json["totalActive"].is_null());
        assert!(json["totalDeaths"].is_null());
    }
}
