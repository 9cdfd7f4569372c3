use crate::service::covid::CovidService;

/**
* Represents the application state shared across the Actix web application.
*/
pub struct AppState {
    /**
     * The service for state and district case data.
     */
    pub covid_service: CovidService,
}

/**
 * Creates a new instance of `AppState`.
 *
 * # Arguments
 * `covid_service`: The service for state and district case data.
 */
impl AppState {
    pub fn new(covid_service: CovidService) -> Self {
        AppState { covid_service }
    }
}
