use sqlx::{Pool, Sqlite};

use crate::{
    dao::covid::CovidDao,
    model::{
        apperror::ApplicationError,
        models::{DistrictDetailType, DistrictUpsertInputType, StateDetailType, StateStatsType},
    },
};

/**
 * Represents the service for state and district case data. Every operation
 * issues exactly one SQL statement, so no transaction handling is needed.
 */
pub struct CovidService {
    /**
     * The DAO for state and district operations.
     */
    covid_dao: CovidDao,
    /**
     * Connection pool for database operations, created once at startup and
     * shared by all request handlers.
     */
    connection_pool: Pool<Sqlite>,
}

impl CovidService {
    /**
     * Creates a new instance of `CovidService`.
     *
     * # Arguments
     * `covid_dao`: The DAO for state and district operations.
     * `connection_pool`: Connection pool for database operations.
     *
     * # Returns
     * A new instance of `CovidService`.
     */
    pub fn new(covid_dao: CovidDao, connection_pool: Pool<Sqlite>) -> Self {
        CovidService { covid_dao, connection_pool }
    }

    /**
     * Retrieves all states.
     *
     * # Returns
     * A Result containing all state rows or an `ApplicationError`.
     */
    pub async fn get_state_list(&self) -> Result<Vec<StateDetailType>, ApplicationError> {
        self.covid_dao.get_state_list(&self.connection_pool).await
    }

    /**
     * Retrieves a single state by its ID.
     *
     * # Arguments
     * `state_id`: The ID of the state to retrieve.
     *
     * # Returns
     * A Result containing the state row if it exists, or an `ApplicationError`.
     */
    pub async fn get_state(&self, state_id: i64) -> Result<Option<StateDetailType>, ApplicationError> {
        self.covid_dao.get_state(&self.connection_pool, state_id).await
    }

    /**
     * Adds a new district.
     *
     * # Arguments
     * `district_upsert_input`: The input containing details of the district to be added.
     *
     * # Returns
     * A Result containing the database-assigned district ID or an `ApplicationError`.
     */
    pub async fn add_district(&self, district_upsert_input: DistrictUpsertInputType) -> Result<i64, ApplicationError> {
        self.covid_dao.add_district(&self.connection_pool, district_upsert_input).await
    }

    /**
     * Retrieves a single district by its ID.
     *
     * # Arguments
     * `district_id`: The ID of the district to retrieve.
     *
     * # Returns
     * A Result containing the district row if it exists, or an `ApplicationError`.
     */
    pub async fn get_district(&self, district_id: i64) -> Result<Option<DistrictDetailType>, ApplicationError> {
        self.covid_dao.get_district(&self.connection_pool, district_id).await
    }

    /**
     * Deletes a district by its ID.
     *
     * # Arguments
     * `district_id`: The ID of the district to be deleted.
     *
     * # Returns
     * A Result indicating success or an `ApplicationError`.
     */
    pub async fn delete_district(&self, district_id: i64) -> Result<(), ApplicationError> {
        self.covid_dao.delete_district(&self.connection_pool, district_id).await
    }

    /**
     * Updates all mutable fields of a district.
     *
     * # Arguments
     * `district_id`: The ID of the district to be updated.
     * `district_upsert_input`: The input containing updated details of the district.
     *
     * # Returns
     * A Result indicating success or an `ApplicationError`.
     */
    pub async fn update_district(&self, district_id: i64, district_upsert_input: DistrictUpsertInputType) -> Result<(), ApplicationError> {
        self.covid_dao.update_district(&self.connection_pool, district_id, district_upsert_input).await
    }

    /**
     * Sums the case counts across all districts of a state.
     *
     * # Arguments
     * `state_id`: The ID of the state to aggregate over.
     *
     * # Returns
     * A Result containing the aggregated totals or an `ApplicationError`.
     */
    pub async fn get_state_stats(&self, state_id: i64) -> Result<StateStatsType, ApplicationError> {
        self.covid_dao.get_state_stats(&self.connection_pool, state_id).await
    }

    /**
     * Retrieves the name of the state a district belongs to.
     *
     * # Arguments
     * `district_id`: The ID of the district.
     *
     * # Returns
     * A Result containing the owning state's name if the district exists, or
     * an `ApplicationError`.
     */
    pub async fn get_district_state_name(&self, district_id: i64) -> Result<Option<String>, ApplicationError> {
        self.covid_dao.get_district_state_name(&self.connection_pool, district_id).await
    }
}
