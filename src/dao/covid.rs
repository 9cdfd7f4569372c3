use sqlx::{Pool, Sqlite};
use tracing::{Instrument, instrument};

use crate::model::{
    apperror::{ApplicationError, ErrorType},
    models::{DistrictDetailType, DistrictUpsertInputType, StateDetailType, StateStatsType},
};

/**
 * Database response type for querying a state row.
 */
pub type QueryStateDbResp = (i64, String, i64);

/**
 * Database response type for querying a district row.
 */
pub type QueryDistrictDbResp = (i64, String, i64, i64, i64, i64, i64);

/**
 * Database response type for the state statistics aggregate. SUM over an
 * empty set is NULL, hence every column is optional.
 */
pub type QueryStateStatsDbResp = (Option<i64>, Option<i64>, Option<i64>, Option<i64>);

/**
 * SQL query to retrieve all states.
 */
const QUERY_STATE_LIST: &str = "SELECT state_id, state_name, population FROM state ORDER BY state_id";

/**
 * SQL query to retrieve a single state by its ID.
 */
const QUERY_STATE: &str = "SELECT state_id, state_name, population FROM state WHERE state_id = ?";

/**
 * SQL query to add a new district. The district id is assigned by the
 * database.
 */
const ADD_DISTRICT: &str = "INSERT INTO district (district_name, state_id, cases, cured, active, deaths) VALUES (?, ?, ?, ?, ?, ?)";

/**
 * SQL query to retrieve a single district by its ID.
 */
const QUERY_DISTRICT: &str = "SELECT district_id, district_name, state_id, cases, cured, active, deaths FROM district WHERE district_id = ?";

/**
 * SQL query to delete a district.
 */
const DELETE_DISTRICT: &str = "DELETE FROM district WHERE district_id = ?";

/**
 * SQL query to update all mutable fields of a district.
 */
const UPDATE_DISTRICT: &str = "UPDATE district SET district_name = ?, state_id = ?, cases = ?, cured = ?, active = ?, deaths = ? WHERE district_id = ?";

/**
 * SQL query to sum the case counts across all districts of a state.
 */
const QUERY_STATE_STATS: &str = "SELECT SUM(cases), SUM(cured), SUM(active), SUM(deaths) FROM district WHERE state_id = ?";

/**
 * SQL query to retrieve the name of the state a district belongs to.
 */
const QUERY_DISTRICT_STATE_NAME: &str = "SELECT state.state_name FROM district INNER JOIN state ON district.state_id = state.state_id WHERE district.district_id = ?";

/**
 * DAO for state and district database operations.
 */
pub struct CovidDao {}

impl CovidDao {
    /**
     * Creates a new instance of `CovidDao`.
     *
     * # Returns
     * A new instance of `CovidDao`.
     */
    pub fn new() -> Self {
        CovidDao {}
    }

    /**
     * Retrieves all states.
     *
     * # Arguments
     * `connection_pool`: The database connection pool.
     *
     * # Returns
     * A Result containing all state rows or an `ApplicationError`.
     */
    #[instrument(skip(self, connection_pool), fields(result))]
    pub async fn get_state_list(&self, connection_pool: &Pool<Sqlite>) -> Result<Vec<StateDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryStateDbResp> = sqlx::query_as(QUERY_STATE_LIST)
            .fetch_all(connection_pool)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get state list: {err}")))?;
        Ok(results.into_iter().map(|(state_id, state_name, population)| StateDetailType::new(state_id, state_name, population)).collect())
    }

    /**
     * Retrieves a single state by its ID.
     *
     * # Arguments
     * `connection_pool`: The database connection pool.
     * `state_id`: The ID of the state to retrieve.
     *
     * # Returns
     * A Result containing the state row if it exists, or an `ApplicationError`.
     */
    #[instrument(skip(self, connection_pool), fields(result))]
    pub async fn get_state(&self, connection_pool: &Pool<Sqlite>, state_id: i64) -> Result<Option<StateDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let result: Option<QueryStateDbResp> = sqlx::query_as(QUERY_STATE)
            .bind(state_id)
            .fetch_optional(connection_pool)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get state: {err}")))?;
        Ok(result.map(|(state_id, state_name, population)| StateDetailType::new(state_id, state_name, population)))
    }

    /**
     * Adds a new district to the database.
     *
     * # Arguments
     * `connection_pool`: The database connection pool.
     * `district_upsert_input`: The input containing details of the district to be added.
     *
     * # Returns
     * A Result containing the database-assigned district ID or an `ApplicationError`.
     */
    #[instrument(skip(self, connection_pool, district_upsert_input), fields(result))]
    pub async fn add_district(&self, connection_pool: &Pool<Sqlite>, district_upsert_input: DistrictUpsertInputType) -> Result<i64, ApplicationError> {
        let span = tracing::Span::current();
        let result = sqlx::query(ADD_DISTRICT)
            .bind(district_upsert_input.district_name)
            .bind(district_upsert_input.state_id)
            .bind(district_upsert_input.cases)
            .bind(district_upsert_input.cured)
            .bind(district_upsert_input.active)
            .bind(district_upsert_input.deaths)
            .execute(connection_pool)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to add district: {err}")))?;
        Ok(result.last_insert_rowid())
    }

    /**
     * Retrieves a single district by its ID.
     *
     * # Arguments
     * `connection_pool`: The database connection pool.
     * `district_id`: The ID of the district to retrieve.
     *
     * # Returns
     * A Result containing the district row if it exists, or an `ApplicationError`.
     */
    #[instrument(skip(self, connection_pool), fields(result))]
    pub async fn get_district(&self, connection_pool: &Pool<Sqlite>, district_id: i64) -> Result<Option<DistrictDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let result: Option<QueryDistrictDbResp> = sqlx::query_as(QUERY_DISTRICT)
            .bind(district_id)
            .fetch_optional(connection_pool)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get district: {err}")))?;
        Ok(result.map(|(district_id, district_name, state_id, cases, cured, active, deaths)| DistrictDetailType::new(district_id, district_name, state_id, cases, cured, active, deaths)))
    }

    /**
     * Deletes a district from the database by its ID. Deleting an ID with no
     * matching row is not an error.
     *
     * # Arguments
     * `connection_pool`: The database connection pool.
     * `district_id`: The ID of the district to be deleted.
     *
     * # Returns
     * A result indicating success or failure of the operation.
     */
    #[instrument(skip(self, connection_pool), fields(result))]
    pub async fn delete_district(&self, connection_pool: &Pool<Sqlite>, district_id: i64) -> Result<(), ApplicationError> {
        let span = tracing::Span::current();
        let result = sqlx::query(DELETE_DISTRICT)
            .bind(district_id)
            .execute(connection_pool)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to delete district: {err}")))?;
        if result.rows_affected() == 0 {
            tracing::debug!("District with ID {} not found for deletion", district_id);
        }
        Ok(())
    }

    /**
     * Updates all mutable fields of a district. Updating an ID with no
     * matching row is not an error.
     *
     * # Arguments
     * `connection_pool`: The database connection pool.
     * `district_id`: The ID of the district to be updated.
     * `district_upsert_input`: The input containing updated details of the district.
     *
     * # Returns
     * A result indicating success or failure of the operation.
     */
    #[instrument(skip(self, connection_pool, district_upsert_input), fields(result))]
    pub async fn update_district(&self, connection_pool: &Pool<Sqlite>, district_id: i64, district_upsert_input: DistrictUpsertInputType) -> Result<(), ApplicationError> {
        let span = tracing::Span::current();
        let result = sqlx::query(UPDATE_DISTRICT)
            .bind(district_upsert_input.district_name)
            .bind(district_upsert_input.state_id)
            .bind(district_upsert_input.cases)
            .bind(district_upsert_input.cured)
            .bind(district_upsert_input.active)
            .bind(district_upsert_input.deaths)
            .bind(district_id)
            .execute(connection_pool)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to update district: {err}")))?;
        if result.rows_affected() == 0 {
            tracing::debug!("District with ID {} not found for update", district_id);
        }
        Ok(())
    }

    /**
     * Sums the case counts across all districts of a state.
     *
     * # Arguments
     * `connection_pool`: The database connection pool.
     * `state_id`: The ID of the state to aggregate over.
     *
     * # Returns
     * A Result containing the aggregated totals or an `ApplicationError`.
     * A state with no districts yields None for every total.
     */
    #[instrument(skip(self, connection_pool), fields(result))]
    pub async fn get_state_stats(&self, connection_pool: &Pool<Sqlite>, state_id: i64) -> Result<StateStatsType, ApplicationError> {
        let span = tracing::Span::current();
        let result: QueryStateStatsDbResp = sqlx::query_as(QUERY_STATE_STATS)
            .bind(state_id)
            .fetch_one(connection_pool)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get state stats: {err}")))?;
        let (total_cases, total_cured, total_active, total_deaths) = result;
        Ok(StateStatsType::new(total_cases, total_cured, total_active, total_deaths))
    }

    /**
     * Retrieves the name of the state a district belongs to.
     *
     * # Arguments
     * `connection_pool`: The database connection pool.
     * `district_id`: The ID of the district.
     *
     * # Returns
     * A Result containing the owning state's name if the district exists, or
     * an `ApplicationError`.
     */
    #[instrument(skip(self, connection_pool), fields(result))]
    pub async fn get_district_state_name(&self, connection_pool: &Pool<Sqlite>, district_id: i64) -> Result<Option<String>, ApplicationError> {
        let span = tracing::Span::current();
        let result: Option<(String,)> = sqlx::query_as(QUERY_DISTRICT_STATE_NAME)
            .bind(district_id)
            .fetch_optional(connection_pool)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get district details: {err}")))?;
        Ok(result.map(|(state_name,)| state_name))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /**
     * Creates an in-memory database with the production schema and two
     * seeded states.
     */
    async fn init_db() -> Pool<Sqlite> {
        let pool = SqlitePoolOptions::new().max_connections(1).connect("sqlite::memory:").await.unwrap();
        sqlx::query("CREATE TABLE state (state_id INTEGER PRIMARY KEY, state_name TEXT, population INTEGER)").execute(&pool).await.unwrap();
        sqlx::query("CREATE TABLE district (district_id INTEGER PRIMARY KEY AUTOINCREMENT, district_name TEXT, state_id INTEGER, cases INTEGER, cured INTEGER, active INTEGER, deaths INTEGER)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO state (state_id, state_name, population) VALUES (1, 'Kerala', 35000000), (2, 'Goa', 1500000)").execute(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_get_state_list() {
        let pool = init_db().await;
        let covid_dao = CovidDao::new();
        let states = covid_dao.get_state_list(&pool).await.unwrap();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].state_name, "Kerala");
        assert_eq!(states[1].population, 1500000);
    }

    #[tokio::test]
    async fn test_get_state() {
        let pool = init_db().await;
        let covid_dao = CovidDao::new();
        let state = covid_dao.get_state(&pool, 1).await.unwrap().unwrap();
        assert_eq!(state.state_id, 1);
        assert_eq!(state.state_name, "Kerala");
        assert_eq!(state.population, 35000000);
        assert!(covid_dao.get_state(&pool, 99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_then_get_district() {
        let pool = init_db().await;
        let covid_dao = CovidDao::new();
        let district_id = covid_dao.add_district(&pool, DistrictUpsertInputType::new("Ernakulam".to_string(), 1, 100, 80, 15, 5)).await.unwrap();
        let district = covid_dao.get_district(&pool, district_id).await.unwrap().unwrap();
        assert_eq!(district.district_name, "Ernakulam");
        assert_eq!(district.state_id, 1);
        assert_eq!(district.cases, 100);
        assert_eq!(district.cured, 80);
        assert_eq!(district.active, 15);
        assert_eq!(district.deaths, 5);
    }

    #[tokio::test]
    async fn test_update_district() {
        let pool = init_db().await;
        let covid_dao = CovidDao::new();
        let district_id = covid_dao.add_district(&pool, DistrictUpsertInputType::new("Ernakulam".to_string(), 1, 100, 80, 15, 5)).await.unwrap();
        covid_dao.update_district(&pool, district_id, DistrictUpsertInputType::new("Kochi".to_string(), 2, 200, 150, 40, 10)).await.unwrap();
        let district = covid_dao.get_district(&pool, district_id).await.unwrap().unwrap();
        assert_eq!(district.district_name, "Kochi");
        assert_eq!(district.state_id, 2);
        assert_eq!(district.cases, 200);
    }

    #[tokio::test]
    async fn test_update_nonexistent_district_succeeds() {
        let pool = init_db().await;
        let covid_dao = CovidDao::new();
        let result = covid_dao.update_district(&pool, 42, DistrictUpsertInputType::new("Kochi".to_string(), 2, 200, 150, 40, 10)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_district() {
        let pool = init_db().await;
        let covid_dao = CovidDao::new();
        let district_id = covid_dao.add_district(&pool, DistrictUpsertInputType::new("Ernakulam".to_string(), 1, 100, 80, 15, 5)).await.unwrap();
        covid_dao.delete_district(&pool, district_id).await.unwrap();
        assert!(covid_dao.get_district(&pool, district_id).await.unwrap().is_none());
        // Deleting an id with no row is still a success.
        assert!(covid_dao.delete_district(&pool, district_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_state_stats() {
        let pool = init_db().await;
        let covid_dao = CovidDao::new();
        covid_dao.add_district(&pool, DistrictUpsertInputType::new("Ernakulam".to_string(), 1, 3, 2, 1, 0)).await.unwrap();
        covid_dao.add_district(&pool, DistrictUpsertInputType::new("Thrissur".to_string(), 1, 5, 4, 1, 0)).await.unwrap();
        let stats = covid_dao.get_state_stats(&pool, 1).await.unwrap();
        assert_eq!(stats.total_cases, Some(8));
        assert_eq!(stats.total_cured, Some(6));
        assert_eq!(stats.total_active, Some(2));
        assert_eq!(stats.total_deaths, Some(0));
    }

    #[tokio::test]
    async fn test_get_state_stats_no_districts() {
        let pool = init_db().await;
        let covid_dao = CovidDao::new();
        let stats = covid_dao.get_state_stats(&pool, 2).await.unwrap();
        assert_eq!(stats.total_cases, None);
        assert_eq!(stats.total_cured, None);
        assert_eq!(stats.total_active, None);
        assert_eq!(stats.total_deaths, None);
    }

    #[tokio::test]
    async fn test_get_district_state_name() {
        let pool = init_db().await;
        let covid_dao = CovidDao::new();
        let district_id = covid_dao.add_district(&pool, DistrictUpsertInputType::new("Panaji".to_string(), 2, 10, 8, 2, 0)).await.unwrap();
        let state_name = covid_dao.get_district_state_name(&pool, district_id).await.unwrap();
        assert_eq!(state_name, Some("Goa".to_string()));
        assert!(covid_dao.get_district_state_name(&pool, 99).await.unwrap().is_none());
    }
}
