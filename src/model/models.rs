/**
 * A single state row as stored in the database.
 */
pub struct StateDetailType {
    pub state_id: i64,
    pub state_name: String,
    pub population: i64,
}

impl StateDetailType {
    pub fn new(state_id: i64, state_name: String, population: i64) -> Self {
        StateDetailType { state_id, state_name, population }
    }
}

/**
 * A single district row as stored in the database.
 */
pub struct DistrictDetailType {
    pub district_id: i64,
    pub district_name: String,
    pub state_id: i64,
    pub cases: i64,
    pub cured: i64,
    pub active: i64,
    pub deaths: i64,
}

impl DistrictDetailType {
    pub fn new(district_id: i64, district_name: String, state_id: i64, cases: i64, cured: i64, active: i64, deaths: i64) -> Self {
        DistrictDetailType { district_id, district_name, state_id, cases, cured, active, deaths }
    }
}

/**
 * Input for creating or updating a district. The district id is assigned by
 * the database on insert and taken from the path on update.
 */
pub struct DistrictUpsertInputType {
    pub district_name: String,
    pub state_id: i64,
    pub cases: i64,
    pub cured: i64,
    pub active: i64,
    pub deaths: i64,
}

impl DistrictUpsertInputType {
    pub fn new(district_name: String, state_id: i64, cases: i64, cured: i64, active: i64, deaths: i64) -> Self {
        DistrictUpsertInputType { district_name, state_id, cases, cured, active, deaths }
    }
}

/**
 * Aggregated case counts across all districts of one state.
 *
 * Each total is the SUM aggregate over the state's districts. A state with
 * no districts yields None for every field, which serializes as null.
 */
pub struct StateStatsType {
    pub total_cases: Option<i64>,
    pub total_cured: Option<i64>,
    pub total_active: Option<i64>,
    pub total_deaths: Option<i64>,
}

impl StateStatsType {
    pub fn new(total_cases: Option<i64>, total_cured: Option<i64>, total_active: Option<i64>, total_deaths: Option<i64>) -> Self {
        StateStatsType { total_cases, total_cured, total_active, total_deaths }
    }
}
