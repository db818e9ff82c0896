//! DTOs for cities_sea adapter.

/// DTO for inserting a new city.
#[derive(Debug, Clone, Default)]
pub struct CityCreate {
    pub name: Option<String>,
    pub country_id: Option<i64>,
}

/// DTO for overwriting an existing city.
#[derive(Debug, Clone)]
pub struct CityUpdate {
    pub id: i64,
    pub name: Option<String>,
    pub country_id: Option<i64>,
}
