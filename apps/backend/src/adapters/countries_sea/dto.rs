//! DTOs for countries_sea adapter.

/// DTO for inserting a new country.
#[derive(Debug, Clone, Default)]
pub struct CountryCreate {
    pub name: Option<String>,
    pub code: Option<String>,
}

/// DTO for overwriting an existing country.
#[derive(Debug, Clone)]
pub struct CountryUpdate {
    pub id: i64,
    pub name: Option<String>,
    pub code: Option<String>,
}
