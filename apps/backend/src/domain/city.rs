use super::country::Country;
use super::page::SortProperty;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub id: i64,
    pub name: Option<String>,
    pub country: Option<Country>,
}

impl City {
    pub fn country_id(&self) -> Option<i64> {
        self.country.as_ref().map(|c| c.id)
    }
}

/// Mutable fields of a city. Applied as a full overwrite on update, so a
/// `None` country detaches the city.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityDetails {
    pub name: Option<String>,
    pub country_id: Option<i64>,
}

impl CityDetails {
    pub fn new(name: impl Into<String>, country_id: Option<i64>) -> Self {
        Self {
            name: Some(name.into()),
            country_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitySort {
    Id,
    Name,
    /// Orders by the referenced country id
    Country,
}

impl SortProperty for CitySort {
    const ENTITY: &'static str = "City";

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "country" => Some(Self::Country),
            _ => None,
        }
    }
}
