use super::page::SortProperty;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub id: i64,
    pub name: Option<String>,
    pub code: Option<String>,
}

/// Mutable fields of a country. Applied as a full overwrite on update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryDetails {
    pub name: Option<String>,
    pub code: Option<String>,
}

impl CountryDetails {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            code: Some(code.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountrySort {
    Id,
    Name,
    Code,
}

impl SortProperty for CountrySort {
    const ENTITY: &'static str = "Country";

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "code" => Some(Self::Code),
            _ => None,
        }
    }
}
