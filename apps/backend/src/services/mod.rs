//! Domain services orchestrating repository calls.

pub mod cities;
pub mod countries;

pub use cities::CityService;
pub use countries::CountryService;
