pub mod cities;
pub mod countries;
