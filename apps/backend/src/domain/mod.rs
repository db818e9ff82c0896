//! Storage- and HTTP-independent types shared by repos, services and routes.

pub mod city;
pub mod country;
pub mod page;

pub use city::{City, CityDetails, CitySort};
pub use country::{Country, CountryDetails, CountrySort};
pub use page::{Page, PageSpec, SortDirection, SortOrder, SortProperty};
