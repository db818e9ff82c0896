//! Error codes for the Atlas backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Atlas backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// General validation error
    ValidationError,
    /// General bad request error (malformed body, bad path segment)
    BadRequest,
    /// Unknown sort property or direction in a page request
    InvalidSort,

    // Resource Not Found
    /// Country not found
    CountryNotFound,
    /// City not found
    CityNotFound,
    /// General not found error
    NotFound,

    // Infrastructure
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Configuration error
    ConfigError,
    /// Internal server error
    Internal,
}

impl ErrorCode {
    /// Get the canonical string representation of this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidSort => "INVALID_SORT",

            Self::CountryNotFound => "COUNTRY_NOT_FOUND",
            Self::CityNotFound => "CITY_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
