//! Unified error codes for the queue portal
//!
//! This module defines all error codes used across portal-server, portal-client and frontend.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Registration errors
//! - 4xxx: Group errors
//! - 5xxx: Company / company-name directory errors
//! - 6xxx: Translation errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,
    /// Cannot delete the last administrator
    CannotDeleteAdmin = 2005,

    // ==================== 3xxx: Registration ====================
    /// Registration window is closed
    RegistrationClosed = 3001,
    /// Group has reached max_companies
    GroupFull = 3002,
    /// Company already registered in this group
    DuplicateRegistration = 3003,
    /// Registration code unknown
    InvalidRegistrationCode = 3004,
    /// Registration codes are switched off
    RegistrationCodesDisabled = 3005,
    /// Registration not found
    RegistrationNotFound = 3006,

    // ==================== 4xxx: Group ====================
    /// Group not found
    GroupNotFound = 4001,
    /// Group time range is invalid
    GroupInvalidTimeRange = 4002,

    // ==================== 5xxx: Company ====================
    /// Company not found
    CompanyNotFound = 5001,
    /// Company name entry not found
    CompanyNameNotFound = 5101,
    /// Company name code already exists
    CompanyNameCodeExists = 5102,

    // ==================== 6xxx: Translation ====================
    /// Translation language not found
    TranslationNotFound = 6001,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,
    /// Username already exists
    UsernameExists = 8002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::CannotDeleteAdmin => "Cannot delete the last administrator",

            // Registration
            ErrorCode::RegistrationClosed => "Registration is currently closed",
            ErrorCode::GroupFull => "Group is full",
            ErrorCode::DuplicateRegistration => "Company is already registered in this group",
            ErrorCode::InvalidRegistrationCode => "Registration code is invalid",
            ErrorCode::RegistrationCodesDisabled => "Registration codes are disabled",
            ErrorCode::RegistrationNotFound => "Registration not found",

            // Group
            ErrorCode::GroupNotFound => "Group not found",
            ErrorCode::GroupInvalidTimeRange => "Group start time must be before end time",

            // Company
            ErrorCode::CompanyNotFound => "Company not found",
            ErrorCode::CompanyNameNotFound => "Company name not found",
            ErrorCode::CompanyNameCodeExists => "Company code already exists",

            // Translation
            ErrorCode::TranslationNotFound => "Translation not found",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UsernameExists => "Username already exists",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),
            2005 => Ok(ErrorCode::CannotDeleteAdmin),

            // Registration
            3001 => Ok(ErrorCode::RegistrationClosed),
            3002 => Ok(ErrorCode::GroupFull),
            3003 => Ok(ErrorCode::DuplicateRegistration),
            3004 => Ok(ErrorCode::InvalidRegistrationCode),
            3005 => Ok(ErrorCode::RegistrationCodesDisabled),
            3006 => Ok(ErrorCode::RegistrationNotFound),

            // Group
            4001 => Ok(ErrorCode::GroupNotFound),
            4002 => Ok(ErrorCode::GroupInvalidTimeRange),

            // Company
            5001 => Ok(ErrorCode::CompanyNotFound),
            5101 => Ok(ErrorCode::CompanyNameNotFound),
            5102 => Ok(ErrorCode::CompanyNameCodeExists),

            // Translation
            6001 => Ok(ErrorCode::TranslationNotFound),

            // User
            8001 => Ok(ErrorCode::UserNotFound),
            8002 => Ok(ErrorCode::UsernameExists),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
