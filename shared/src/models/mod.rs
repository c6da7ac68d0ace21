//! Domain Models

pub mod company;
pub mod company_name;
pub mod group;
pub mod translation;
pub mod user;
pub mod website_settings;

pub use company::{
    BulkDeleteRequest, BulkDeleteResponse, Company, CompanyCreate, CompanyFilter,
    CompanyStatusUpdate, CompanyUpdate, NO_GROUP, QueueEntry, RegistrationReceipt,
    RegistrationRequest, normalize_name,
};
pub use company_name::{
    CompanyName, CompanyNameCreate, CompanyNameImport, CompanyNameUpdate, ImportSummary,
    normalize_code,
};
pub use group::{Group, GroupCreate, GroupUpdate, GroupView, weekday_name};
pub use translation::{SeedResult, Translation, TranslationUpdate};
pub use user::{CurrentUserResponse, LoginRequest, LoginResponse, UserCreate, UserInfo};
pub use website_settings::{WebsiteSettings, WebsiteSettingsUpdate};
