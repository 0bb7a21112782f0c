//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod ai_analytics;
pub mod alert;
pub mod citizen_engagement;
pub mod contract;
pub mod enums;
pub mod project;
pub mod report;

// Re-export specific types to avoid conflicts
pub use ai_analytics::{
    Column as AiAnalyticsColumn, Entity as AiAnalytics, Model as AiAnalyticsModel,
};
pub use alert::{Column as AlertColumn, Entity as Alert, Model as AlertModel};
pub use citizen_engagement::{
    Column as CitizenEngagementColumn, Entity as CitizenEngagement,
    Model as CitizenEngagementModel,
};
pub use contract::{Column as ContractColumn, Entity as Contract, Model as ContractModel};
pub use project::{Column as ProjectColumn, Entity as Project, Model as ProjectModel};
pub use report::{Column as ReportColumn, Entity as Report, Model as ReportModel};
