//! Core business logic - framework-agnostic operations over the entity store.
//!
//! Every operation takes the store handle explicitly; nothing here knows about
//! the RPC transport.

/// AI analytics persistence and the insight collaborator seam
pub mod analytics;
/// Alert creation, listing and resolution
pub mod alert;
/// Contract creation and listing
pub mod contract;
/// Dashboard aggregate statistics
pub mod dashboard;
/// Citizen engagement submissions and moderation
pub mod engagement;
/// Fixed-point currency conversion
pub mod money;
/// Project creation, lookup and partial update
pub mod project;
/// Report publishing and listing
pub mod report;
/// Risk level thresholds
pub mod risk;
/// Filtered, paginated project search
pub mod search;
/// Field validation rules
pub mod validation;
