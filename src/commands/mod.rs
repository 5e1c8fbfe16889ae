// Desired-state operations (query/install/update/remove/latest)
pub mod package;

// Inventory and environment listings
pub mod list;

// Health checks
pub mod doctor;
