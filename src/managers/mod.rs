pub mod connection;
pub mod inventory;
pub mod jobs;
pub mod organizations;
pub mod templates;
