pub mod api;
pub mod midnight_connector;
pub mod treasury;
