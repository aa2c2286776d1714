pub mod analytics_types;
pub mod bet_types;
