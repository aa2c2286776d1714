pub mod analytics_model;
pub mod bet_model;
