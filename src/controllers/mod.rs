pub mod analytics_controller;
pub mod bet_controller;
