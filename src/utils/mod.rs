pub mod bearer;
pub mod random_id;
pub mod validation;
