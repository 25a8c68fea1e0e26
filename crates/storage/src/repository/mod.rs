pub mod event;
pub mod match_data;
pub mod organization;
pub mod schedule;
pub mod season;
pub mod tba_match_data;
pub mod team;
pub mod user;
pub mod validation;
