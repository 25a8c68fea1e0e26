pub mod export;
pub mod import;
pub mod organization;
pub mod scout;
pub mod user;
