mod data_validation;
mod frc_event;
mod match_data_2025;
mod match_schedule;
mod organization;
mod season;
mod tba_match_data_2025;
mod team_record;
mod user;

pub use data_validation::{DataValidation, SubmissionKey, ValidationStatus};
pub use frc_event::FrcEvent;
pub use match_data_2025::{Endgame2025, MatchData2025};
pub use match_schedule::{Alliance, MatchIdentity, MatchSchedule};
pub use organization::{Organization, OrganizationEvent, OrganizationFeatureSettings};
pub use season::Season;
pub use tba_match_data_2025::TbaMatchData2025;
pub use team_record::{TeamEvent, TeamRecord};
pub use user::{User, UserOrganization, UserRole};
