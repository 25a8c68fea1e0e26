pub mod error;
pub mod sources;
pub mod sync;

pub use error::{ImporterError, Result};
pub use sources::tba::{TbaClient, TbaSettings};
pub use sync::TbaSync;
