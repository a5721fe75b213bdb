pub mod args;
pub mod checkin;
pub mod dates;
pub mod error;
pub mod fetch;
pub mod freq;
pub mod ingest;
pub mod record;
pub mod stats;
pub mod utils;

pub use args::Args;
pub use checkin::{analyze_checkins, Analysis};
pub use error::{FieldError, InputError};
pub use freq::FrequencyTable;
pub use record::{CheckinRecord, TitleType};
pub use stats::{aggregate, Report};
