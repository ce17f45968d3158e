pub mod chart;
pub mod cli;
pub mod config;
pub mod effectiveness;
pub mod error;
pub mod server;

pub use chart::{ParseOptions, TypeChart};
pub use effectiveness::{defensive_profile, effectiveness, DefendingType, Verdict};
pub use error::{ChartError, QueryError};
