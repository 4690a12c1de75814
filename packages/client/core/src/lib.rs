pub mod state;
pub mod actions;
pub mod effects;
pub mod reducer;
pub mod types;
pub mod error;
pub mod validation;
pub mod config;
pub mod session;
pub mod wizard;
pub mod analysis;
pub mod chart;
pub mod markdown;
pub mod format;

#[cfg(test)]
mod tests;

pub use state::{AppState, Page};
pub use actions::Action;
pub use effects::{Effect, FileTarget};
pub use error::{ApiError, ApiResult, ValidationError};
pub use reducer::reduce;
