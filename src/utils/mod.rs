pub mod error;
pub mod export;
pub mod format;
pub mod interactive;
pub mod logging;
pub mod output;
pub mod pagination;
pub mod search;
pub mod stats;

pub use error::{AppError, AppResult};
