pub mod activity;
pub mod credentials;
pub mod error;
pub mod github;
pub mod output;
pub mod report;

pub use error::ReportError;
