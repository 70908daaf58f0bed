pub mod build;
pub mod constants;
pub mod download_url;
pub mod orchestrator;
pub mod variant;

pub use build::*;
pub use download_url::*;
pub use orchestrator::*;
pub use variant::*;
