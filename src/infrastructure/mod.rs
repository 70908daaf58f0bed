pub mod archive;
pub mod extension;
pub mod remote;
pub mod repository;

pub use extension::*;
pub use remote::*;
pub use repository::*;
