pub mod download;
pub mod fetcher;
pub mod http_client;

pub use fetcher::{ArtifactFetcher, FetchRequest, HttpArtifactFetcher};
pub use http_client::{FetchOptions, HttpClient};
