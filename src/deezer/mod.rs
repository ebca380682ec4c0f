pub mod api;
pub mod models;
pub mod playlist_id;

pub use api::DeezerClient;
