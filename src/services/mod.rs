pub mod collections;
pub mod tmdb;

pub use tmdb::{MovieCatalog, TmdbGateway};
