pub mod user;

pub use user::{DuplicateEntry, MovieEntry, MovieList, Rating, RatingList, UserProfile, UserRecord};
