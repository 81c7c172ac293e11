use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A movie reference stored in a user's favorites or watchlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieEntry {
    pub movie_id: i64,
    pub title: String,
    pub poster_path: String,
}

/// A user's rating and review for a single movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub movie_id: i64,
    pub rating: f32,
    pub review: String,
    pub rated_at: DateTime<Utc>,
}

/// Returned when inserting a movie id that is already present in a list
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("movie {movie_id} already present")]
pub struct DuplicateEntry {
    pub movie_id: i64,
}

/// An ordered sequence of movie entries, unique by `movie_id`.
///
/// Insertion order is preserved; the uniqueness invariant is enforced at the
/// mutation boundary rather than by callers scanning the inner Vec.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct MovieList(Vec<MovieEntry>);

impl MovieList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an entry at the end, rejecting a `movie_id` already present.
    pub fn insert(&mut self, entry: MovieEntry) -> Result<(), DuplicateEntry> {
        if self.contains(entry.movie_id) {
            return Err(DuplicateEntry {
                movie_id: entry.movie_id,
            });
        }
        self.0.push(entry);
        Ok(())
    }

    /// Removes the entry with the given `movie_id`. No-op if absent.
    pub fn remove(&mut self, movie_id: i64) {
        self.0.retain(|e| e.movie_id != movie_id);
    }

    pub fn contains(&self, movie_id: i64) -> bool {
        self.0.iter().any(|e| e.movie_id == movie_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[MovieEntry] {
        &self.0
    }
}

/// An ordered sequence of ratings, unique by `movie_id`.
///
/// Re-rating a movie replaces the existing entry's fields in place, keeping
/// its position in the sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RatingList(Vec<Rating>);

impl RatingList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Updates the rating for `movie_id` if present (refreshing `rated_at`),
    /// otherwise appends a new entry.
    pub fn upsert(&mut self, movie_id: i64, rating: f32, review: String, rated_at: DateTime<Utc>) {
        if let Some(existing) = self.0.iter_mut().find(|r| r.movie_id == movie_id) {
            existing.rating = rating;
            existing.review = review;
            existing.rated_at = rated_at;
        } else {
            self.0.push(Rating {
                movie_id,
                rating,
                review,
                rated_at,
            });
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Rating] {
        &self.0
    }
}

/// A user's stored record: profile fields plus movie collections.
///
/// Owned by the persistence layer; one record per authenticated user.
/// Collections start empty at user creation and change only through the
/// mutation methods here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub favorites: MovieList,
    pub watchlist: MovieList,
    pub ratings: RatingList,
}

/// Minimal public projection of a user record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl UserRecord {
    pub fn new(id: Uuid, name: String, email: String) -> Self {
        Self {
            id,
            name,
            email,
            favorites: MovieList::new(),
            watchlist: MovieList::new(),
            ratings: RatingList::new(),
        }
    }

    /// Updates profile fields. `None` or an empty string leaves the field
    /// unchanged.
    pub fn update_profile(&mut self, name: Option<String>, email: Option<String>) {
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            self.name = name;
        }
        if let Some(email) = email.filter(|e| !e.is_empty()) {
            self.email = email;
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(movie_id: i64) -> MovieEntry {
        MovieEntry {
            movie_id,
            title: format!("Movie {}", movie_id),
            poster_path: format!("/poster{}.jpg", movie_id),
        }
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut list = MovieList::new();
        list.insert(entry(3)).unwrap();
        list.insert(entry(1)).unwrap();
        list.insert(entry(2)).unwrap();
        let ids: Vec<i64> = list.as_slice().iter().map(|e| e.movie_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let mut list = MovieList::new();
        list.insert(entry(5)).unwrap();
        let err = list.insert(entry(5)).unwrap_err();
        assert_eq!(err, DuplicateEntry { movie_id: 5 });
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut list = MovieList::new();
        list.insert(entry(1)).unwrap();
        list.remove(99);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_present() {
        let mut list = MovieList::new();
        list.insert(entry(1)).unwrap();
        list.insert(entry(2)).unwrap();
        list.remove(1);
        assert_eq!(list.len(), 1);
        assert!(!list.contains(1));
        assert!(list.contains(2));
    }

    #[test]
    fn test_upsert_appends_new_rating() {
        let mut ratings = RatingList::new();
        let now = Utc::now();
        ratings.upsert(10, 4.0, "good".to_string(), now);
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings.as_slice()[0].movie_id, 10);
        assert_eq!(ratings.as_slice()[0].rating, 4.0);
        assert_eq!(ratings.as_slice()[0].review, "good");
        assert_eq!(ratings.as_slice()[0].rated_at, now);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut ratings = RatingList::new();
        let t0 = Utc::now();
        ratings.upsert(10, 4.0, "good".to_string(), t0);
        ratings.upsert(20, 3.0, "ok".to_string(), t0);

        let t1 = t0 + chrono::Duration::seconds(60);
        ratings.upsert(10, 2.0, "rewatched, worse".to_string(), t1);

        assert_eq!(ratings.len(), 2);
        // position preserved: movie 10 is still first
        assert_eq!(ratings.as_slice()[0].movie_id, 10);
        assert_eq!(ratings.as_slice()[0].rating, 2.0);
        assert_eq!(ratings.as_slice()[0].review, "rewatched, worse");
        assert_eq!(ratings.as_slice()[0].rated_at, t1);
        assert_eq!(ratings.as_slice()[1].movie_id, 20);
    }

    #[test]
    fn test_update_profile_partial() {
        let mut user = UserRecord::new(
            Uuid::new_v4(),
            "Alice".to_string(),
            "alice@example.com".to_string(),
        );

        user.update_profile(Some("Alicia".to_string()), None);
        assert_eq!(user.name, "Alicia");
        assert_eq!(user.email, "alice@example.com");

        user.update_profile(None, Some("alicia@example.com".to_string()));
        assert_eq!(user.name, "Alicia");
        assert_eq!(user.email, "alicia@example.com");
    }

    #[test]
    fn test_update_profile_empty_string_ignored() {
        let mut user = UserRecord::new(
            Uuid::new_v4(),
            "Alice".to_string(),
            "alice@example.com".to_string(),
        );
        user.update_profile(Some(String::new()), Some(String::new()));
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn test_movie_entry_camel_case_wire_format() {
        let entry = entry(603);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["movieId"], 603);
        assert_eq!(json["posterPath"], "/poster603.jpg");
    }

    #[test]
    fn test_movie_list_serializes_as_plain_array() {
        let mut list = MovieList::new();
        list.insert(entry(1)).unwrap();
        let json = serde_json::to_value(&list).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 1);
    }
}
