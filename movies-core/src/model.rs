use crate::movie_id::MovieId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Partition attribute of the cast table
pub const ATTR_CAST_MOVIE_ID: &str = "movieId";

/// A movie record as stored in the movies table.
///
/// Only `id` is guaranteed to be present. The other attributes are passed
/// through as stored, whatever their type; attributes outside this set are
/// ignored when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub overview: Option<Value>,
    #[serde(default)]
    pub release_date: Option<Value>,
    #[serde(default)]
    pub genre_ids: Option<Value>,
    #[serde(default)]
    pub vote_average: Option<Value>,
    #[serde(default)]
    pub vote_count: Option<Value>,
}

/// Key of the movies table
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MovieKey {
    pub id: MovieId,
}

/// Body returned by the fetch endpoint. Always carries every field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieResponse {
    pub id: MovieId,
    pub title: Option<Value>,
    pub overview: Option<Value>,
    pub release_date: Option<Value>,
    pub genre_ids: Option<Value>,
    pub vote_average: Option<Value>,
    pub vote_count: Option<Value>,
    pub cast: Option<Vec<Value>>,
}

impl MovieResponse {
    pub fn new(movie: Movie, cast: Option<Vec<Value>>) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            overview: movie.overview,
            release_date: movie.release_date,
            genre_ids: movie.genre_ids,
            vote_average: movie.vote_average,
            vote_count: movie.vote_count,
            cast,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_keeps_absent_fields_as_null() {
        let movie = Movie {
            id: MovieId::new(7),
            title: Some(json!("Heat")),
            overview: None,
            release_date: None,
            genre_ids: None,
            vote_average: None,
            vote_count: None,
        };

        let body = serde_json::to_value(MovieResponse::new(movie, None)).unwrap();

        assert_eq!(
            body,
            json!({
                "id": 7,
                "title": "Heat",
                "overview": null,
                "release_date": null,
                "genre_ids": null,
                "vote_average": null,
                "vote_count": null,
                "cast": null,
            })
        );
    }
}
