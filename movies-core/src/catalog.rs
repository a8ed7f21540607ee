use crate::config::MovieConfig;
use crate::error::StoreError;
use crate::model::{Movie, MovieKey, ATTR_CAST_MOVIE_ID};
use crate::movie_id::MovieId;
use crate::store::{from_item, to_item, Item, KeyValueStore};
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::Value;

/// Movie and cast tables bound to a store.
///
/// Built once at start-up and shared read-only by every invocation.
#[derive(Debug, Clone)]
pub struct MovieCatalog<S> {
    store: S,
    table_name: String,
    cast_table_name: Option<String>,
}

impl<S: KeyValueStore> MovieCatalog<S> {
    pub fn new(store: S, table_name: impl Into<String>, cast_table_name: Option<String>) -> Self {
        Self {
            store,
            table_name: table_name.into(),
            cast_table_name,
        }
    }

    pub fn from_config(store: S, config: &MovieConfig) -> Self {
        Self::new(
            store,
            config.table_name.clone(),
            config.cast_table_name.clone(),
        )
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn has_cast_table(&self) -> bool {
        self.cast_table_name.is_some()
    }

    fn key(&self, id: MovieId) -> Result<Item, StoreError> {
        to_item(&MovieKey { id }).map_err(|e| StoreError::malformed(&self.table_name, e))
    }

    pub async fn movie(&self, id: MovieId) -> Result<Option<Movie>, StoreError> {
        let key = self.key(id)?;
        let Some(item) = self.store.get_item(&self.table_name, key).await? else {
            return Ok(None);
        };

        from_item(item)
            .map(Some)
            .map_err(|e| StoreError::malformed(&self.table_name, e))
    }

    /// Cast records for a movie, passed through as plain JSON.
    ///
    /// `Ok(None)` when no cast table is configured; the store is not called.
    pub async fn cast(&self, id: MovieId) -> Result<Option<Vec<Value>>, StoreError> {
        let Some(table) = self.cast_table_name.as_deref() else {
            return Ok(None);
        };

        let items = self
            .store
            .query_partition(table, ATTR_CAST_MOVIE_ID, AttributeValue::N(id.to_string()))
            .await?;

        items
            .into_iter()
            .map(|item| from_item(item).map_err(|e| StoreError::malformed(table, e)))
            .collect::<Result<Vec<Value>, _>>()
            .map(Some)
    }

    pub async fn delete(&self, id: MovieId) -> Result<(), StoreError> {
        let key = self.key(id)?;
        self.store.delete_item(&self.table_name, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryStore, StoreCall};
    use serde_json::json;

    const MOVIES: &str = "Movies";
    const CAST: &str = "MovieCast";

    fn catalog(cast_table: Option<&str>) -> MovieCatalog<MemoryStore> {
        MovieCatalog::new(MemoryStore::new(), MOVIES, cast_table.map(str::to_string))
    }

    #[tokio::test]
    async fn reads_movie_with_partial_attributes() {
        let catalog = catalog(None);
        catalog
            .store()
            .insert_json(MOVIES, json!({ "id": 5, "title": "Alien", "extra": "ignored" }));

        let movie = catalog.movie(MovieId::new(5)).await.unwrap().unwrap();

        assert_eq!(movie.id, MovieId::new(5));
        assert_eq!(movie.title, Some(json!("Alien")));
        assert_eq!(movie.genre_ids, None);
    }

    #[tokio::test]
    async fn missing_movie_is_none() {
        let catalog = catalog(None);
        assert!(catalog.movie(MovieId::new(5)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn attributes_keep_their_stored_type() {
        let catalog = catalog(None);
        let n = |value: &str| AttributeValue::N(value.to_string());
        catalog.store().insert(
            MOVIES,
            Item::from([
                ("id".to_string(), n("5")),
                ("title".to_string(), n("1917")),
                ("genre_ids".to_string(), AttributeValue::S("not a list".to_string())),
                ("vote_average".to_string(), n("8")),
                ("vote_count".to_string(), n("4242.0")),
            ]),
        );

        let movie = catalog.movie(MovieId::new(5)).await.unwrap().unwrap();

        assert_eq!(movie.title, Some(json!(1917)));
        assert_eq!(movie.genre_ids, Some(json!("not a list")));
        assert_eq!(movie.vote_average, Some(json!(8)));
        assert_eq!(movie.vote_count, Some(json!(4242.0)));
    }

    #[tokio::test]
    async fn cast_without_table_skips_the_store() {
        let catalog = catalog(None);

        assert_eq!(catalog.cast(MovieId::new(5)).await.unwrap(), None);
        assert!(catalog.store().calls().is_empty());
    }

    #[tokio::test]
    async fn cast_queries_the_partition() {
        let catalog = catalog(Some(CAST));
        catalog
            .store()
            .insert_json(CAST, json!({ "movieId": 5, "actor": "Weaver" }));
        catalog
            .store()
            .insert_json(CAST, json!({ "movieId": 6, "actor": "Someone else" }));

        let cast = catalog.cast(MovieId::new(5)).await.unwrap();

        assert_eq!(cast, Some(vec![json!({ "movieId": 5, "actor": "Weaver" })]));
        assert_eq!(
            catalog.store().calls(),
            vec![StoreCall::Query {
                table: CAST.to_string(),
                partition_attribute: "movieId".to_string(),
                value: AttributeValue::N("5".to_string()),
            }]
        );
    }

    #[tokio::test]
    async fn delete_uses_the_movie_key() {
        let catalog = catalog(None);

        catalog.delete(MovieId::new(9)).await.unwrap();

        assert_eq!(
            catalog.store().calls(),
            vec![StoreCall::Delete {
                table: MOVIES.to_string(),
                key: Item::from([("id".to_string(), AttributeValue::N("9".to_string()))]),
            }]
        );
    }
}
