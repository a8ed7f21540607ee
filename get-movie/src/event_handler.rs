use aws_lambda_events::apigw::{ApiGatewayV2httpRequest, ApiGatewayV2httpResponse};
use lambda_runtime::{tracing, Error, LambdaEvent};
use movies_core::response::{log_event, path_parameter, query_parameter};
use movies_core::{ApiError, ApiResponse, KeyValueStore, MovieCatalog, MovieId, MovieResponse};

pub(crate) async fn function_handler<S: KeyValueStore>(
    catalog: &MovieCatalog<S>,
    event: LambdaEvent<ApiGatewayV2httpRequest>,
) -> Result<ApiGatewayV2httpResponse, Error> {
    let request = event.payload;
    log_event(&request);

    let response = fetch_movie(
        catalog,
        path_parameter(&request, "movieId"),
        query_parameter(&request, "cast"),
    )
    .await;

    Ok(response.into())
}

/// Looks up one movie and, when `cast` is exactly `"true"`, joins its cast records.
pub(crate) async fn fetch_movie<S: KeyValueStore>(
    catalog: &MovieCatalog<S>,
    movie_id: Option<&str>,
    cast: Option<&str>,
) -> ApiResponse {
    match try_fetch_movie(catalog, movie_id, cast == Some("true")).await {
        Ok(movie) => ApiResponse::ok(&movie),
        Err(error) => {
            if error.is_backend() {
                tracing::error!(?error, "failed to fetch movie");
            } else {
                tracing::info!(%error, "fetch request not served");
            }
            error.into()
        }
    }
}

async fn try_fetch_movie<S: KeyValueStore>(
    catalog: &MovieCatalog<S>,
    movie_id: Option<&str>,
    with_cast: bool,
) -> Result<MovieResponse, ApiError> {
    let id = MovieId::parse(movie_id)?;

    let movie = catalog
        .movie(id)
        .await
        .map_err(ApiError::fetch_failed)?
        .ok_or(ApiError::NotFound(id))?;

    let cast = if with_cast {
        let cast = catalog.cast(id).await.map_err(ApiError::fetch_failed)?;
        if cast.is_none() {
            tracing::warn!(movie_id = %id, "cast requested but CAST_TABLE_NAME is not set");
        }
        cast
    } else {
        None
    };

    Ok(MovieResponse::new(movie, cast))
}
