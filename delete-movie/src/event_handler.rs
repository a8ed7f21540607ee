use aws_lambda_events::apigw::{ApiGatewayV2httpRequest, ApiGatewayV2httpResponse};
use lambda_runtime::{tracing, Error, LambdaEvent};
use movies_core::response::{log_event, path_parameter};
use movies_core::{ApiError, ApiResponse, KeyValueStore, MovieCatalog, MovieId};

pub(crate) async fn function_handler<S: KeyValueStore>(
    catalog: &MovieCatalog<S>,
    event: LambdaEvent<ApiGatewayV2httpRequest>,
) -> Result<ApiGatewayV2httpResponse, Error> {
    let request = event.payload;
    log_event(&request);

    Ok(delete_movie(catalog, path_parameter(&request, "movieId"))
        .await
        .into())
}

/// Deletes a movie by id. The store does not report whether the movie
/// existed, so both cases answer 200.
pub(crate) async fn delete_movie<S: KeyValueStore>(
    catalog: &MovieCatalog<S>,
    movie_id: Option<&str>,
) -> ApiResponse {
    let result = async {
        let id = MovieId::parse(movie_id)?;
        catalog.delete(id).await.map_err(ApiError::delete_failed)?;
        Ok::<_, ApiError>(id)
    }
    .await;

    match result {
        Ok(id) => ApiResponse::message(200, format!("Movie with ID {id} deleted successfully.")),
        Err(error) => {
            if error.is_backend() {
                tracing::error!(?error, "failed to delete movie");
            } else {
                tracing::info!(%error, "delete request not served");
            }
            error.into()
        }
    }
}
