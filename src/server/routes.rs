use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::debug;

use crate::error::ApiError;

use super::{
    pagination::{paginate, ColorsPage, PageQuery},
    ColorStore,
};

pub async fn colors_handler(
    State(store): State<ColorStore>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<ColorsPage>, ApiError> {
    // Query strings that do not even decode (repeated keys and the like)
    // get the same answer as out-of-range values.
    let Query(query) = query.map_err(|rejection| {
        debug!(%rejection, "rejecting malformed query string");
        ApiError::InvalidPagination
    })?;

    let (page, limit) = query.validate().inspect_err(|_| {
        debug!(?query, "rejecting pagination parameters");
    })?;

    Ok(Json(paginate(&store.colors, page, limit)))
}
