use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};

use crate::{app::models::api_error::ApiError, generation, AppState};

use super::{dtos::run_example_dto::RunExampleDto, models::example_entry::ExampleEntry, service};

pub async fn get_examples() -> Json<&'static [ExampleEntry]> {
    Json(service::examples())
}

pub async fn run_example(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Query(dto): Query<RunExampleDto>,
) -> Result<Response, ApiError> {
    let result = service::run_example(
        index,
        dto.save_images,
        state.pipeline.as_ref(),
        &state.envy.outputs_dir(),
    )
    .await?;

    generation::controller::image_response(&result)
}
