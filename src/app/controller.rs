use axum::{extract::State, response::Html};

use crate::{catalog, ui, AppState};

pub async fn get_root(State(state): State<AppState>) -> Html<String> {
    Html(ui::page::render_page(
        state.envy.model_checkpoint(),
        catalog::service::examples(),
    ))
}
