//! Main menu — workflow selection page.

use axum::response::Html;
use polyclin_common::Disease;

use crate::handlers::page;

pub async fn menu() -> Html<String> {
    let buttons: String = Disease::ALL
        .iter()
        .map(|d| {
            format!(
                r#"<a href="/screen/{}" class="btn btn-outline-primary btn-lg w-100 mb-3">{}</a>"#,
                d.slug(),
                d.title()
            )
        })
        .collect();

    let body = format!(
        r#"<h1 class="text-center text-success mb-4">Multiple Disease Prediction System</h1>
    <h3 class="mb-3">Select a disease prediction model below:</h3>
    <div class="col-md-6 mx-auto">
{buttons}
    </div>"#
    );

    Html(page("Menu", &body))
}
