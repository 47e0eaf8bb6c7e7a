use autocare_assets::{Asset, ASSETS};
use axum::{
    http::header,
    response::{IntoResponse, Response},
    routing, Router,
};

pub fn router() -> Router<()> {
    let index = autocare_assets::index();
    ASSETS.iter().fold(
        Router::new().route("/", routing::get(move || serve(index))),
        |router, asset| router.route(asset.path, routing::get(move || serve(asset))),
    )
}

async fn serve(asset: &'static Asset) -> Response {
    ([(header::CONTENT_TYPE, asset.content_type)], asset.content).into_response()
}
