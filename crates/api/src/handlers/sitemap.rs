//! XML sitemap for the public marketing site.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use showroom_db::repositories::{CarRepo, PromoRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// Static site paths with their priorities.
const STATIC_PATHS: &[(&str, &str)] = &[("/", "1.0"), ("/mobil", "0.7"), ("/aboutme", "0.6")];

/// GET /sitemap.xml -- static paths plus every active car and promo page.
pub async fn sitemap(State(state): State<AppState>) -> AppResult<Response> {
    let car_slugs = CarRepo::active_slugs(&state.pool).await?;
    let promo_slugs = PromoRepo::active_slugs(&state.pool).await?;

    let base = state.config.site_base_url.trim_end_matches('/');

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for (path, priority) in STATIC_PATHS {
        push_url(&mut xml, &format!("{base}{path}"), priority);
    }
    for slug in &car_slugs {
        push_url(&mut xml, &format!("{base}/mobil/{slug}"), "0.8");
    }
    for slug in &promo_slugs {
        push_url(&mut xml, &format!("{base}/promo/{slug}"), "0.8");
    }
    xml.push_str("</urlset>\n");

    Ok((
        [(header::CONTENT_TYPE, "application/xml")],
        xml,
    )
        .into_response())
}

fn push_url(xml: &mut String, loc: &str, priority: &str) {
    xml.push_str(&format!(
        "  <url>\n    <loc>{loc}</loc>\n    <changefreq>weekly</changefreq>\n    \
         <priority>{priority}</priority>\n  </url>\n"
    ));
}
