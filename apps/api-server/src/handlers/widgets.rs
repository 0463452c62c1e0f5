//! Sidebar aggregate endpoints: totals, latest posts, most commented.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use chronicle_shared::dto::SummaryResponse;

use super::presenters::summarize;
use crate::middleware::error::AppResult;
use crate::state::AppState;

const DEFAULT_WIDGET_COUNT: u64 = 5;
/// Widgets are sidebar decorations; cap the count so the endpoint cannot be
/// used to dump the whole table.
const MAX_WIDGET_COUNT: u64 = 20;

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    pub count: Option<u64>,
}

impl CountQuery {
    fn resolve(&self) -> u64 {
        self.count
            .unwrap_or(DEFAULT_WIDGET_COUNT)
            .clamp(1, MAX_WIDGET_COUNT)
    }
}

/// GET /widgets/summary
pub async fn summary(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let total_posts = state.posts.count_published().await?;

    Ok(HttpResponse::Ok().json(SummaryResponse { total_posts }))
}

/// GET /widgets/latest
pub async fn latest(
    state: web::Data<AppState>,
    query: web::Query<CountQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.latest_published(query.resolve()).await?;
    let posts = summarize(&state, posts).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /widgets/most-commented
pub async fn most_commented(
    state: web::Data<AppState>,
    query: web::Query<CountQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.most_commented(query.resolve()).await?;
    let posts = summarize(&state, posts).await?;

    Ok(HttpResponse::Ok().json(posts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_query_clamps() {
        assert_eq!(CountQuery { count: None }.resolve(), 5);
        assert_eq!(CountQuery { count: Some(0) }.resolve(), 1);
        assert_eq!(CountQuery { count: Some(3) }.resolve(), 3);
        assert_eq!(CountQuery { count: Some(500) }.resolve(), 20);
    }
}
