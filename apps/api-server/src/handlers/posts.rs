//! Public blog handlers: listing, detail, search, comments, and sharing.

use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use chronicle_core::domain::{Comment, Post};
use chronicle_core::ports::{OutboundEmail, Page};
use chronicle_shared::dto::{
    NewCommentRequest, Paginated, PostDetailResponse, PostListResponse, SearchResponse,
    SharePostRequest, ShareResponse, TagResponse,
};

use super::presenters::{comment_response, summarize, tag_response};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// How many similar posts the detail view suggests.
const SIMILAR_POSTS_LIMIT: u64 = 4;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Raw string: a non-numeric value falls back to the first page rather
    /// than failing the request.
    pub page: Option<String>,
}

fn requested_page(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.parse::<u64>().ok()).unwrap_or(1)
}

async fn listing_response(
    state: &AppState,
    paged: Page<Post>,
    tag: Option<TagResponse>,
) -> AppResult<HttpResponse> {
    let items = summarize(state, paged.items).await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        page: Paginated {
            items,
            page: paged.page,
            page_size: paged.page_size,
            total_pages: paged.total_pages,
            total_items: paged.total_items,
        },
        tag,
    }))
}

/// GET /posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = requested_page(query.page.as_deref());
    let paged = state
        .posts
        .published_page(None, page, state.config.page_size)
        .await?;

    listing_response(&state, paged, None).await
}

/// GET /posts/tag/{tag_slug}
pub async fn list_by_tag(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let tag_slug = path.into_inner();
    let tag = state
        .tags
        .find_by_slug(&tag_slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("tag '{}' not found", tag_slug)))?;

    let page = requested_page(query.page.as_deref());
    let paged = state
        .posts
        .published_page(Some(tag.id), page, state.config.page_size)
        .await?;

    listing_response(&state, paged, Some(tag_response(tag))).await
}

/// GET /posts/{year}/{month}/{day}/{slug}
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<(i32, u32, u32, String)>,
) -> AppResult<HttpResponse> {
    let (year, month, day, slug) = path.into_inner();
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| AppError::NotFound("no such date".to_string()))?;

    let post = state
        .posts
        .find_published_by_slug_and_date(&slug, date)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post '{}' not found", slug)))?;

    let tags = state.tags.tags_for_post(post.id).await?;
    let comments = state.comments.active_for_post(post.id).await?;

    let tag_ids: Vec<Uuid> = tags.iter().map(|t| t.id).collect();
    let similar = state
        .posts
        .similar_to(post.id, &tag_ids, SIMILAR_POSTS_LIMIT)
        .await?;
    let similar_posts = summarize(&state, similar).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        id: post.id,
        path: post.public_path(),
        title: post.title,
        slug: post.slug,
        body: post.body,
        publish: post.publish,
        tags: tags.into_iter().map(tag_response).collect(),
        comments: comments.into_iter().map(comment_response).collect(),
        similar_posts,
    }))
}

/// POST /posts/{id}/comments
pub async fn submit_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<NewCommentRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .find_published_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

    let req = body.into_inner();
    let mut errors = Vec::new();

    let name = req.name.trim();
    if name.is_empty() {
        errors.push("name must not be empty".to_string());
    } else if name.len() > 80 {
        errors.push("name must be at most 80 characters".to_string());
    }

    let email = req.email.trim();
    if email.is_empty() || !email.contains('@') {
        errors.push("a valid email address is required".to_string());
    }

    let comment_body = req.body.trim();
    if comment_body.is_empty() {
        errors.push("comment body must not be empty".to_string());
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let comment = Comment::new(
        post.id,
        name.to_string(),
        email.to_string(),
        comment_body.to_string(),
    );
    let saved = state.comments.save(comment).await?;

    tracing::info!(post_id = %post.id, comment_id = %saved.id, "Comment submitted");

    Ok(HttpResponse::Created().json(comment_response(saved)))
}

/// POST /posts/{id}/share
pub async fn share(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<SharePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .find_published_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

    let req = body.into_inner();
    let mut errors = Vec::new();

    let name = req.name.trim();
    if name.is_empty() {
        errors.push("name must not be empty".to_string());
    }
    if req.email.trim().is_empty() || !req.email.contains('@') {
        errors.push("a valid sender email address is required".to_string());
    }
    if req.to.trim().is_empty() || !req.to.contains('@') {
        errors.push("a valid recipient email address is required".to_string());
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let post_url = format!("{}{}", state.config.site.base_url, post.public_path());
    let (subject, message) = share_email(name, &post.title, &post_url, req.comments.as_deref());

    state
        .mailer
        .send(OutboundEmail {
            to: req.to.trim().to_string(),
            subject,
            body: message,
        })
        .await?;

    tracing::info!(post_id = %post.id, "Post shared by email");

    Ok(HttpResponse::Ok().json(ShareResponse { sent: true }))
}

/// Compose the share-by-email subject and body.
fn share_email(
    sender: &str,
    title: &str,
    url: &str,
    note: Option<&str>,
) -> (String, String) {
    let subject = format!("{} recommends you read {}", sender, title);
    let body = format!(
        "Read {} at {}\n\n{}'s comments: {}",
        title,
        url,
        sender,
        note.unwrap_or("")
    );
    (subject, body)
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

/// GET /posts/search
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let term = query.query.as_deref().unwrap_or("").trim().to_string();

    let results = if term.is_empty() {
        Vec::new()
    } else {
        state.posts.search_published(&term).await?
    };
    let results = summarize(&state, results).await?;

    Ok(HttpResponse::Ok().json(SearchResponse {
        query: term,
        total: results.len(),
        results,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_page_defaults_to_first() {
        assert_eq!(requested_page(None), 1);
        assert_eq!(requested_page(Some("abc")), 1);
        assert_eq!(requested_page(Some("-2")), 1);
        assert_eq!(requested_page(Some("7")), 7);
    }

    #[test]
    fn test_share_email_format() {
        let (subject, body) = share_email(
            "Ada",
            "Hello World",
            "http://blog.test/posts/2024/03/07/hello-world",
            Some("worth a read"),
        );

        assert_eq!(subject, "Ada recommends you read Hello World");
        assert_eq!(
            body,
            "Read Hello World at http://blog.test/posts/2024/03/07/hello-world\n\n\
             Ada's comments: worth a read"
        );
    }

    #[test]
    fn test_share_email_without_note() {
        let (_, body) = share_email("Ada", "Hello", "http://blog.test/p", None);

        assert!(body.ends_with("Ada's comments: "));
    }
}
