//! Admin handlers: post management and comment moderation.
//!
//! All routes here require a Bearer token via the [`Identity`] extractor.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use chronicle_core::domain::{Post, PostStatus, Tag};
use chronicle_core::ports::PostFilter;
use chronicle_core::text::slugify;
use chronicle_shared::dto::{
    CreatePostRequest, ModerateCommentRequest, Paginated, UpdatePostRequest,
};

use super::presenters::{admin_comment_response, admin_post_response, tag_response, tags_by_post};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Admin listings page size.
const ADMIN_PAGE_SIZE: u64 = 20;

#[derive(Debug, Deserialize)]
pub struct AdminListQuery {
    pub status: Option<String>,
    pub author_id: Option<Uuid>,
    pub search: Option<String>,
    pub page: Option<String>,
}

fn parse_status(raw: &str) -> Result<PostStatus, AppError> {
    PostStatus::parse(raw).ok_or_else(|| {
        AppError::BadRequest(format!(
            "invalid status '{}', expected 'draft' or 'published'",
            raw
        ))
    })
}

/// Resolve tag names find-or-create, dropping blanks and duplicates.
async fn resolve_tags(state: &AppState, names: &[String]) -> AppResult<Vec<Tag>> {
    let mut tags: Vec<Tag> = Vec::new();
    for name in names {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            continue;
        }
        let tag = state.tags.find_or_create(trimmed).await?;
        if !tags.iter().any(|t| t.id == tag.id) {
            tags.push(tag);
        }
    }
    Ok(tags)
}

/// GET /api/admin/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    _identity: Identity,
    query: web::Query<AdminListQuery>,
) -> AppResult<HttpResponse> {
    let filter = PostFilter {
        status: query.status.as_deref().map(parse_status).transpose()?,
        author_id: query.author_id,
        search: query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
    };

    let page = query
        .page
        .as_deref()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1);
    let paged = state
        .posts
        .filtered_page(&filter, page, ADMIN_PAGE_SIZE)
        .await?;

    let mut by_post = tags_by_post(&state, &paged.items).await?;
    let items: Vec<_> = paged
        .items
        .into_iter()
        .map(|post| {
            let tags = by_post.remove(&post.id).unwrap_or_default();
            admin_post_response(post, tags)
        })
        .collect();

    Ok(HttpResponse::Ok().json(Paginated {
        items,
        page: paged.page,
        page_size: paged.page_size,
        total_pages: paged.total_pages,
        total_items: paged.total_items,
    }))
}

/// POST /api/admin/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let mut errors = Vec::new();

    let title = req.title.trim();
    if title.is_empty() {
        errors.push("title must not be empty".to_string());
    } else if title.len() > 250 {
        errors.push("title must be at most 250 characters".to_string());
    }
    if req.body.trim().is_empty() {
        errors.push("body must not be empty".to_string());
    }

    // Slug is taken from the request when given, otherwise derived from
    // the title.
    let slug = match req.slug.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => slugify(s),
        _ => slugify(title),
    };
    if slug.is_empty() {
        errors.push("slug must contain at least one alphanumeric character".to_string());
    }

    let status = match req.status.as_deref() {
        Some(raw) => match PostStatus::parse(raw) {
            Some(status) => status,
            None => {
                errors.push(format!(
                    "invalid status '{}', expected 'draft' or 'published'",
                    raw
                ));
                PostStatus::Draft
            }
        },
        None => PostStatus::Draft,
    };

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let publish = req.publish.unwrap_or_else(Utc::now);

    // Slugs are unique per publish date.
    if state
        .posts
        .slug_taken_on(&slug, publish.date_naive(), None)
        .await?
    {
        return Err(AppError::Conflict(format!(
            "slug '{}' is already used on {}",
            slug,
            publish.date_naive()
        )));
    }

    let mut post = Post::new(
        identity.user_id,
        title.to_string(),
        slug,
        req.body.trim().to_string(),
    );
    post.status = status;
    post.publish = publish;

    let saved = state.posts.save(post).await?;

    let tags = resolve_tags(&state, &req.tags).await?;
    let tag_ids: Vec<Uuid> = tags.iter().map(|t| t.id).collect();
    state.tags.set_post_tags(saved.id, &tag_ids).await?;

    tracing::info!(post_id = %saved.id, author_id = %saved.author_id, "Post created");

    Ok(HttpResponse::Created().json(admin_post_response(
        saved,
        tags.into_iter().map(tag_response).collect(),
    )))
}

/// GET /api/admin/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {} not found", id)))?;

    let tags = state.tags.tags_for_post(post.id).await?;

    Ok(HttpResponse::Ok().json(admin_post_response(
        post,
        tags.into_iter().map(tag_response).collect(),
    )))
}

/// PUT /api/admin/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {} not found", id)))?;

    let req = body.into_inner();
    let mut errors = Vec::new();

    if let Some(title) = req.title {
        let title = title.trim().to_string();
        if title.is_empty() {
            errors.push("title must not be empty".to_string());
        } else if title.len() > 250 {
            errors.push("title must be at most 250 characters".to_string());
        } else {
            post.title = title;
        }
    }
    if let Some(body_text) = req.body {
        if body_text.trim().is_empty() {
            errors.push("body must not be empty".to_string());
        } else {
            post.body = body_text.trim().to_string();
        }
    }
    if let Some(slug) = req.slug {
        let slug = slugify(slug.trim());
        if slug.is_empty() {
            errors.push("slug must contain at least one alphanumeric character".to_string());
        } else {
            post.slug = slug;
        }
    }
    if let Some(raw) = req.status.as_deref() {
        match PostStatus::parse(raw) {
            Some(status) => post.status = status,
            None => errors.push(format!(
                "invalid status '{}', expected 'draft' or 'published'",
                raw
            )),
        }
    }
    if let Some(publish) = req.publish {
        post.publish = publish;
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // The slug/date pair may have changed; re-check against other posts.
    if state
        .posts
        .slug_taken_on(&post.slug, post.publish_date(), Some(post.id))
        .await?
    {
        return Err(AppError::Conflict(format!(
            "slug '{}' is already used on {}",
            post.slug,
            post.publish_date()
        )));
    }

    post.updated_at = Utc::now();
    let saved = state.posts.save(post).await?;

    let tags = match req.tags {
        Some(names) => {
            let tags = resolve_tags(&state, &names).await?;
            let tag_ids: Vec<Uuid> = tags.iter().map(|t| t.id).collect();
            state.tags.set_post_tags(saved.id, &tag_ids).await?;
            tags
        }
        None => state.tags.tags_for_post(saved.id).await?,
    };

    tracing::info!(post_id = %saved.id, "Post updated");

    Ok(HttpResponse::Ok().json(admin_post_response(
        saved,
        tags.into_iter().map(tag_response).collect(),
    )))
}

/// DELETE /api/admin/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await?;

    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/admin/posts/{id}/comments
pub async fn list_post_comments(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if state.posts.find_by_id(id).await?.is_none() {
        return Err(AppError::NotFound(format!("post {} not found", id)));
    }

    let comments = state.comments.all_for_post(id).await?;
    let comments: Vec<_> = comments.into_iter().map(admin_comment_response).collect();

    Ok(HttpResponse::Ok().json(comments))
}

/// PATCH /api/admin/comments/{id}
pub async fn moderate_comment(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<ModerateCommentRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let mut comment = state
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("comment {} not found", id)))?;

    comment.active = body.active;
    comment.updated_at = Utc::now();
    let saved = state.comments.save(comment).await?;

    tracing::info!(comment_id = %saved.id, active = saved.active, "Comment moderated");

    Ok(HttpResponse::Ok().json(admin_comment_response(saved)))
}
