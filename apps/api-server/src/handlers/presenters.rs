//! Mapping from domain entities to response DTOs.

use std::collections::HashMap;

use uuid::Uuid;

use chronicle_core::domain::{Comment, Post, Tag};
use chronicle_shared::dto::{
    AdminCommentResponse, AdminPostResponse, CommentResponse, PostSummary, TagResponse,
};

use crate::middleware::error::AppResult;
use crate::state::AppState;

pub fn tag_response(tag: Tag) -> TagResponse {
    TagResponse {
        name: tag.name,
        slug: tag.slug,
    }
}

pub fn post_summary(post: Post, tags: Vec<TagResponse>) -> PostSummary {
    PostSummary {
        id: post.id,
        path: post.public_path(),
        title: post.title,
        slug: post.slug,
        publish: post.publish,
        tags,
    }
}

pub fn comment_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        name: comment.name,
        body: comment.body,
        created_at: comment.created_at,
    }
}

pub fn admin_comment_response(comment: Comment) -> AdminCommentResponse {
    AdminCommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        name: comment.name,
        email: comment.email,
        body: comment.body,
        active: comment.active,
        created_at: comment.created_at,
    }
}

pub fn admin_post_response(post: Post, tags: Vec<TagResponse>) -> AdminPostResponse {
    AdminPostResponse {
        id: post.id,
        author_id: post.author_id,
        title: post.title,
        slug: post.slug,
        body: post.body,
        status: post.status.to_string(),
        publish: post.publish,
        created_at: post.created_at,
        updated_at: post.updated_at,
        tags,
    }
}

/// Decorate a batch of posts with their tags in one query.
pub async fn summarize(state: &AppState, posts: Vec<Post>) -> AppResult<Vec<PostSummary>> {
    let mut by_post = tags_by_post(state, &posts).await?;

    Ok(posts
        .into_iter()
        .map(|post| {
            let tags = by_post.remove(&post.id).unwrap_or_default();
            post_summary(post, tags)
        })
        .collect())
}

/// Tags for a batch of posts, grouped by post id.
pub async fn tags_by_post(
    state: &AppState,
    posts: &[Post],
) -> AppResult<HashMap<Uuid, Vec<TagResponse>>> {
    let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
    let pairs = state.tags.tags_for_posts(&ids).await?;

    let mut by_post: HashMap<Uuid, Vec<TagResponse>> = HashMap::new();
    for (post_id, tag) in pairs {
        by_post.entry(post_id).or_default().push(tag_response(tag));
    }

    Ok(by_post)
}
