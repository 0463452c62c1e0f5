//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Auth

/// Request to register a new author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing an authentication token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Response containing an author's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Public blog surface

/// A tag as rendered in listings and detail pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    pub name: String,
    pub slug: String,
}

/// A post as it appears in listings, search results, and widgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    /// Site-relative permalink, e.g. `/posts/2024/03/07/hello-world`.
    pub path: String,
    pub publish: DateTime<Utc>,
    pub tags: Vec<TagResponse>,
}

/// Pagination envelope for listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub total_items: u64,
}

/// Response for the post list endpoints. `tag` is set when the listing was
/// filtered by a tag slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    #[serde(flatten)]
    pub page: Paginated<PostSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<TagResponse>,
}

/// A publicly visible comment. The submitter email is not exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Full post detail page payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub path: String,
    pub body: String,
    pub publish: DateTime<Utc>,
    pub tags: Vec<TagResponse>,
    pub comments: Vec<CommentResponse>,
    pub similar_posts: Vec<PostSummary>,
}

/// Request to submit a comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCommentRequest {
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Request to share a post by email. `comments` is the sender's optional
/// note included in the message body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharePostRequest {
    pub name: String,
    pub email: String,
    pub to: String,
    #[serde(default)]
    pub comments: Option<String>,
}

/// Response for the share endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareResponse {
    pub sent: bool,
}

/// Response for the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub total: usize,
    pub results: Vec<PostSummary>,
}

/// Response for the widgets summary endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub total_posts: u64,
}

// ---------------------------------------------------------------------------
// Admin surface

/// Request to create a post. When `slug` is omitted it is derived from the
/// title; tag names are resolved find-or-create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub body: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub publish: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request to update a post. Absent fields are left unchanged; `tags`
/// replaces the full tag set when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub publish: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// A post as seen by the admin surface, drafts and metadata included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminPostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: String,
    pub publish: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<TagResponse>,
}

/// A comment as seen by the admin surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub name: String,
    pub email: String,
    pub body: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Request to set a comment's moderation flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerateCommentRequest {
    pub active: bool,
}
