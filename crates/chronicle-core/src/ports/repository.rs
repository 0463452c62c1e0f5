use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Comment, Post, PostStatus, Tag, User};
use crate::error::RepoError;

/// One page of a paginated listing.
///
/// `page` is 1-based and reflects the page actually served: requests past
/// the end are clamped to the last page rather than failing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub total_items: u64,
}

/// Filters for the admin post listing.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub author_id: Option<Uuid>,
    /// Case-insensitive substring match against title and body.
    pub search: Option<String>,
}

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository with the blog's query surface.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// One page of published posts, newest publish first. When `tag_id` is
    /// set, only posts carrying that tag are included.
    async fn published_page(
        &self,
        tag_id: Option<Uuid>,
        page: u64,
        page_size: u64,
    ) -> Result<Page<Post>, RepoError>;

    /// Permalink lookup: published post with this slug on this publish date.
    async fn find_published_by_slug_and_date(
        &self,
        slug: &str,
        date: NaiveDate,
    ) -> Result<Option<Post>, RepoError>;

    /// Published post by id (share and comment endpoints key on the id).
    async fn find_published_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Published posts sharing at least one of `tag_ids`, the given post
    /// excluded, ordered by shared-tag count then publish recency.
    async fn similar_to(
        &self,
        post_id: Uuid,
        tag_ids: &[Uuid],
        limit: u64,
    ) -> Result<Vec<Post>, RepoError>;

    /// Full-text search over title and body, published posts only.
    async fn search_published(&self, query: &str) -> Result<Vec<Post>, RepoError>;

    /// The `limit` most recently published posts.
    async fn latest_published(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Every published post, newest publish first. Feeds the sitemap.
    async fn all_published(&self) -> Result<Vec<Post>, RepoError>;

    /// Published posts ordered by total comment count (inactive included),
    /// ties broken by publish recency.
    async fn most_commented(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Total number of published posts.
    async fn count_published(&self) -> Result<u64, RepoError>;

    /// Admin listing: any status, filtered and searched per `filter`,
    /// ordered by status then publish descending.
    async fn filtered_page(
        &self,
        filter: &PostFilter,
        page: u64,
        page_size: u64,
    ) -> Result<Page<Post>, RepoError>;

    /// Whether another post already uses `slug` on the given publish date.
    async fn slug_taken_on(
        &self,
        slug: &str,
        date: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<bool, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Publicly visible comments for a post, oldest first.
    async fn active_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// All comments for a post including moderated ones, oldest first.
    async fn all_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, Uuid> {
    /// Find a tag by its URL slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError>;

    /// Resolve a tag by name, creating it when absent.
    async fn find_or_create(&self, name: &str) -> Result<Tag, RepoError>;

    /// Replace the set of tags attached to a post.
    async fn set_post_tags(&self, post_id: Uuid, tag_ids: &[Uuid]) -> Result<(), RepoError>;

    /// Tags attached to a single post.
    async fn tags_for_post(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError>;

    /// Tags for a batch of posts, as `(post_id, tag)` pairs. Used to
    /// decorate listings without a query per post.
    async fn tags_for_posts(&self, post_ids: &[Uuid]) -> Result<Vec<(Uuid, Tag)>, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}
