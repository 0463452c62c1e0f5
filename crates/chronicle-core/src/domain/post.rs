use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication state of a post. New posts start as drafts and only
/// published posts are visible on the public surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(PostStatus::Draft),
            "published" => Some(PostStatus::Published),
            _ => None,
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post entity - a blog post.
///
/// The slug is unique per publish *date*, so permalinks take the form
/// `/posts/{year}/{month}/{day}/{slug}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: PostStatus,
    pub publish: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new draft post published "now".
    pub fn new(author_id: Uuid, title: String, slug: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            slug,
            body,
            status: PostStatus::Draft,
            publish: now,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Calendar date of publication, used for the slug uniqueness rule
    /// and permalink routing.
    pub fn publish_date(&self) -> NaiveDate {
        self.publish.date_naive()
    }

    /// Site-relative permalink path for this post.
    pub fn public_path(&self) -> String {
        let date = self.publish_date();
        format!(
            "/posts/{}/{:02}/{:02}/{}",
            date.year(),
            date.month(),
            date.day(),
            self.slug
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_post_is_draft() {
        let post = Post::new(
            Uuid::new_v4(),
            "Hello".to_string(),
            "hello".to_string(),
            "Body".to_string(),
        );

        assert_eq!(post.status, PostStatus::Draft);
        assert!(!post.is_published());
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn test_public_path_zero_pads_date() {
        let mut post = Post::new(
            Uuid::new_v4(),
            "Hello".to_string(),
            "hello-world".to_string(),
            "Body".to_string(),
        );
        post.publish = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();

        assert_eq!(post.public_path(), "/posts/2024/03/07/hello-world");
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(PostStatus::parse("draft"), Some(PostStatus::Draft));
        assert_eq!(PostStatus::parse("published"), Some(PostStatus::Published));
        assert_eq!(PostStatus::parse("archived"), None);
        assert_eq!(PostStatus::Published.as_str(), "published");
    }
}
