#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use chronicle_core::domain::{Comment, Post, PostStatus, Tag};
    use chronicle_core::ports::{BaseRepository, CommentRepository, PostRepository, TagRepository};

    use crate::database::entity::{comment, post, tag};
    use crate::database::postgres_repo::{
        PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository,
    };

    fn post_model(title: &str, slug: &str, status: &str) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id: uuid::Uuid::new_v4(),
            author_id: uuid::Uuid::new_v4(),
            title: title.to_owned(),
            slug: slug.to_owned(),
            body: "Body".to_owned(),
            status: status.to_owned(),
            publish: now.into(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let model = post_model("Test Post", "test-post", "published");
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.status, PostStatus::Published);
    }

    #[tokio::test]
    async fn test_permalink_lookup_maps_model() {
        let model = post_model("Hello", "hello", "published");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

        let post = repo
            .find_published_by_slug_and_date("hello", date)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(post.slug, "hello");
        assert!(post.is_published());
    }

    #[tokio::test]
    async fn test_permalink_lookup_miss_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

        let result = repo
            .find_published_by_slug_and_date("missing", date)
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_similar_to_without_tags_skips_query() {
        // No query results appended: hitting the database would error.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = PostgresPostRepository::new(db);

        let similar = repo
            .similar_to(uuid::Uuid::new_v4(), &[], 4)
            .await
            .unwrap();

        assert!(similar.is_empty());
    }

    #[tokio::test]
    async fn test_active_comments_map_to_domain() {
        let now = chrono::Utc::now();
        let post_id = uuid::Uuid::new_v4();
        let model = comment::Model {
            id: uuid::Uuid::new_v4(),
            post_id,
            name: "Reader".to_owned(),
            email: "reader@example.com".to_owned(),
            body: "Nice post".to_owned(),
            active: true,
            created_at: now.into(),
            updated_at: now.into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);

        let comments: Vec<Comment> = repo.active_for_post(post_id).await.unwrap();

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].name, "Reader");
        assert!(comments[0].active);
    }

    #[tokio::test]
    async fn test_find_or_create_returns_existing_tag() {
        let now = chrono::Utc::now();
        let model = tag::Model {
            id: uuid::Uuid::new_v4(),
            name: "Rust".to_owned(),
            slug: "rust".to_owned(),
            created_at: now.into(),
        };
        let tag_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresTagRepository::new(db);

        let tag: Tag = repo.find_or_create("Rust").await.unwrap();

        assert_eq!(tag.id, tag_id);
        assert_eq!(tag.slug, "rust");
    }

    #[tokio::test]
    async fn test_set_post_tags_empty_only_deletes() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            }])
            .into_connection();

        let repo = PostgresTagRepository::new(db);

        repo.set_post_tags(uuid::Uuid::new_v4(), &[]).await.unwrap();
    }
}
