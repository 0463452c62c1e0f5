//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use chronicle_core::domain::{Comment, Post, PostStatus, Tag, User};
use chronicle_core::error::RepoError;
use chronicle_core::ports::{
    CommentRepository, Page, PostFilter, PostRepository, TagRepository, UserRepository,
};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// Filter clause selecting published posts.
fn published() -> sea_orm::sea_query::SimpleExpr {
    post::Column::Status.eq(PostStatus::Published.as_str())
}

/// UTC range [midnight, next midnight) covering one calendar date.
fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc();
    (start, start + TimeDelta::days(1))
}

/// Fetch one page of `query`, clamping past-the-end requests to the last
/// page. `page` is 1-based; zero behaves like one.
async fn fetch_clamped_page(
    query: sea_orm::Select<PostEntity>,
    db: &sea_orm::DbConn,
    page: u64,
    page_size: u64,
) -> Result<Page<Post>, RepoError> {
    let paginator = query.paginate(db, page_size);
    let counts = paginator.num_items_and_pages().await.map_err(map_db_err)?;

    let page = page.max(1).min(counts.number_of_pages.max(1));
    let items = paginator.fetch_page(page - 1).await.map_err(map_db_err)?;

    Ok(Page {
        items: items.into_iter().map(Into::into).collect(),
        page,
        page_size,
        total_pages: counts.number_of_pages,
        total_items: counts.number_of_items,
    })
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn published_page(
        &self,
        tag_id: Option<Uuid>,
        page: u64,
        page_size: u64,
    ) -> Result<Page<Post>, RepoError> {
        let mut query = PostEntity::find()
            .filter(published())
            .order_by_desc(post::Column::Publish);

        if let Some(tag_id) = tag_id {
            query = query
                .join(JoinType::InnerJoin, post::Relation::PostTags.def())
                .filter(post_tag::Column::TagId.eq(tag_id));
        }

        fetch_clamped_page(query, &self.db, page, page_size).await
    }

    async fn find_published_by_slug_and_date(
        &self,
        slug: &str,
        date: NaiveDate,
    ) -> Result<Option<Post>, RepoError> {
        let (start, end) = day_bounds(date);

        let result = PostEntity::find()
            .filter(published())
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::Publish.gte(start))
            .filter(post::Column::Publish.lt(end))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_published_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .filter(published())
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn similar_to(
        &self,
        post_id: Uuid,
        tag_ids: &[Uuid],
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        // Rank by how many of the given tags each post shares, newest first
        // among equals.
        let result = PostEntity::find()
            .join(JoinType::InnerJoin, post::Relation::PostTags.def())
            .filter(post_tag::Column::TagId.is_in(tag_ids.iter().copied()))
            .filter(post::Column::Id.ne(post_id))
            .filter(published())
            .group_by(post::Column::Id)
            .order_by_desc(post_tag::Column::TagId.count())
            .order_by_desc(post::Column::Publish)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn search_published(&self, query: &str) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(published())
            .filter(Expr::cust_with_values(
                "to_tsvector('english', title || ' ' || body) @@ plainto_tsquery('english', $1)",
                [query],
            ))
            .order_by_desc(post::Column::Publish)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn latest_published(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(published())
            .order_by_desc(post::Column::Publish)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn all_published(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(published())
            .order_by_desc(post::Column::Publish)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn most_commented(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        // Left join so posts without comments still rank (with zero).
        let result = PostEntity::find()
            .join(JoinType::LeftJoin, post::Relation::Comments.def())
            .filter(published())
            .group_by(post::Column::Id)
            .order_by_desc(comment::Column::Id.count())
            .order_by_desc(post::Column::Publish)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_published(&self) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(published())
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn filtered_page(
        &self,
        filter: &PostFilter,
        page: u64,
        page_size: u64,
    ) -> Result<Page<Post>, RepoError> {
        let mut query = PostEntity::find()
            .order_by_asc(post::Column::Status)
            .order_by_desc(post::Column::Publish);

        if let Some(status) = filter.status {
            query = query.filter(post::Column::Status.eq(status.as_str()));
        }
        if let Some(author_id) = filter.author_id {
            query = query.filter(post::Column::AuthorId.eq(author_id));
        }
        if let Some(search) = filter.search.as_deref() {
            let pattern = format!("%{}%", search);
            query = query.filter(
                Condition::any()
                    .add(Expr::col(post::Column::Title).ilike(pattern.clone()))
                    .add(Expr::col(post::Column::Body).ilike(pattern)),
            );
        }

        fetch_clamped_page(query, &self.db, page, page_size).await
    }

    async fn slug_taken_on(
        &self,
        slug: &str,
        date: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<bool, RepoError> {
        let (start, end) = day_bounds(date);

        let mut query = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::Publish.gte(start))
            .filter(post::Column::Publish.lt(end));

        if let Some(id) = exclude {
            query = query.filter(post::Column::Id.ne(id));
        }

        let count = query.count(&self.db).await.map_err(map_db_err)?;
        Ok(count > 0)
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn active_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::Active.eq(true))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn all_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_or_create(&self, name: &str) -> Result<Tag, RepoError> {
        if let Some(existing) = TagEntity::find()
            .filter(tag::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        {
            return Ok(existing.into());
        }

        let fresh = Tag::new(name.to_string());
        let active: tag::ActiveModel = fresh.clone().into();

        match TagEntity::insert(active).exec(&self.db).await {
            Ok(_) => Ok(fresh),
            // Lost a race to a concurrent insert; the row exists now.
            Err(e) if e.to_string().contains("duplicate") || e.to_string().contains("unique") => {
                let existing = TagEntity::find()
                    .filter(tag::Column::Name.eq(name))
                    .one(&self.db)
                    .await
                    .map_err(map_db_err)?
                    .ok_or(RepoError::NotFound)?;
                Ok(existing.into())
            }
            Err(e) => Err(map_db_err(e)),
        }
    }

    async fn set_post_tags(&self, post_id: Uuid, tag_ids: &[Uuid]) -> Result<(), RepoError> {
        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if tag_ids.is_empty() {
            return Ok(());
        }

        let links = tag_ids.iter().map(|tag_id| post_tag::ActiveModel {
            post_id: Set(post_id),
            tag_id: Set(*tag_id),
        });

        PostTagEntity::insert_many(links)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn tags_for_post(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .join(JoinType::InnerJoin, tag::Relation::PostTags.def())
            .filter(post_tag::Column::PostId.eq(post_id))
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn tags_for_posts(&self, post_ids: &[Uuid]) -> Result<Vec<(Uuid, Tag)>, RepoError> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = PostTagEntity::find()
            .find_also_related(TagEntity)
            .filter(post_tag::Column::PostId.is_in(post_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .filter_map(|(link, tag)| tag.map(|t| (link.post_id, t.into())))
            .collect())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

/// Mask an email address so it can be logged without leaking PII.
fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            if local.len() > 1 {
                format!("{}***{}", &local[..1], domain)
            } else {
                format!("***{}", domain)
            }
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("author@example.com"), "a***@example.com");
        assert_eq!(mask_email("a@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_day_bounds_cover_one_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let (start, end) = day_bounds(date);

        assert_eq!(start.to_rfc3339(), "2024-03-07T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2024-03-08T00:00:00+00:00");
    }
}
