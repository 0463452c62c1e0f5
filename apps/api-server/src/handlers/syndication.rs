//! Machine-readable syndication endpoints: RSS feed and sitemap.

use actix_web::{HttpResponse, web};
use rss::{Channel, ChannelBuilder, Item, ItemBuilder};

use chronicle_core::domain::Post;
use chronicle_core::text::truncate_words;

use crate::config::SiteConfig;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// How many posts the RSS feed carries.
const FEED_ITEM_LIMIT: u64 = 5;
/// Feed descriptions are the opening words of the post body.
const FEED_DESCRIPTION_WORDS: usize = 30;

fn absolute_url(site: &SiteConfig, path: &str) -> String {
    format!("{}{}", site.base_url, path)
}

/// GET /feed.xml
pub async fn feed(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.latest_published(FEED_ITEM_LIMIT).await?;
    let channel = build_channel(&state.config.site, &posts);

    Ok(HttpResponse::Ok()
        .content_type("application/rss+xml; charset=utf-8")
        .body(channel.to_string()))
}

fn build_channel(site: &SiteConfig, posts: &[Post]) -> Channel {
    let items: Vec<Item> = posts
        .iter()
        .map(|post| {
            ItemBuilder::default()
                .title(Some(post.title.clone()))
                .link(Some(absolute_url(site, &post.public_path())))
                .description(Some(truncate_words(&post.body, FEED_DESCRIPTION_WORDS)))
                .pub_date(Some(post.publish.to_rfc2822()))
                .build()
        })
        .collect();

    ChannelBuilder::default()
        .title(site.title.clone())
        .link(absolute_url(site, "/posts"))
        .description(site.description.clone())
        .items(items)
        .build()
}

/// GET /sitemap.xml
pub async fn sitemap(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.all_published().await?;
    let xml = build_sitemap(&state.config.site, &posts);

    Ok(HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(xml))
}

fn build_sitemap(site: &SiteConfig, posts: &[Post]) -> String {
    use std::fmt::Write;

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for post in posts {
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    \
             <changefreq>weekly</changefreq>\n    <priority>0.9</priority>\n  </url>\n",
            xml_escape(&absolute_url(site, &post.public_path())),
            post.updated_at.format("%Y-%m-%d"),
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

fn xml_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use chronicle_core::domain::PostStatus;
    use uuid::Uuid;

    fn site() -> SiteConfig {
        SiteConfig {
            base_url: "http://blog.test".to_string(),
            title: "Test Blog".to_string(),
            description: "Posts under test.".to_string(),
        }
    }

    fn published_post(title: &str, slug: &str) -> Post {
        let mut post = Post::new(
            Uuid::new_v4(),
            title.to_string(),
            slug.to_string(),
            "one two three four five".to_string(),
        );
        post.status = PostStatus::Published;
        post.publish = Utc.with_ymd_and_hms(2024, 3, 7, 9, 30, 0).unwrap();
        post.updated_at = post.publish;
        post
    }

    #[test]
    fn test_channel_carries_site_identity_and_items() {
        let posts = vec![published_post("First", "first"), published_post("Second", "second")];

        let channel = build_channel(&site(), &posts);

        assert_eq!(channel.title(), "Test Blog");
        assert_eq!(channel.link(), "http://blog.test/posts");
        assert_eq!(channel.items().len(), 2);
        assert_eq!(channel.items()[0].title(), Some("First"));
        assert_eq!(
            channel.items()[0].link(),
            Some("http://blog.test/posts/2024/03/07/first")
        );
    }

    #[test]
    fn test_feed_description_truncates_body() {
        let mut post = published_post("Long", "long");
        post.body = (0..100).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");

        let channel = build_channel(&site(), &[post]);
        let description = channel.items()[0].description().unwrap();

        assert_eq!(description.split_whitespace().count(), 30);
        assert!(description.ends_with('…'));
    }

    #[test]
    fn test_sitemap_lists_posts_with_metadata() {
        let xml = build_sitemap(&site(), &[published_post("First", "first")]);

        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<loc>http://blog.test/posts/2024/03/07/first</loc>"));
        assert!(xml.contains("<lastmod>2024-03-07</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.9</priority>"));
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("a&b<c>"), "a&amp;b&lt;c&gt;");
    }
}
