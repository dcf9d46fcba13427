//! Server-rendered news pages built from published posts.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use askama::Template;
use tracing::error;

use super::BlogService;
use super::public::{published_filter, read_post};
use crate::config::AppConfig;
use crate::models::blog::entities::BlogPost;
use crate::models::blog::requests::PublicPostListParams;

const SUMMARY_CHARS: usize = 200;

pub struct NewsCard {
    pub title: String,
    pub slug: String,
    pub category: String,
    pub published: String,
    pub summary: String,
}

impl From<&BlogPost> for NewsCard {
    fn from(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            category: post.category.to_string(),
            published: published_label(post),
            summary: post.summary(SUMMARY_CHARS),
        }
    }
}

#[derive(Template)]
#[template(path = "news_list.html")]
pub struct NewsListPage {
    pub school_name: String,
    pub posts: Vec<NewsCard>,
    pub page: i64,
    pub total_pages: i64,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Template)]
#[template(path = "news_post.html")]
pub struct NewsPostPage {
    pub school_name: String,
    pub title: String,
    pub category: String,
    pub published: String,
    pub view_count: i64,
    pub paragraphs: Vec<String>,
}

#[derive(Template)]
#[template(path = "news_missing.html")]
pub struct NewsMissingPage {
    pub school_name: String,
}

fn published_label(post: &BlogPost) -> String {
    post.published_at
        .unwrap_or(post.created_at)
        .format("%d %B %Y")
        .to_string()
}

/// Blank-line separated blocks of the post body.
pub fn paragraphs(content: &str) -> Vec<String> {
    content
        .replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn html(status: StatusCode, page: &impl Template) -> HttpResponse {
    match page.render() {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            error!("Failed to render news page: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

impl BlogService {
    pub async fn news_index(
        &self,
        query: PublicPostListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let school_name = AppConfig::get().app.school_name.clone();
        let posts = match storage
            .list_posts(
                query.pagination.page(),
                query.pagination.size(),
                published_filter(&query),
            )
            .await
        {
            Ok(posts) => posts,
            Err(e) => {
                error!("Failed to load news: {}", e);
                return Ok(HttpResponse::InternalServerError().finish());
            }
        };

        let info = posts.pagination;
        let page = NewsListPage {
            school_name,
            posts: posts.items.iter().map(NewsCard::from).collect(),
            page: info.page,
            total_pages: info.total_pages,
            has_prev: info.page > 1,
            has_next: info.page < info.total_pages,
        };
        Ok(html(StatusCode::OK, &page))
    }

    pub async fn news_post(&self, slug: &str, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let school_name = AppConfig::get().app.school_name.clone();
        match read_post(storage.as_ref(), slug).await {
            Ok(post) => {
                let page = NewsPostPage {
                    school_name,
                    published: published_label(&post),
                    category: post.category.to_string(),
                    view_count: post.view_count,
                    paragraphs: paragraphs(&post.content),
                    title: post.title,
                };
                Ok(html(StatusCode::OK, &page))
            }
            Err(response) if response.status() == StatusCode::NOT_FOUND => {
                Ok(html(StatusCode::NOT_FOUND, &NewsMissingPage { school_name }))
            }
            Err(response) => Ok(response),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        assert_eq!(
            paragraphs("First line\r\n\r\nSecond\n\n\n  \nThird"),
            vec!["First line", "Second", "Third"]
        );
        assert!(paragraphs("   ").is_empty());
    }

    #[test]
    fn test_post_page_escapes_html() {
        let page = NewsPostPage {
            school_name: "Regisbridge".to_string(),
            title: "<script>alert('x')</script>".to_string(),
            category: "news".to_string(),
            published: "01 March 2025".to_string(),
            view_count: 3,
            paragraphs: vec!["Fish & chips <b>today</b>".to_string()],
        };
        let body = page.render().expect("renders");
        assert!(!body.contains("<script>alert"));
        assert!(body.contains("&lt;script&gt;"));
        assert!(body.contains("Fish &amp; chips &lt;b&gt;today"));
    }

    #[test]
    fn test_list_page_links_posts() {
        let page = NewsListPage {
            school_name: "Regisbridge".to_string(),
            posts: vec![NewsCard {
                title: "Open Day".to_string(),
                slug: "open-day".to_string(),
                category: "events".to_string(),
                published: "01 March 2025".to_string(),
                summary: "Come visit".to_string(),
            }],
            page: 1,
            total_pages: 2,
            has_prev: false,
            has_next: true,
        };
        let body = page.render().expect("renders");
        assert!(body.contains("href=\"/news/open-day\""));
        assert!(body.contains("page=2"));
    }
}
