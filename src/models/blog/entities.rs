use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    #[ts(export, export_to = "blog.ts")]
    pub enum PostStatus {
        Draft => "draft",
        Published => "published",
        Archived => "archived",
    }
}

string_enum! {
    #[ts(export, export_to = "blog.ts")]
    pub enum PostCategory {
        News => "news",
        Events => "events",
        Academics => "academics",
        Sports => "sports",
        Announcements => "announcements",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "blog.ts")]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category: PostCategory,
    pub status: PostStatus,
    pub author_id: i64,
    pub view_count: i64,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Excerpt if set, otherwise the first characters of the content.
    pub fn summary(&self, max_chars: usize) -> String {
        match &self.excerpt {
            Some(excerpt) if !excerpt.trim().is_empty() => excerpt.clone(),
            _ => {
                let mut summary: String = self.content.chars().take(max_chars).collect();
                if self.content.chars().count() > max_chars {
                    summary.push_str("...");
                }
                summary
            }
        }
    }
}
