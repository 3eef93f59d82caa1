use crate::adapters::http::HttpClient;
use crate::adapters::placeholder_api::PlaceholderClient;
use crate::config::toml_config::AppConfig;
use crate::core::stats::{average_posts_per_user, email_domains, PostStats};
use crate::domain::model::{NewPost, Post};
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct PostsRequest {
    pub post_id: u64,
    pub missing_post_id: u64,
    pub user_id: Option<u64>,
    pub create: bool,
}

impl Default for PostsRequest {
    fn default() -> Self {
        Self {
            post_id: 1,
            missing_post_id: 9999,
            user_id: None,
            create: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostsReport {
    pub stats: PostStats,
    pub post: Option<Post>,
    pub missing_post_absent: bool,
    pub user_posts: Option<Vec<Post>>,
    pub user_count: usize,
    pub average_posts_per_user: f64,
    pub email_domains: Vec<String>,
    pub created: Option<Post>,
}

/// 依序呼叫 JSONPlaceholder，每一步都記錄結果
pub async fn run_posts(config: &AppConfig, request: &PostsRequest) -> Result<PostsReport> {
    let client = PlaceholderClient::new(
        HttpClient::new(&config.http)?,
        config.http.placeholder_base_url.clone(),
    );

    let posts = client.list_posts().await?;
    let stats = PostStats::from_posts(&posts);
    tracing::info!(
        "📊 {} posts from {} users, average title length {:.1}",
        stats.total_posts,
        stats.distinct_users,
        stats.average_title_length
    );

    let post = client.get_post(request.post_id).await?;
    match &post {
        Some(p) => tracing::info!("📄 Post {}: {}", p.id, p.title),
        None => tracing::warn!("Post {} not found", request.post_id),
    }

    // 預期會 404
    let missing = client.get_post(request.missing_post_id).await?;
    if missing.is_none() {
        tracing::info!("🔍 Post {} is missing, as expected", request.missing_post_id);
    } else {
        tracing::warn!("Post {} unexpectedly exists", request.missing_post_id);
    }

    let user_posts = match request.user_id {
        Some(user_id) => {
            let user_posts = client.posts_by_user(user_id).await?;
            tracing::info!("👤 User {} wrote {} posts", user_id, user_posts.len());
            Some(user_posts)
        }
        None => None,
    };

    let users = client.list_users().await?;
    let average = average_posts_per_user(&posts, &users);
    tracing::info!("👥 {} users, {:.2} posts per user", users.len(), average);

    let created = if request.create {
        let new_post = NewPost {
            user_id: request.user_id.unwrap_or(1),
            title: "Async drills".to_string(),
            body: "Posted from the async-drills CLI".to_string(),
        };
        let created = client.create_post(&new_post).await?;
        tracing::info!("✅ Created post with id {}", created.id);
        Some(created)
    } else {
        None
    };

    Ok(PostsReport {
        stats,
        post,
        missing_post_absent: missing.is_none(),
        user_posts,
        user_count: users.len(),
        average_posts_per_user: average,
        email_domains: email_domains(&users),
        created,
    })
}
