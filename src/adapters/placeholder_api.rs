use crate::adapters::http::{endpoint, HttpClient};
use crate::domain::model::{NewPost, Post, User};
use crate::utils::error::Result;

pub const DEFAULT_PLACEHOLDER_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// JSONPlaceholder demo API client
#[derive(Debug, Clone)]
pub struct PlaceholderClient {
    http: HttpClient,
    base_url: String,
}

impl PlaceholderClient {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        let url = endpoint(&self.base_url, "posts")?;
        let posts: Vec<Post> = self.http.get_json(url.as_str()).await?;
        tracing::debug!("Fetched {} posts", posts.len());
        Ok(posts)
    }

    /// 不存在的 post 回傳 `Ok(None)`
    pub async fn get_post(&self, id: u64) -> Result<Option<Post>> {
        let url = endpoint(&self.base_url, &format!("posts/{}", id))?;
        self.http.get_json_optional(url.as_str()).await
    }

    pub async fn posts_by_user(&self, user_id: u64) -> Result<Vec<Post>> {
        let mut url = endpoint(&self.base_url, "posts")?;
        url.query_pairs_mut()
            .append_pair("userId", &user_id.to_string());
        self.http.get_json(url.as_str()).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let url = endpoint(&self.base_url, "users")?;
        let users: Vec<User> = self.http.get_json(url.as_str()).await?;
        tracing::debug!("Fetched {} users", users.len());
        Ok(users)
    }

    pub async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let url = endpoint(&self.base_url, "posts")?;
        self.http.post_json(url.as_str(), post).await
    }
}
