use crate::domain::model::{Post, User};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// 對 posts 做簡單的描述統計
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostStats {
    pub total_posts: usize,
    pub distinct_users: usize,
    pub average_title_length: f64,
    pub average_body_length: f64,
    pub average_body_words: f64,
    pub posts_per_user: BTreeMap<u64, usize>,
    pub longest_title: Option<String>,
}

impl PostStats {
    pub fn from_posts(posts: &[Post]) -> Self {
        let mut posts_per_user = BTreeMap::new();
        for post in posts {
            *posts_per_user.entry(post.user_id).or_insert(0) += 1;
        }

        let longest_title = posts
            .iter()
            .map(|p| &p.title)
            .fold(None::<&String>, |best, title| match best {
                Some(b) if b.chars().count() >= title.chars().count() => Some(b),
                _ => Some(title),
            })
            .cloned();

        Self {
            total_posts: posts.len(),
            distinct_users: posts_per_user.len(),
            average_title_length: average(posts.iter().map(|p| p.title.chars().count())),
            average_body_length: average(posts.iter().map(|p| p.body.chars().count())),
            average_body_words: average(posts.iter().map(|p| p.body.split_whitespace().count())),
            posts_per_user,
            longest_title,
        }
    }

    /// 發文最多的使用者，同數量取 id 較小者
    pub fn most_active_user(&self) -> Option<(u64, usize)> {
        self.posts_per_user
            .iter()
            .fold(None, |best: Option<(u64, usize)>, (&user, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((user, count)),
            })
    }
}

pub fn average_posts_per_user(posts: &[Post], users: &[User]) -> f64 {
    if users.is_empty() {
        return 0.0;
    }
    posts.len() as f64 / users.len() as f64
}

/// 使用者 email 的網域 (去重、排序)
pub fn email_domains(users: &[User]) -> Vec<String> {
    let domains: HashSet<String> = users
        .iter()
        .filter_map(|u| u.email.rsplit_once('@').map(|(_, d)| d.to_lowercase()))
        .collect();
    let mut domains: Vec<String> = domains.into_iter().collect();
    domains.sort();
    domains
}

fn average(values: impl Iterator<Item = usize>) -> f64 {
    let (sum, count) = values.fold((0usize, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
