//! The search store: the pre-generated array of post records the site's
//! full-text search widget consumes. No indexing happens here; the widget
//! builds its own index from this data at page load.

mod excerpt;

pub use excerpt::excerpt;

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{err, error};
use crate::error::{Chainable, Result};
use crate::util::slugify;

/// Words kept in a derived excerpt.
pub const EXCERPT_WORDS: usize = 50;

/// One post record. Serialization order matches the store the search
/// widget expects: title, excerpt, categories, tags, url, teaser.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Post {
    pub title: Arc<str>,
    pub excerpt: Arc<str>,
    pub categories: Vec<Arc<str>>,
    pub tags: Vec<Arc<str>>,
    pub url: Arc<str>,
    pub teaser: Option<Arc<str>>,
    #[serde(skip)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FrontMatter {
    title: Option<String>,
    date: Option<toml::value::Datetime>,
    tags: Vec<String>,
    categories: Vec<String>,
    teaser: Option<String>,
    excerpt: Option<String>,
    draft: bool,
}

impl Post {
    /// Parses a markdown post into its store record.
    ///
    /// `stem` is the source file's stem, which supplies the URL slug. The
    /// URL is `{root}/{YYYY-MM-DD}/{slug}`, dropping the date segment for
    /// undated posts. Returns `None` for drafts. Invalid front matter is an
    /// error; a missing front matter block is not.
    pub fn parse(stem: &str, text: &str, root: &str) -> Result<Option<Post>> {
        let (front, body) = split_front_matter(text);
        let front: FrontMatter = match front {
            Some(front) => toml::from_str(front).chain_with(|| error! {
                "invalid post front matter",
                "post" => stem,
            })?,
            None => FrontMatter::default(),
        };

        if front.draft {
            return Ok(None);
        }

        let date = front.date.map(post_date).transpose().chain_with(|| error! {
            "invalid post date",
            "post" => stem,
        })?;

        let slug = slugify(stem);
        let url = match date {
            Some(date) => format!("{root}/{}/{slug}", date.format("%Y-%m-%d")),
            None => format!("{root}/{slug}"),
        };

        let excerpt = front.excerpt
            .unwrap_or_else(|| excerpt::excerpt(body, EXCERPT_WORDS));

        Ok(Some(Post {
            title: front.title.as_deref().unwrap_or(stem).into(),
            excerpt: excerpt.into(),
            categories: front.categories.iter().map(|c| Arc::from(&**c)).collect(),
            tags: front.tags.iter().map(|t| Arc::from(&**t)).collect(),
            url: url.into(),
            teaser: front.teaser.map(Into::into),
            date,
        }))
    }
}

fn post_date(datetime: toml::value::Datetime) -> Result<NaiveDate> {
    let Some(date) = datetime.date else {
        return err!("post date must include a calendar date");
    };

    NaiveDate::from_ymd_opt(date.year as i32, date.month as u32, date.day as u32)
        .ok_or_else(|| error!("post date is out of range", "date" => datetime))
}

fn split_front_matter(input: &str) -> (Option<&str>, &str) {
    const PREFIX: &str = "+++\n";
    const SUFFIX: &str = "\n+++\n";

    if !input.starts_with(PREFIX) {
        return (None, input);
    }

    match input[PREFIX.len()..].split_once(SUFFIX) {
        Some((front, body)) => (Some(front), body),
        None => (None, input),
    }
}

/// The full search store, sorted by date then title.
#[derive(Debug, Default)]
pub struct Store {
    posts: Vec<Post>,
}

impl Store {
    pub fn from_posts(mut posts: Vec<Post>) -> Store {
        posts.sort_by(|a, b| (a.date, &a.title).cmp(&(b.date, &b.title)));
        Store { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.posts).expect("posts are valid JSON")
    }

    /// The store as the JavaScript source the search widget loads.
    pub fn to_js(&self) -> String {
        format!("var store = {};\n", self.to_json())
    }
}
