//! Typed projections used by downstream collaborators.
//!
//! The reader only knows [`Record`]; these shapes are built from it after the fact.

use crate::record::{project, Record};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use time::OffsetDateTime;

/// `created_utc` appears both as a number and as a quoted number across dump years.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Timestamp {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Timestamp {
    pub fn unix_seconds(&self) -> Option<i64> {
        match self {
            Timestamp::Int(n) => Some(*n),
            Timestamp::Float(f) => Some(*f as i64),
            Timestamp::Text(s) => s.trim().parse::<f64>().ok().map(|f| f as i64),
        }
    }

    pub fn to_datetime(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.unix_seconds()?).ok()
    }
}

/// `edited` is `false` for unedited posts, otherwise the edit timestamp.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Edited {
    Flag(bool),
    Int(i64),
    Float(f64),
}

#[derive(Clone, Debug, Deserialize)]
pub struct Submission {
    pub is_self: bool,
    pub created_utc: Timestamp,
    pub selftext: String,
    pub title: String,
    pub score: i64,
    pub permalink: String,
    pub over_18: bool,
    pub num_comments: i64,
    pub id: String,
    pub media_embed: Map<String, Value>,
    pub edited: Edited,
    pub thumbnail: String,

    pub ups: Option<i64>,
    pub downs: Option<i64>,
    pub subreddit: Option<String>,
    pub subreddit_id: Option<String>,
    pub author: Option<String>,
    pub stickied: Option<bool>,
    pub gilded: Option<i64>,
    pub retrieved_on: Option<i64>,
    pub archived: Option<bool>,
}

impl Submission {
    pub fn from_record(record: Record) -> Result<Self> {
        project(record).context("record is not a submission")
    }

    pub fn created_at(&self) -> Option<OffsetDateTime> {
        self.created_utc.to_datetime()
    }
}

/// Row shape of the subreddits table.
#[derive(Clone, Debug, PartialEq)]
pub struct SubredditRow {
    pub created: OffsetDateTime,
    pub guid: String,         // e.g. "t5_6"
    pub name: String,         // e.g. "news"
    pub info: String,
    pub lang: Option<String>, // ISO 639-1
    pub nsfw: Option<bool>,
}

#[derive(Deserialize)]
struct RawSubreddit {
    created_utc: Timestamp,
    name: String,
    display_name: String,
    title: Option<String>,
    header_title: Option<String>,
    description: Option<String>,
    public_description: Option<String>,
    lang: Option<String>,
    over18: Option<bool>,
}

impl SubredditRow {
    pub fn from_record(record: Record) -> Result<Self> {
        let raw: RawSubreddit = project(record).context("record is not a subreddit")?;
        let created = raw
            .created_utc
            .to_datetime()
            .ok_or_else(|| anyhow!("subreddit {} has an invalid created_utc", raw.name))?;
        let info = [&raw.title, &raw.header_title, &raw.description, &raw.public_description]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        Ok(Self {
            created,
            guid: raw.name,
            name: raw.display_name,
            info,
            lang: raw.lang.filter(|l| !l.is_empty()),
            nsfw: raw.over18,
        })
    }

    /// Main subreddit page, on old reddit.
    pub fn url(&self) -> String {
        format!("https://old.reddit.com/r/{}", self.name)
    }

    /// Reddit API endpoint with current information.
    pub fn api(&self) -> String {
        format!("https://www.reddit.com/api/info.json?id={}", self.guid)
    }
}
