use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Named size variants Unsplash publishes for every photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoSize {
    Raw,
    Full,
    Regular,
    Small,
    Thumb,
}

impl PhotoSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhotoSize::Raw => "raw",
            PhotoSize::Full => "full",
            PhotoSize::Regular => "regular",
            PhotoSize::Small => "small",
            PhotoSize::Thumb => "thumb",
        }
    }
}

impl fmt::Display for PhotoSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhotoSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(PhotoSize::Raw),
            "full" => Ok(PhotoSize::Full),
            "regular" => Ok(PhotoSize::Regular),
            "small" => Ok(PhotoSize::Small),
            "thumb" => Ok(PhotoSize::Thumb),
            other => Err(format!("unknown photo size: {}", other)),
        }
    }
}

/// Photo metadata as returned by the Unsplash API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    /// Size variant name -> URL. Kept as strings so variants we don't model
    /// (e.g. `small_s3`) survive decoding.
    pub urls: HashMap<String, String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alt_description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user: Option<PhotoUser>,
}

impl Photo {
    pub fn url(&self, size: PhotoSize) -> Option<&str> {
        self.urls.get(size.as_str()).map(String::as_str)
    }

    pub fn regular_url(&self) -> Option<&str> {
        self.url(PhotoSize::Regular)
    }

    pub fn small_url(&self) -> Option<&str> {
        self.url(PhotoSize::Small)
    }

    /// Best human readable caption, falling back to the id
    pub fn caption(&self) -> &str {
        self.description
            .as_deref()
            .or(self.alt_description.as_deref())
            .unwrap_or(&self.id)
    }

    pub fn photographer(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoUser {
    #[serde(default)]
    pub username: Option<String>,
    pub name: String,
}

// --- API Response Structures ---

/// One page of photos from the photo source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoPage {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<usize>,
    pub results: Vec<Photo>,
}

impl PhotoPage {
    pub fn new(results: Vec<Photo>) -> Self {
        Self {
            total: None,
            total_pages: None,
            results,
        }
    }
}
