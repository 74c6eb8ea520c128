use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// Image shown for a post until the author supplies one.
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400";

/// Upper bound on the number of tags a draft may carry.
pub const MAX_TAGS: usize = 5;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(PostId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Technology,
    Health,
    Science,
    Education,
    Business,
}

impl Category {
    /// Every category, in the order a select control lists them.
    pub const ALL: [Category; 5] = [
        Category::Technology,
        Category::Health,
        Category::Science,
        Category::Education,
        Category::Business,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Health => "Health",
            Category::Science => "Science",
            Category::Education => "Education",
            Category::Business => "Business",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FormError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Id,
    Title,
    Image,
    Content,
    Tags,
    Published,
    Category,
}

impl DraftField {
    pub fn as_str(self) -> &'static str {
        match self {
            DraftField::Id => "id",
            DraftField::Title => "title",
            DraftField::Image => "image",
            DraftField::Content => "content",
            DraftField::Tags => "tags",
            DraftField::Published => "published",
            DraftField::Category => "category",
        }
    }

    /// Whether `update_field` accepts this field.
    pub fn is_editable(self) -> bool {
        matches!(
            self,
            DraftField::Title | DraftField::Content | DraftField::Category | DraftField::Published
        )
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(DraftField::Id),
            "title" => Ok(DraftField::Title),
            "image" => Ok(DraftField::Image),
            "content" => Ok(DraftField::Content),
            "tags" => Ok(DraftField::Tags),
            "published" => Ok(DraftField::Published),
            "category" => Ok(DraftField::Category),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

/// Kind of input control a raw value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    #[default]
    Text,
    Textarea,
    Select,
    Radio,
}

impl FromStr for InputKind {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "text" => Ok(InputKind::Text),
            "textarea" => Ok(InputKind::Textarea),
            "select" => Ok(InputKind::Select),
            "radio" => Ok(InputKind::Radio),
            other => Err(FormError::UnknownInputKind(other.to_string())),
        }
    }
}

/// A post being composed.
///
/// `published` is tri-state: `None` until the author picks yes or no.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub id: Option<PostId>,
    pub title: String,
    pub image: String,
    pub content: String,
    pub tags: Vec<String>,
    pub published: Option<bool>,
    pub category: String,
}

impl Draft {
    /// An empty draft whose image points at `image`.
    pub fn with_image(image: impl Into<String>) -> Self {
        Self {
            id: None,
            title: String::new(),
            image: image.into(),
            content: String::new(),
            tags: Vec::new(),
            published: None,
            category: String::new(),
        }
    }

    /// The category as one of the known values, if it is one.
    pub fn category(&self) -> Option<Category> {
        self.category.parse().ok()
    }
}

impl Default for Draft {
    fn default() -> Self {
        Self::with_image(PLACEHOLDER_IMAGE)
    }
}
