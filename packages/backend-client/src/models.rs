//! Backend record models and write payloads

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque record identifier.
///
/// The backend hands out integer ids but callers pass them around as
/// strings, so ids are compared as strings and written back as integers
/// whenever they round-trip cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    /// Wrap a raw id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// String form of the id
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn as_integer(&self) -> Option<i64> {
        self.0
            .parse::<i64>()
            .ok()
            .filter(|n| n.to_string() == self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_integer() {
            Some(n) => serializer.serialize_i64(n),
            None => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Integer(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Integer(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

/// Book genre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Genre {
    Adventure,
    Children,
    Classics,
    ComicGraphicNovel,
    DetectiveMystery,
    Dystopia,
    Fantasy,
    Horror,
    Humor,
    NonFiction,
    ScienceFiction,
    Romance,
    Thriller,
    Western,
}

/// An author record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: EntityId,
    pub name: String,
}

/// A book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub genre: Option<Genre>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// A review record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: EntityId,
    pub book_id: EntityId,
    /// The reviewer
    pub user_id: EntityId,
    pub rating: u8,
    #[serde(default)]
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub email: String,
    pub name: String,
    pub username: String,
}

/// Join record placing a book in a user's library (`userBooks`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    pub id: EntityId,
    pub user_id: EntityId,
    pub book_id: EntityId,
    pub created_at: DateTime<Utc>,
}

/// Join record linking a book and one of its authors (`bookAuthors`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAuthor {
    pub id: EntityId,
    pub book_id: EntityId,
    pub author_id: EntityId,
}

/// Either kind of person the search surface can return
#[derive(Debug, Clone, PartialEq)]
pub enum Person {
    Author(Author),
    User(User),
}

impl Person {
    /// Display name used for ordering search results
    pub fn name(&self) -> &str {
        match self {
            Person::Author(author) => &author.name,
            Person::User(user) => &user.name,
        }
    }
}

/// Either kind of record a book search can return
#[derive(Debug, Clone, PartialEq)]
pub enum BookResult {
    Book(Book),
    Author(Author),
}

impl BookResult {
    /// Title or name used for ordering search results
    pub fn label(&self) -> &str {
        match self {
            BookResult::Book(book) => &book.title,
            BookResult::Author(author) => &author.name,
        }
    }
}

// ========== Write payloads ==========

/// Input for creating an author
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAuthor {
    pub name: String,
}

/// Input for creating a book
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewBook {
    pub author_ids: Vec<EntityId>,
    pub cover: Option<String>,
    pub genre: Option<Genre>,
    pub summary: Option<String>,
    pub title: String,
}

/// Input for creating a review
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub book_id: EntityId,
    pub rating: u8,
    pub reviewer_id: EntityId,
    pub text: Option<String>,
}

/// Input for updating a review
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewUpdate {
    pub id: EntityId,
    pub rating: u8,
    pub text: Option<String>,
}

/// Input for signing up a user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub username: String,
}

/// Input for adding books to, or removing books from, a user's library
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryUpdate {
    pub book_ids: Vec<EntityId>,
    pub user_id: EntityId,
}

// Wire bodies sent to the backend

#[derive(Debug, Serialize)]
pub(crate) struct BookRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<Genre>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<&'a str>,
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookAuthorRecord<'a> {
    pub book_id: &'a EntityId,
    pub author_id: &'a EntityId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    pub book_id: &'a EntityId,
    pub created_at: DateTime<Utc>,
    pub rating: u8,
    pub user_id: &'a EntityId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewPatch<'a> {
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LibraryEntryRecord<'a> {
    pub book_id: &'a EntityId,
    pub created_at: DateTime<Utc>,
    pub user_id: &'a EntityId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_id_accepts_integers_and_strings() {
        let from_int: EntityId = serde_json::from_value(json!(42)).unwrap();
        let from_str: EntityId = serde_json::from_value(json!("42")).unwrap();
        assert_eq!(from_int, from_str);
        assert_eq!(from_int.as_str(), "42");
    }

    #[test]
    fn test_entity_id_serializes_numeric_ids_as_integers() {
        assert_eq!(serde_json::to_value(EntityId::from("7")).unwrap(), json!(7));
        assert_eq!(
            serde_json::to_value(EntityId::from("007")).unwrap(),
            json!("007")
        );
        assert_eq!(
            serde_json::to_value(EntityId::from("abc")).unwrap(),
            json!("abc")
        );
    }

    #[test]
    fn test_genre_wire_names() {
        assert_eq!(
            serde_json::to_value(Genre::ComicGraphicNovel).unwrap(),
            json!("COMIC_GRAPHIC_NOVEL")
        );
        let genre: Genre = serde_json::from_value(json!("SCIENCE_FICTION")).unwrap();
        assert_eq!(genre, Genre::ScienceFiction);
    }

    #[test]
    fn test_review_deserializes_backend_shape() {
        let review: Review = serde_json::from_value(json!({
            "id": 3,
            "bookId": 1,
            "userId": 2,
            "rating": 4,
            "createdAt": "2021-03-04T05:06:07.000Z"
        }))
        .unwrap();
        assert_eq!(review.book_id.as_str(), "1");
        assert_eq!(review.user_id.as_str(), "2");
        assert!(review.text.is_none());
        assert!(review.updated_at.is_none());
    }

    #[test]
    fn test_book_record_skips_absent_fields() {
        let body = serde_json::to_value(BookRecord {
            cover: None,
            genre: Some(Genre::Fantasy),
            summary: None,
            title: "The Hobbit",
        })
        .unwrap();
        assert_eq!(body, json!({ "genre": "FANTASY", "title": "The Hobbit" }));
    }

    #[test]
    fn test_person_and_book_result_labels() {
        let author = Author {
            id: EntityId::from("1"),
            name: "Ursula K. Le Guin".to_string(),
        };
        assert_eq!(Person::Author(author.clone()).name(), "Ursula K. Le Guin");
        assert_eq!(BookResult::Author(author).label(), "Ursula K. Le Guin");
    }
}
