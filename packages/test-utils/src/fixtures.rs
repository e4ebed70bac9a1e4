//! Record fixtures in the backend's JSON shape

use serde_json::{json, Value};

/// Fixture for author records
#[derive(Debug, Clone)]
pub struct AuthorFixture {
    pub id: i64,
    pub name: String,
}

impl AuthorFixture {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> Value {
        json!({ "id": self.id, "name": self.name })
    }
}

/// Fixture for book records
#[derive(Debug, Clone)]
pub struct BookFixture {
    pub id: i64,
    pub title: String,
    pub cover: Option<String>,
    pub genre: Option<String>,
    pub summary: Option<String>,
}

impl BookFixture {
    /// Create a book with a cover, genre and summary
    pub fn new(id: i64, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            cover: Some(format!(
                "https://covers.example.com/{}.jpg",
                title.to_lowercase().replace(' ', "-")
            )),
            genre: Some("SCIENCE_FICTION".to_string()),
            summary: Some(format!("Summary of {}", title)),
        }
    }

    /// Create a book with only a title
    pub fn bare(id: i64, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            cover: None,
            genre: None,
            summary: None,
        }
    }

    /// Convert to JSON value, leaving out absent fields like the backend does
    pub fn to_json(&self) -> Value {
        let mut value = json!({ "id": self.id, "title": self.title });
        if let Some(cover) = &self.cover {
            value["cover"] = json!(cover);
        }
        if let Some(genre) = &self.genre {
            value["genre"] = json!(genre);
        }
        if let Some(summary) = &self.summary {
            value["summary"] = json!(summary);
        }
        value
    }
}

/// Fixture for review records
#[derive(Debug, Clone)]
pub struct ReviewFixture {
    pub id: i64,
    pub book_id: i64,
    pub user_id: i64,
    pub rating: u8,
    pub text: Option<String>,
    pub created_at: String,
}

impl ReviewFixture {
    pub fn new(id: i64, book_id: i64, user_id: i64, rating: u8) -> Self {
        Self {
            id,
            book_id,
            user_id,
            rating,
            text: Some("Loved it".to_string()),
            created_at: "2021-05-01T12:00:00.000Z".to_string(),
        }
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "bookId": self.book_id,
            "userId": self.user_id,
            "rating": self.rating,
            "text": self.text,
            "createdAt": self.created_at
        })
    }
}

/// Fixture for user records
#[derive(Debug, Clone)]
pub struct UserFixture {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub username: String,
}

impl UserFixture {
    /// Create a user whose email and display name derive from the username
    pub fn new(id: i64, username: &str) -> Self {
        Self {
            id,
            email: format!("{}@example.com", username),
            name: username.to_string(),
            username: username.to_string(),
        }
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "email": self.email,
            "name": self.name,
            "username": self.username
        })
    }
}

/// Fixture for `userBooks` join records
#[derive(Debug, Clone)]
pub struct LibraryEntryFixture {
    pub id: i64,
    pub user_id: i64,
    pub book: BookFixture,
    pub created_at: String,
}

impl LibraryEntryFixture {
    pub fn new(id: i64, user_id: i64, book: BookFixture) -> Self {
        Self {
            id,
            user_id,
            book,
            created_at: "2021-06-01T09:30:00.000Z".to_string(),
        }
    }

    /// Join record as stored, without the expanded book
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "userId": self.user_id,
            "bookId": self.book.id,
            "createdAt": self.created_at
        })
    }

    /// Join record with the book inlined, as returned for `_expand=book`
    pub fn to_expanded_json(&self) -> Value {
        let mut value = self.to_json();
        value["book"] = self.book.to_json();
        value
    }
}

/// Fixture for `bookAuthors` join records
#[derive(Debug, Clone)]
pub struct BookAuthorFixture {
    pub id: i64,
    pub book: BookFixture,
    pub author: AuthorFixture,
}

impl BookAuthorFixture {
    pub fn new(id: i64, book: BookFixture, author: AuthorFixture) -> Self {
        Self { id, book, author }
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "bookId": self.book.id,
            "authorId": self.author.id
        })
    }

    /// Join record with one side inlined (`"book"` or `"author"`)
    pub fn to_expanded_json(&self, expand: &str) -> Value {
        let mut value = self.to_json();
        match expand {
            "book" => value["book"] = self.book.to_json(),
            "author" => value["author"] = self.author.to_json(),
            _ => {}
        }
        value
    }
}
