//! The bookshop side of the catalog: books, customers and salespeople.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const BOOK_TEXT_MAX_CHARS: usize = 120;
pub const PERSON_NAME_MAX_CHARS: usize = 120;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    #[default]
    Classic,
    Romantic,
    Comic,
    Fantasy,
    Horror,
    Educational,
}

impl Genre {
    pub const ALL: [Genre; 6] = [
        Genre::Classic,
        Genre::Romantic,
        Genre::Comic,
        Genre::Fantasy,
        Genre::Horror,
        Genre::Educational,
    ];

    /// Stored code, also the query parameter value.
    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Classic => "classic",
            Genre::Romantic => "romantic",
            Genre::Comic => "comic",
            Genre::Fantasy => "fantasy",
            Genre::Horror => "horror",
            Genre::Educational => "educational",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Genre::Classic => "Classic",
            Genre::Romantic => "Romantic",
            Genre::Comic => "Comic",
            Genre::Fantasy => "Fantasy",
            Genre::Horror => "Horror",
            Genre::Educational => "Educational",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BookType {
    #[default]
    Hardcover,
    Ebook,
    Audiobook,
}

impl BookType {
    pub const ALL: [BookType; 3] = [BookType::Hardcover, BookType::Ebook, BookType::Audiobook];

    pub fn as_str(self) -> &'static str {
        match self {
            BookType::Hardcover => "hardcover",
            BookType::Ebook => "ebook",
            BookType::Audiobook => "audiobook",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BookType::Hardcover => "Hard cover",
            BookType::Ebook => "E-book",
            BookType::Audiobook => "Audiobook",
        }
    }
}

impl fmt::Display for BookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A code that names no variant. Carries what kind of choice it was for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChoice {
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {}", self.field, self.value)
    }
}

impl std::error::Error for UnknownChoice {}

impl FromStr for Genre {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownChoice {
                field: "genre",
                value: s.to_string(),
            })
    }
}

impl FromStr for BookType {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownChoice {
                field: "book type",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub author_name: String,
    /// In US dollars.
    pub price: f64,
    pub genre: Genre,
    pub book_type: BookType,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salesperson {
    pub id: i32,
    /// Unique across all salespeople.
    pub username: String,
    pub name: String,
    pub bio: String,
}

/// Narrowing for the book listing. Text matches name or author, case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub text: Option<String>,
    pub genre: Option<Genre>,
    pub book_type: Option<BookType>,
}

impl BookQuery {
    /// Parse raw query values. Blank values mean no narrowing.
    pub fn parse(
        text: Option<&str>,
        genre: Option<&str>,
        book_type: Option<&str>,
    ) -> Result<Self, UnknownChoice> {
        fn present(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }
        Ok(BookQuery {
            text: present(text).map(str::to_string),
            genre: present(genre).map(str::parse).transpose()?,
            book_type: present(book_type).map(str::parse).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_classic_hardcover() {
        assert_eq!(Genre::default(), Genre::Classic);
        assert_eq!(BookType::default(), BookType::Hardcover);
    }

    #[test]
    fn test_choice_parse_is_exact() {
        assert_eq!("horror".parse::<Genre>(), Ok(Genre::Horror));
        assert_eq!("ebook".parse::<BookType>(), Ok(BookType::Ebook));
        assert!("Horror".parse::<Genre>().is_err());
        assert!(" ebook".parse::<BookType>().is_err());
        assert!("E-book".parse::<BookType>().is_err());

        let err = "poetry".parse::<Genre>().unwrap_err();
        assert_eq!(err.to_string(), "unknown genre: poetry");
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(
            serde_json::to_string(&BookType::Audiobook).unwrap(),
            "\"audiobook\""
        );
        let genre: Genre = serde_json::from_str("\"educational\"").unwrap();
        assert_eq!(genre, Genre::Educational);
    }

    #[test]
    fn test_book_query_blank_means_any() {
        let query = BookQuery::parse(Some("  "), Some(""), None).unwrap();
        assert_eq!(query, BookQuery::default());

        let query = BookQuery::parse(Some(" tolkien "), Some("fantasy"), Some("ebook")).unwrap();
        assert_eq!(query.text.as_deref(), Some("tolkien"));
        assert_eq!(query.genre, Some(Genre::Fantasy));
        assert_eq!(query.book_type, Some(BookType::Ebook));

        let err = BookQuery::parse(None, None, Some("paperback")).unwrap_err();
        assert_eq!(err.field, "book type");
    }

    #[test]
    fn test_book_displays_as_name() {
        let book = Book {
            id: 1,
            name: "Dune".to_string(),
            author_name: "Frank Herbert".to_string(),
            price: 9.99,
            genre: Genre::Fantasy,
            book_type: BookType::Hardcover,
        };
        assert_eq!(book.to_string(), "Dune");
    }
}
