//! Integration tests for relationship resolution and search

mod common;

use bookshelf_backend_client::{
    BookResult, EntityId, PageRequest, Person, SearchQuery, SortDirection,
};
use common::{
    link_header, setup, AuthorFixture, BookAuthorFixture, BookFixture, LibraryEntryFixture,
    UserFixture,
};

#[tokio::test]
async fn test_author_books_projects_join_records() {
    let (backend, client) = setup().await;
    let author = AuthorFixture::new(4, "Toni Morrison");
    let links = vec![
        BookAuthorFixture::new(1, BookFixture::bare(3, "Beloved"), author.clone()),
        BookAuthorFixture::new(2, BookFixture::bare(8, "Sula"), author.clone()),
    ];
    backend
        .mock_list(
            "bookAuthors",
            &[("_expand", "book"), ("authorId", "4")],
            links.iter().map(|link| link.to_expanded_json("book")).collect(),
        )
        .await;

    let books = client.author_books(&EntityId::from("4")).await.unwrap();

    let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Beloved", "Sula"]);
}

#[tokio::test]
async fn test_book_authors_projects_join_records() {
    let (backend, client) = setup().await;
    let book = BookFixture::bare(9, "Good Omens");
    let links = vec![
        BookAuthorFixture::new(1, book.clone(), AuthorFixture::new(1, "Terry Pratchett")),
        BookAuthorFixture::new(2, book.clone(), AuthorFixture::new(2, "Neil Gaiman")),
    ];
    backend
        .mock_list(
            "bookAuthors",
            &[("_expand", "author"), ("bookId", "9")],
            links.iter().map(|link| link.to_expanded_json("author")).collect(),
        )
        .await;

    let authors = client.book_authors(&EntityId::from("9")).await.unwrap();

    let names: Vec<_> = authors.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Terry Pratchett", "Neil Gaiman"]);
}

#[tokio::test]
async fn test_user_library_pages_join_records() {
    let (backend, client) = setup().await;
    let entries = vec![
        LibraryEntryFixture::new(11, 1, BookFixture::new(3, "Beloved")),
        LibraryEntryFixture::new(10, 1, BookFixture::new(5, "Kindred")),
    ];
    let link = link_header(&backend.url(), "userBooks", &[("next", 2)]);
    backend
        .mock_page(
            "userBooks",
            &[
                ("_sort", "createdAt"),
                ("_order", "desc"),
                ("_limit", "2"),
                ("_expand", "book"),
                ("userId", "1"),
            ],
            entries.iter().map(LibraryEntryFixture::to_expanded_json).collect(),
            5,
            Some(link),
        )
        .await;

    let page = client
        .user_library(&EntityId::from("1"), PageRequest::new().with_limit(2))
        .await
        .unwrap();

    let titles: Vec<_> = page.items.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Beloved", "Kindred"]);

    let info = page.page_info.unwrap();
    assert!(info.has_next_page);
    assert!(!info.has_prev_page);
    assert_eq!(info.total_count, 5);
}

#[tokio::test]
async fn test_user_by_username() {
    let (backend, client) = setup().await;
    backend
        .mock_list(
            "users",
            &[("username", "octavia")],
            vec![UserFixture::new(1, "octavia").to_json()],
        )
        .await;
    backend.mock_list("users", &[("username", "nobody")], vec![]).await;

    let found = client.user_by_username("octavia").await.unwrap();
    let missing = client.user_by_username("nobody").await.unwrap();

    assert_eq!(found.unwrap().email, "octavia@example.com");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_search_people_merges_authors_and_users() {
    let (backend, client) = setup().await;
    backend
        .mock_list(
            "authors",
            &[("name_like", "an")],
            vec![
                AuthorFixture::new(1, "Ann Leckie").to_json(),
                AuthorFixture::new(2, "Susanna Clarke").to_json(),
            ],
        )
        .await;
    let mut user = UserFixture::new(5, "dan");
    user.name = "Dan Simmons".to_string();
    backend
        .mock_list("users", &[("name_like", "an")], vec![user.to_json()])
        .await;

    let people = client.search_people(&SearchQuery::new("an")).await.unwrap();

    let names: Vec<_> = people.iter().map(Person::name).collect();
    assert_eq!(names, vec!["Ann Leckie", "Dan Simmons", "Susanna Clarke"]);
    assert!(matches!(people[1], Person::User(_)));
}

#[tokio::test]
async fn test_search_books_exact_descending() {
    let (backend, client) = setup().await;
    backend
        .mock_list(
            "books",
            &[("title", "Dune")],
            vec![BookFixture::bare(1, "Dune").to_json()],
        )
        .await;
    backend
        .mock_list(
            "authors",
            &[("name", "Dune")],
            vec![AuthorFixture::new(9, "Dune").to_json()],
        )
        .await;

    let results = client
        .search_books(
            &SearchQuery::new("Dune")
                .exact(true)
                .with_direction(SortDirection::Desc),
        )
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.label() == "Dune"));
    assert!(results.iter().any(|r| matches!(r, BookResult::Author(_))));
}
