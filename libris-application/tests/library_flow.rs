use std::sync::Arc;

use libris_application::factory::{CreateAuthor, CreateBook};
use libris_application::{
    AggregateService, AuthorFactory, BookFactory, InMemoryStore, LibrisConfig,
};
use libris_domain::entity::Entity;
use libris_domain::error::ErrorKind;
use libris_domain::model::{Author, Book, BookPatch};
use libris_domain::patch::Patch;
use libris_domain::value_object::Version;

#[tokio::test]
async fn author_and_book_lifecycle() {
    let config = LibrisConfig::from_lookup(|_| Some("base65".into())).unwrap();
    let ids = config.id_generator();

    let authors = AggregateService::<Author, _>::new(InMemoryStore::new());
    let books = AggregateService::<Book, _>::new(InMemoryStore::new());

    let author = AuthorFactory::new(ids.clone())
        .create(CreateAuthor::builder().name("Ursula").bio("Writer").build())
        .unwrap();
    let author = authors.create(author).await.unwrap();

    let book = BookFactory::new(ids)
        .create(
            CreateBook::builder()
                .isbn("0-306-40615-2")
                .title("A Wizard")
                .description("Original Description")
                .genre("Fantasy")
                .authors(vec![author.id().clone()])
                .photo("covers/wizard.png")
                .build(),
        )
        .unwrap();
    let id = book.id().clone();
    books.create(book).await.unwrap();

    let patch: BookPatch =
        serde_json::from_str(r#"{"title": "A Wizard of Earthsea", "description": null}"#).unwrap();
    let book = books.patch(&id, Version::new(), patch).await.unwrap();
    assert_eq!(book.title().as_str(), "A Wizard of Earthsea");
    assert!(book.description().is_none());
    assert_eq!(book.genre().as_str(), "Fantasy");

    let book = books.remove_photo(&id, book.version()).await.unwrap();
    assert_eq!(book.version(), Version::from_value(2));
    assert!(book.photo().is_none());

    let err = books
        .patch(
            &id,
            Version::from_value(1),
            BookPatch {
                genre: Patch::Present("Horror".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::VersionConflict);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn only_one_of_many_concurrent_writers_wins() {
    let service = Arc::new(AggregateService::<Author, _>::new(InMemoryStore::new()));
    let author = AuthorFactory::new(LibrisConfig::default().id_generator())
        .create(CreateAuthor::builder().name("Ana").bio("Bio").build())
        .unwrap();
    let id = author.id().clone();
    service.create(author).await.unwrap();

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let service = Arc::clone(&service);
            let id = id.clone();
            tokio::spawn(async move {
                let patch = libris_domain::model::AuthorPatch {
                    name: Patch::Present(format!("Writer {i}")),
                    ..Default::default()
                };
                service.patch(&id, Version::new(), patch).await
            })
        })
        .collect();

    let mut winners = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => winners += 1,
            Err(err) => assert!(err.is_conflict(), "{err}"),
        }
    }
    assert_eq!(winners, 1);
    assert_eq!(service.get(&id).await.unwrap().version(), Version::from_value(1));
}
