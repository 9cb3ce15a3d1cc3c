use anyhow::Result;
use libris_application::factory::CreateAuthor;
use libris_application::{AggregateService, AuthorFactory, InMemoryStore, LibrisConfig};
use libris_domain::entity::Entity;
use libris_domain::model::{Author, AuthorPatch};
use libris_domain::value_object::Version;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,libris_domain=debug,libris_application=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let config = LibrisConfig::from_env()?;
    info!(generator = %config.id_generator, "starting libris demo");

    let authors = AggregateService::<Author, _>::new(InMemoryStore::new());
    let factory = AuthorFactory::new(config.id_generator());

    let author = factory.create(
        CreateAuthor::builder()
            .name("Original Name")
            .bio("Original bio")
            .photo("authors/original.jpg")
            .build(),
    )?;
    let id = author.id().clone();
    let author = authors.create(author).await?;
    info!(%id, version = %author.version(), "author created");

    // 两个编辑者都读到了同一个版本
    let observed = author.version();

    let first: AuthorPatch = serde_json::from_str(r#"{"name": "X"}"#)?;
    let author = authors.patch(&id, observed, first).await?;
    info!(name = %author.name(), version = %author.version(), "first editor saved");

    let second: AuthorPatch = serde_json::from_str(r#"{"name": "Y"}"#)?;
    match authors.patch(&id, observed, second).await {
        Ok(_) => warn!("stale write unexpectedly accepted"),
        Err(err) if err.is_conflict() => info!(error = %err, "second editor must reload"),
        Err(err) => return Err(err.into()),
    }

    let author = authors.remove_photo(&id, author.version()).await?;
    info!(
        photo = ?author.photo().map(|p| p.uri()),
        version = %author.version(),
        "photo removed"
    );

    let current = authors.get(&id).await?;
    anyhow::ensure!(
        current.version() == Version::from_value(2),
        "unexpected version {}",
        current.version()
    );
    println!("{}", serde_json::to_string_pretty(&current)?);
    Ok(())
}
