use color_eyre::Result;
use lectern::config::Config;
use lectern::mail::LogTransport;
use lectern::models::{node, post, quote, resource, video};
use lectern::{logging, schema, store, State};
use std::sync::Arc;
use tracing::{info, Level};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::init(Level::INFO)?;

    let config = Config::new()?;
    let state = State::connect(config, Arc::new(LogTransport)).await?;
    schema::create_tables(&state.database).await?;

    let db = &state.database;
    let quotes = store::list_all::<quote::Entity>(db).await?.len();
    let resources = store::list_all::<resource::Entity>(db).await?.len();
    let videos = store::list_all::<video::Entity>(db).await?.len();
    let posts = store::list_all::<post::Entity>(db).await?.len();
    let nodes = store::list_all::<node::Entity>(db).await?.len();

    info!(
        site = state.config.sitename(),
        quotes,
        resources,
        videos,
        posts,
        nodes,
        "content store ready"
    );

    Ok(())
}
