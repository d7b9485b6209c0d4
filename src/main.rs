mod api;
mod host;
mod models;
mod store;

use api::{MockListings, PropertySource, RemoteListings};
use host::{HostPlatform, NoHost};
use store::PropertyStore;
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🏠 Listing Scout - property browser");
    info!("===================================");

    // Remote API when configured, fixture data otherwise
    let source: Box<dyn PropertySource> = match std::env::var("LISTINGS_API_URL") {
        Ok(base_url) => {
            info!("Using remote listings API at {}", base_url);
            Box::new(RemoteListings::new(base_url)?)
        }
        Err(_) => {
            info!("LISTINGS_API_URL not set, browsing fixture listings");
            Box::new(MockListings::new())
        }
    };
    let host = NoHost;

    let mut store = PropertyStore::open(".");
    info!(
        "Restored {} favorites, {:?} view",
        store.favorites().len(),
        store.view_mode()
    );

    let generation = store.begin_fetch();
    let filters = store.filters().clone();
    info!("Fetching listings from {} source...", source.source_name());

    match source.fetch_properties(&filters).await {
        Ok(page) => {
            info!(
                "✅ Page {}/{} — {} of {} listings",
                page.page,
                page.total_pages,
                page.data.len(),
                page.total
            );

            for (i, property) in page.data.iter().enumerate() {
                let marker = if store.is_favorited(&property.id) { "★" } else { " " };
                println!("{} {}. {} (${})", marker, i + 1, property.title, property.price);
                println!("   {}", property.location);
                println!(
                    "   {} bed, {} bath, {} m²",
                    property.bedrooms, property.bathrooms, property.area
                );
                if let Some(image) = property.primary_image() {
                    println!("   Image: {}", image.url);
                }
                println!("   ID: {}", property.id);
                println!();
            }

            // Save the fetched page alongside, teacher-style
            let json = serde_json::to_string_pretty(&page)?;
            tokio::fs::write("listings.json", json).await?;
            info!("💾 Saved page to listings.json");

            store.commit_fetch(generation, Ok(page.data));
        }
        Err(err) => {
            warn!("Listing fetch failed: {err}");
            host.notify("Could not load listings");
            store.commit_fetch(generation, Err(err.to_string()));
            println!("No listings available: {}", store.error().unwrap_or("unknown error"));
        }
    }

    Ok(())
}
