//! Local-only admin walkthrough.
//!
//! Runs the catalog store against the bundled snapshot with no remote
//! table: create, retitle, reorder, export, and reset, logging each step.
//!
//! ```bash
//! cargo run -p folio-store --example local_admin
//! ```

use folio_core::{bundled_products, NewProduct, ProductCategory, ProductPatch};
use folio_store::{CatalogStore, StoreError};

#[tokio::main]
async fn main() -> Result<(), StoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,folio_store=debug".into()),
        )
        .init();

    let mut store = CatalogStore::init(None, bundled_products().to_vec()).await;
    println!("loaded {} bundled products", store.all().len());

    let created = store
        .create(NewProduct {
            category: ProductCategory::Notebook,
            title: "Limited Edition Planner".to_string(),
            description: "A weekly planner with hand-drawn section dividers.".to_string(),
            tag: "New".to_string(),
            image: "limited-planner.webp".to_string(),
            external_url: String::new(),
            notebook_type: "Planner".to_string(),
            sort_order: None,
        })
        .await?;
    println!("created {} ({})", created.title, created.id);

    store
        .update(
            &created.id,
            ProductPatch {
                title: Some("Limited Edition Weekly Planner".to_string()),
                ..Default::default()
            },
        )
        .await?;

    // Move the new product to the front of the notebook line.
    let mut notebook_ids: Vec<String> = store
        .all()
        .iter()
        .filter(|p| p.category == ProductCategory::Notebook)
        .map(|p| p.id.clone())
        .collect();
    notebook_ids.retain(|id| id != &created.id);
    notebook_ids.insert(0, created.id.clone());
    store.reorder(&notebook_ids).await?;

    let exported = store.export_json();
    println!("export is {} bytes", exported.len());

    store.reset_to_defaults();
    println!("reset: {} products remain", store.all().len());

    Ok(())
}
