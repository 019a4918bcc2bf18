//! Collections command - lists RAGFlow datasets

use clap::Args;
use tracing::warn;

use crate::domain::CollectionInfo;

#[derive(Args, Clone, Debug)]
pub struct CollectionsArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: CollectionsArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let backend = crate::create_retrieval_backend(&config)?;

    let collections = match backend.list_collections().await {
        Ok(collections) => collections,
        Err(e) => {
            warn!(error = %e, "Failed to list collections");
            Vec::new()
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&collections)?);
    } else if collections.is_empty() {
        println!("No collections found");
    } else {
        for info in &collections {
            println!("{}", render_row(info));
        }
    }

    Ok(())
}

fn render_row(info: &CollectionInfo) -> String {
    let mut row = format!("{}\t{}", info.id, info.name);

    if let Some(count) = info.document_count {
        row.push_str(&format!("\t{} docs", count));
    }

    row
}
