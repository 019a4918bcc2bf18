//! Ask command - runs one session from the terminal

use clap::Args;
use tokio::signal;
use tracing::{info, warn};

use crate::domain::{CancellationToken, CollectionIds, RagOutcome};

#[derive(Args, Clone, Debug)]
pub struct AskArgs {
    /// Question to answer
    pub question: String,

    /// Collection to search; repeat for several. Defaults to the configured set
    #[arg(long = "collection", value_name = "ID")]
    pub collection: Vec<String>,

    /// Print the full outcome as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskArgs {
    fn collection_ids(&self) -> Option<CollectionIds> {
        if self.collection.is_empty() {
            None
        } else {
            Some(self.collection.iter().cloned().collect())
        }
    }
}

pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let backend = crate::create_retrieval_backend(&config)?;
    let rag = crate::create_rag_loop(&config, backend)?;

    let cancel = CancellationToken::new();
    tokio::spawn(watch_interrupts(cancel.clone()));

    let outcome = rag
        .run_with_cancel(args.question.clone(), args.collection_ids(), &cancel)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", render(&outcome));
    }

    Ok(())
}

/// Exit status for a process stopped by SIGINT
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// First Ctrl+C cancels the running step; a second one exits immediately
async fn watch_interrupts(cancel: CancellationToken) {
    if signal::ctrl_c().await.is_err() {
        return;
    }
    info!("Interrupted, cancelling session");
    cancel.cancel();

    if signal::ctrl_c().await.is_ok() {
        warn!("Interrupted again, exiting");
        std::process::exit(INTERRUPTED_EXIT_CODE);
    }
}

fn render(outcome: &RagOutcome) -> String {
    let mut out = outcome.answer.clone();

    if !outcome.documents.is_empty() {
        out.push_str("\n\nSources:");
        for doc in &outcome.documents {
            out.push_str(&format!("\n  - {} ({:.2})", doc.source_name, doc.similarity));
        }
    }

    out
}
