use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "basket")]
#[command(about = "Shopping basket widget driven from the terminal")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog file path (overrides BASKET_CATALOG)
    #[arg(short, long, global = true)]
    pub catalog: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the product cards in the catalog
    Catalog,
    /// Click the add button of each listed card, in order
    Add {
        /// Card indexes as shown by `basket catalog`
        #[arg(required = true)]
        cards: Vec<usize>,
        /// Print the basket panel markup
        #[arg(long)]
        html: bool,
    },
    /// Dispatch clicks given as element paths, e.g. `plain,add,card:0`
    Click {
        /// Clicked element first, then its ancestors
        #[arg(required = true)]
        targets: Vec<String>,
        /// Print the basket panel markup
        #[arg(long)]
        html: bool,
    },
    /// Pick products interactively
    Shop,
}
