use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use vitrineapp::commands::BrowseRequest;
use vitrineapp::config::VitrineConfig;
use vitrineapp::filters::{Flag, FilterState, SortKey};

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "vitrine",
    bin_name = "vitrine",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Browse, filter and quote the jewelry catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog JSON document (default: .vitrine/catalog.json)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub catalog: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputMode::Text, help_heading = "Options")]
    pub output: OutputMode,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List products, filtered and sorted
    #[command(alias = "ls")]
    Browse(FilterArgs),

    /// Search products by name, material or subcategory
    Search {
        /// Search term; several words are joined
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show the price ranges, materials, subcategories and sort keys on offer
    Options {
        /// Include the popularity sort
        #[arg(long)]
        popularity: bool,
    },

    /// Price a set of products as a cart would (e.g. `vitrine quote 12:2 40`)
    Quote {
        #[arg(required = true, num_args = 1.., value_name = "ID[:QTY]")]
        items: Vec<String>,
    },
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct FilterArgs {
    /// Price range id (e.g. under-25k, 50k-1l, above-2l)
    #[arg(long, value_name = "RANGE")]
    pub price: Option<String>,

    /// Material, matched as a case-insensitive substring (repeatable)
    #[arg(long = "material", value_name = "MATERIAL")]
    pub materials: Vec<String>,

    /// Subcategory, matched exactly (repeatable)
    #[arg(long = "subcategory", value_name = "NAME")]
    pub subcategories: Vec<String>,

    /// Only new arrivals
    #[arg(long = "new")]
    pub new_arrivals: bool,

    /// Only products on sale
    #[arg(long)]
    pub sale: bool,

    /// Only featured products
    #[arg(long)]
    pub featured: bool,

    /// best-matches, price-low-high, price-high-low, newest, rating, popularity
    #[arg(long, value_name = "KEY")]
    pub sort: Option<String>,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Products per page (default from config)
    #[arg(long, value_name = "N")]
    pub per_page: Option<usize>,

    /// Drop an active filter by its label, e.g. --without "On Sale" (repeatable)
    #[arg(long, value_name = "LABEL")]
    pub without: Vec<String>,
}

impl FilterArgs {
    pub fn state(&self) -> FilterState {
        let mut state = FilterState::default();
        if let Some(price) = &self.price {
            state = state.with_price_range(price.clone());
        }
        for material in &self.materials {
            state = state.with_material(material.clone());
        }
        for subcategory in &self.subcategories {
            state = state.with_subcategory(subcategory.clone());
        }
        for (flag, on) in [
            (Flag::New, self.new_arrivals),
            (Flag::Sale, self.sale),
            (Flag::Featured, self.featured),
        ] {
            if on {
                state = state.with_flag(flag);
            }
        }
        state
    }

    pub fn request(&self, config: &VitrineConfig) -> BrowseRequest {
        let sort = self
            .sort
            .as_deref()
            .map(SortKey::from)
            .unwrap_or_else(|| config.sort_key());
        let mut request = BrowseRequest::new(self.state())
            .with_sort(sort)
            .with_page(self.page, self.per_page.unwrap_or_else(|| config.per_page()));
        request.without = self.without.clone();
        request
    }
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
