//! CLI argument parsing and structure definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::{ConflictStrategy, MentionPolicy};

/// Entity bucketing and "the X" normalization
#[derive(Parser)]
#[command(name = "entlist")]
#[command(
    author,
    version,
    about = "Sort named entities into determiner buckets and join \"the X\" mentions",
    long_about = r#"
entlist - entity bucketing for phrase matching

BUCKETS:
  bare        PERSON entities used as proper nouns ("I met Alice")
  address     ADDRESS entities ("at 123 Main St")
  determined  LOCATION/ORGANIZATION proper nouns after "the";
              "the Mona Lisa" becomes "the Mona_Lisa" in the output text

Entities come from the Cloud Natural Language API (set ENTLIST_API_KEY or
ENTLIST_ACCESS_TOKEN), or from a saved analyzeEntities response (--response).

EXAMPLES:
  entlist classify "I saw the Mona Lisa at the Louvre"
  entlist classify --response saved.json -f sentence.txt --format json
  echo "Alice visited 123 Main St" | entlist classify
  entlist config show
"#
)]
#[command(propagate_version = true, args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: <config dir>/entlist/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Text to classify (shorthand for `entlist classify`)
    #[arg(trailing_var_arg = true)]
    pub text: Vec<String>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Annotate and classify text
    #[command(visible_alias = "c")]
    Classify(super::commands::ClassifyArgs),

    /// Inspect configuration
    Config(super::commands::ConfigArgs),
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary (default)
    #[default]
    Human,
    /// The full entity list as JSON
    Json,
    /// Only the rewritten text
    Text,
}

/// Mention selection rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Any proper mention qualifies the entity
    PerMention,
    /// Only the first mention counts
    Primary,
}

impl From<PolicyArg> for MentionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::PerMention => MentionPolicy::PerMention,
            PolicyArg::Primary => MentionPolicy::PrimaryMention,
        }
    }
}

/// Overlap resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Leftmost, then longest match wins
    Longest,
    /// Annotator order wins
    Priority,
}

impl From<StrategyArg> for ConflictStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Longest => ConflictStrategy::LongestSpan,
            StrategyArg::Priority => ConflictStrategy::Priority,
        }
    }
}
