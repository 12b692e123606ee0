//! entlist - entity bucketing CLI
//!
//! # Usage
//!
//! ```bash
//! # Classify a sentence (needs ENTLIST_API_KEY or ENTLIST_ACCESS_TOKEN)
//! entlist classify "I saw the Mona Lisa at the Louvre"
//!
//! # Classify against a saved analyzeEntities response
//! entlist classify --response saved.json -t "I saw the Mona Lisa at the Louvre"
//!
//! # Show the effective configuration
//! entlist config show
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    entlist::cli::run()
}
