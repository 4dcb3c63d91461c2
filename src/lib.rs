//! # Email Harvester
//!
//! This project is a command-line application that looks for the email addresses an
//! organization publishes on the web. Given a domain (or a file listing several), it asks a
//! search engine for pages mentioning `@<domain>`, scans the results and the pages they point
//! to, and writes every unique address it finds into a timestamped text file.
//!
//! ## Features
//!
//! - Harvest a single domain or a whole list of domains, one after the other.
//! - Probe the usual contact pages (`/contact`, `/about`, `/team`, ...) of the domain itself.
//! - Mine search snippets and the result pages for addresses of the target domain.
//! - Case-insensitive deduplication, sorted output, one `<domain>_<timestamp>.txt` per domain.
//!
//! ## Usage
//!
//! ### Command-Line Options
//!
//! | Option                      | Description                                                        | Default Value     |
//! |-----------------------------|--------------------------------------------------------------------|-------------------|
//! | `<DOMAIN \| FILE>`          | Domain to harvest, or a text file with one domain per line.        | N/A               |
//! | `[OUTPUT_DIR]`              | Directory for the result files, created if missing.                | current directory |
//! | `-n, --results <NUMBER>`    | Search results kept per query.                                     | 10                |
//! | `-t, --timeout <SECONDS>`   | Timeout of every http request.                                     | 10                |
//! | `-d, --delay <MILLISECONDS>`| Pause between two search queries.                                  | 1500              |
//! | `--no-direct`               | Skip probing common pages on the domain itself.                    | off               |
//! | `--engine <URL>`            | Html search endpoint, queried with `?q=<query>`.                   | DuckDuckGo html   |
//! | `-v, --verbose`             | Log every fetched page and skipped request.                        | off               |
//!
//! ### Example
//!
//! ```bash
//! ./harvester example.com
//! ./harvester example.com ./results -n 20
//! ./harvester domains.txt ./results
//! ```
//!
//! Addresses are printed on stdout, progress and failures on stderr (`RUST_LOG` is honored).
//!
//! ## License
//!
//! This project is licensed under the MIT License. See `LICENSE` for more details.
mod interface;
pub use interface::{cli, config_from_matches, get_args, run, Config};
mod error;
pub use error::{CResult, HarvestError};
mod targets;
pub use targets::*;
mod page_utils;
pub use page_utils::*;
mod search;
pub use search::*;
mod output;
pub use output::*;
mod go_harvest;
pub use go_harvest::*;
mod log_creation;
pub use log_creation::*;
