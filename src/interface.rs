use crate::{start_process, CResult, DEFAULT_ENGINE};
use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

const HELP: &str = r#"
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading}
    {usage}

{all-args}{after-help}
"#;

#[derive(Debug, Clone)]
pub struct Config {
    pub target: String,      // a domain or a file with one domain per line
    pub output_dir: PathBuf, // where the <domain>_<timestamp>.txt files go
    pub max_results: usize,  // hits kept per search query
    pub timeout: u64,        // seconds, per http request
    pub delay_ms: u64,       // pause between two search queries
    pub direct_scrape: bool, // also probe /contact, /about, ... on the domain itself
    pub engine: String,
    pub verbose: bool,
}

impl Config {
    /// Defaults for everything but the target; output goes to the current directory, which
    /// is only resolved once files are written.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            output_dir: PathBuf::from("."),
            max_results: 10,
            timeout: 10,
            delay_ms: 1500,
            direct_scrape: true,
            engine: DEFAULT_ENGINE.to_string(),
            verbose: false,
        }
    }
    pub fn get_target(&self) -> &str {
        &self.target
    }
    pub fn get_output_dir(&self) -> &PathBuf {
        &self.output_dir
    }
}

pub fn cli() -> Command {
    command!()
        .about("Harvest email addresses published for a domain")
        .help_template(HELP)
        .next_line_help(true)
        .arg(
            Arg::new("target")
                .required(true)
                .value_name("DOMAIN | FILE")
                .long_help("target domain (e.g. example.com) or a text file with one domain per line"),
        )
        .arg(
            Arg::new("output_dir")
                .required(false)
                .value_name("OUTPUT_DIR")
                .value_parser(value_parser!(PathBuf))
                .long_help("directory for the result files, created if missing; defaults to the current directory"),
        )
        .arg(
            Arg::new("results")
                .short('n')
                .long("results")
                .num_args(1)
                .value_name("NUMBER")
                .value_parser(value_parser!(usize))
                .default_value("10")
                .long_help("number of search results to keep per query"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .num_args(1)
                .value_name("SECONDS")
                .value_parser(value_parser!(u64))
                .default_value("10")
                .long_help("timeout of every single http request"),
        )
        .arg(
            Arg::new("delay")
                .short('d')
                .long("delay")
                .num_args(1)
                .value_name("MILLISECONDS")
                .value_parser(value_parser!(u64))
                .default_value("1500")
                .long_help("pause between two search queries, keeps the search engine from throttling us"),
        )
        .arg(
            Arg::new("no_direct")
                .long("no-direct")
                .action(ArgAction::SetTrue)
                .long_help("skip probing common pages (/contact, /about, ...) on the domain itself"),
        )
        .arg(
            Arg::new("engine")
                .long("engine")
                .num_args(1)
                .value_name("URL")
                .default_value(DEFAULT_ENGINE)
                .long_help("html search endpoint queried with ?q=<query>"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .long_help("log every fetched page and skipped request"),
        )
}

pub fn get_args() -> CResult<Config> {
    config_from_matches(&cli().get_matches())
}

pub fn config_from_matches(matches: &ArgMatches) -> CResult<Config> {
    let mut config = Config::new(
        matches
            .get_one::<String>("target")
            .cloned()
            .unwrap_or_default(),
    );
    if let Some(dir) = matches.get_one::<PathBuf>("output_dir") {
        config.output_dir = dir.clone();
    }
    if let Some(n) = matches.get_one::<usize>("results") {
        config.max_results = *n;
    }
    if let Some(t) = matches.get_one::<u64>("timeout") {
        config.timeout = *t;
    }
    if let Some(d) = matches.get_one::<u64>("delay") {
        config.delay_ms = *d;
    }
    if let Some(engine) = matches.get_one::<String>("engine") {
        config.engine = engine.clone();
    }
    config.direct_scrape = !matches.get_flag("no_direct");
    config.verbose = matches.get_flag("verbose");
    Ok(config)
}

pub async fn run(config: Config) -> CResult<()> {
    start_process(config).await?;
    Ok(())
}
