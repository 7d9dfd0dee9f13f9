use clap::{Parser, Subcommand};
use shadow_rs::shadow;

shadow!(build);

// Command line args
#[derive(Parser)]
#[clap(version = build::CLAP_LONG_VERSION)]
#[clap(about = "Command line client for an online judge.", long_about = None)]
pub struct Args {
  #[clap(short, long, value_parser)]
  pub config_search_path: Vec<String>,

  #[clap(subcommand)]
  pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
  /// Store the session cookie used to authenticate judge requests
  Login {
    /// Cookie string; prompted for interactively when omitted
    #[clap(short = 'k', long, value_parser)]
    cookie: Option<String>,
  },

  /// Search problems by keywords
  Search {
    #[clap(value_parser)]
    keywords: String,
  },

  /// Fetch a problem and generate a solution file in the current directory
  Load {
    /// Problem slug, like `two-sum`
    #[clap(value_parser)]
    slug: String,
  },

  /// Run the solution file against its test cases
  Run {
    #[clap(value_parser)]
    file: String,
  },

  /// Submit the solution file for full grading
  Submit {
    #[clap(value_parser)]
    file: String,
  },

  /// Regenerate the solution file template, keeping code and results
  Update {
    #[clap(value_parser)]
    file: String,
  },
}
