#[cfg(test)]
mod test;

pub mod args;
pub mod auth;
pub mod document;
pub mod error;
pub mod etc;
pub mod graph;
pub mod handler;
pub mod judge;
pub mod poll;
pub mod result;
pub mod template;
pub mod testcase;

use clap::Parser;

#[macro_use]
extern crate lazy_static;
extern crate log;

#[tokio::main]
async fn main() {
  let args = args::Args::parse();
  etc::load_config(&args.config_search_path);
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let outcome = match args.command {
    args::Command::Login { cookie } => handler::login(cookie).await,
    args::Command::Search { keywords } => handler::search(&keywords).await,
    args::Command::Load { slug } => handler::load(&slug).await,
    args::Command::Run { file } => handler::run(&file).await,
    args::Command::Submit { file } => handler::submit(&file).await,
    args::Command::Update { file } => handler::update(&file).await,
  };

  if let Err(err) = outcome {
    log::error!("{}", err);
    std::process::exit(1);
  }
}
