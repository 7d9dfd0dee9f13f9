use serde::{Deserialize, Serialize};
use std::{env, str::FromStr, sync::RwLock, time};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
/// ojcli config.
pub struct Cfg {
  pub judge: JudgeCfg,

  pub auth: AuthCfg,
}

impl Default for Cfg {
  // Set default values for config
  fn default() -> Self {
    return Cfg {
      judge: JudgeCfg {
        host: url::Url::from_str("https://leetcode.com").unwrap(),
        lang: "python3".to_string(),
        poll_interval: time::Duration::from_secs(5),
        max_retries: 24, // ~2 minute ceiling at the 5s interval
      },
      auth: AuthCfg {
        cookie_file: format!(
          "{}/.config/ojcli/cookie",
          env::var("HOME").unwrap_or_else(|_| ".".to_string())
        ),
      },
    };
  }
}

/// Judge endpoint config.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JudgeCfg {
  /// Base url of the judge, like `https://leetcode.com`.
  pub host: url::Url,

  /// Language slug sent with every run and submit request.
  pub lang: String,

  /// Time between two status polls.
  pub poll_interval: time::Duration,

  /// Maximum number of status polls before giving up on a ticket.
  pub max_retries: u32,
}

/// Credential storage config.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthCfg {
  /// Path of the file holding the raw session cookie.
  pub cookie_file: String,
}

lazy_static! {
  /// Global config.
  pub static ref CONFIG: RwLock<Cfg> = RwLock::new(Cfg::default());
}

/// Load the global config.
///
/// It should be called on the top of `main` fn.
pub fn load_config(search_paths: &Vec<String>) {
  let mut builder = config::Config::builder()
    .add_source(config::File::with_name("/etc/ojcli/config").required(false));

  for p in search_paths {
    builder = builder.add_source(config::File::with_name(p.as_str()).required(false));
  }

  builder = builder.add_source(config::Environment::with_prefix("OJCLI"));

  *CONFIG.write().unwrap() = builder.build().unwrap().try_deserialize::<Cfg>().unwrap();
}
