use thiserror::Error;

/// Errors surfaced by ojcli.
///
/// Parsing errors are fatal to the current invocation and abort before any
/// network call. Credential errors and judge timeouts are recoverable: the
/// message tells the user what to do next.
#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot find {name} markers; write the block between `{start}` and `{end}`")]
  MissingMarker {
    name: &'static str,
    start: &'static str,
    end: &'static str,
  },

  #[error("ambiguous {name} markers: expected exactly one `{start}` followed by one `{end}`")]
  AmbiguousMarker {
    name: &'static str,
    start: &'static str,
    end: &'static str,
  },

  #[error(
    "cannot parse problem details; include a comment line like `# 0001-two-sum.py` \
     or the problem url"
  )]
  UnparsableIdentity,

  #[error("cannot parse test cases: {0}")]
  UnparsableTests(String),

  #[error("session cookie not found; run `ojcli login` to authenticate")]
  MissingCredentials,

  #[error("timed out waiting for the judge after {attempts} attempts; it may still be processing")]
  JudgeTimeout { attempts: u32 },

  #[error("judge request failed: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("unexpected judge response: {0}")]
  UnexpectedResponse(String),

  #[error("canceled")]
  Canceled,

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
