use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::{
  auth,
  error::Result,
  etc::{self, CONFIG},
  poll::StatusSource,
  result::JudgeResult,
};

/// What a ticket is being polled for. Doubles as the report label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Action {
  Run,
  #[strum(serialize = "Submission")]
  Submit,
}

/// Opaque tracking id returned by the judge for an in-flight run or
/// submission.
///
/// Only usable for polling the same judge backend, and only while the judge
/// is processing; its lifetime and uniqueness are owned by the judge.
#[derive(Debug, Clone)]
pub struct Ticket {
  pub id: String,
  pub slug: String,
  pub action: Action,
}

/// Judge submission client.
///
/// Constructed explicitly once per invocation and passed by reference to
/// callers; there is no process wide cached instance.
pub struct Client {
  http: reqwest::Client,
  cfg: etc::JudgeCfg,
  cookie: String,
  csrf: String,
}

impl Client {
  /// Create a client from an authenticated session cookie.
  ///
  /// Fails with a credentials error when the cookie carries no csrf token,
  /// since the judge rejects every request without one.
  pub fn new(cfg: etc::JudgeCfg, cookie: String) -> Result<Self> {
    let csrf = auth::csrf_token(&cookie).ok_or(crate::error::Error::MissingCredentials)?;
    return Ok(Client {
      http: reqwest::Client::new(),
      cfg,
      cookie,
      csrf,
    });
  }

  /// Build a client from the global config and the stored session cookie.
  pub fn from_global_config() -> Result<Self> {
    let cfg = CONFIG.read().unwrap().judge.clone();
    let cookie = auth::load_cookie()?;
    Self::new(cfg, cookie)
  }

  async fn call(&self, url: String, slug: &str, body: Option<Value>) -> Result<JudgeResult> {
    let mut req = self
      .http
      .post(&url)
      .header("content-type", "application/json")
      .header("referer", format!("{}problems/{}/", self.cfg.host, slug))
      .header("x-csrftoken", &self.csrf)
      .header("cookie", &self.cookie);
    if let Some(body) = &body {
      req = req.json(body);
    }
    let fields: Map<String, Value> = req.send().await?.error_for_status()?.json().await?;
    return Ok(JudgeResult::new(fields));
  }

  /// Post a transient execution of `code` against the given test input.
  ///
  /// The returned ticket is only usable for polling run status.
  pub async fn run(&self, id: u64, slug: &str, code: &str, data_input: &str) -> Result<Ticket> {
    let url = format!("{}problems/{}/interpret_solution/", self.cfg.host, slug);
    let body = json!({
      "data_input": data_input,
      "lang": self.cfg.lang,
      "question_id": id,
      "typed_code": code,
    });
    let mut res = self.call(url, slug, Some(body)).await?;
    return Ok(Ticket {
      id: res.take_ticket("interpret_id")?,
      slug: slug.to_string(),
      action: Action::Run,
    });
  }

  /// Post a full grading request against the judge's hidden test suite.
  pub async fn submit(&self, id: u64, slug: &str, code: &str) -> Result<Ticket> {
    let url = format!("{}problems/{}/submit/", self.cfg.host, slug);
    let body = json!({
      "lang": self.cfg.lang,
      "question_id": id,
      "typed_code": code,
    });
    let mut res = self.call(url, slug, Some(body)).await?;
    return Ok(Ticket {
      id: res.take_ticket("submission_id")?,
      slug: slug.to_string(),
      action: Action::Submit,
    });
  }
}

#[async_trait]
impl StatusSource for Client {
  async fn status(&self, ticket: &Ticket) -> Result<JudgeResult> {
    let url = format!("{}submissions/detail/{}/check/", self.cfg.host, ticket.id);
    self.call(url, &ticket.slug, None).await
  }
}
