use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
  auth,
  error::{Error, Result},
  etc::CONFIG,
};

/// Problem search, scoped to the fields the table printer needs.
const SEARCH_QUERY: &str = r#"
query problemsetQuestionList(
  $categorySlug: String
  $limit: Int
  $skip: Int
  $filters: QuestionListFilterInput
) {
  problemsetQuestionList: questionList(
    categorySlug: $categorySlug
    limit: $limit
    skip: $skip
    filters: $filters
  ) {
    total: totalNum
    questions: data {
      acRate
      difficulty
      frontendQuestionId: questionFrontendId
      paidOnly: isPaidOnly
      status
      title
      titleSlug
    }
  }
}"#;

/// Console config: example tests plus the problem metadata blob.
const CONSOLE_QUERY: &str = r#"
query consolePanelConfig($titleSlug: String!) {
  question(titleSlug: $titleSlug) {
    questionId
    questionFrontendId
    exampleTestcaseList
    metaData
  }
}"#;

/// Starter code snippets per language.
const EDITOR_QUERY: &str = r#"
query questionEditorData($titleSlug: String!) {
  question(titleSlug: $titleSlug) {
    questionId
    questionFrontendId
    codeSnippets {
      lang
      langSlug
      code
    }
  }
}"#;

/// Metadata client for the judge's query endpoint.
///
/// Unlike the submission client the cookie is optional here; anonymous
/// queries work for public problems.
pub struct Client {
  http: reqwest::Client,
  host: url::Url,
  cookie: Option<String>,
}

impl Client {
  pub fn new(host: url::Url, cookie: Option<String>) -> Self {
    Client {
      http: reqwest::Client::new(),
      host,
      cookie,
    }
  }

  /// Build a client from the global config and the stored cookie, if any.
  pub fn from_global_config() -> Self {
    let host = CONFIG.read().unwrap().judge.host.clone();
    Self::new(host, auth::load_cookie().ok())
  }

  async fn call<T>(&self, query: &str, variables: Value) -> Result<T>
  where
    T: for<'de> Deserialize<'de>,
  {
    let mut req = self
      .http
      .post(format!("{}graphql/", self.host))
      .header("content-type", "application/json");
    if let Some(cookie) = &self.cookie {
      if let Some(csrf) = auth::csrf_token(cookie) {
        req = req.header("x-csrftoken", csrf).header("cookie", cookie);
      }
    }
    let res: GraphResponse<T> = req
      .json(&json!({ "query": query, "variables": variables }))
      .send()
      .await?
      .error_for_status()?
      .json()
      .await?;
    return Ok(res.data);
  }

  pub async fn search_problems(&self, keywords: &str) -> Result<Vec<Question>> {
    let variables = json!({
      "categorySlug": "",
      "skip": 0,
      "limit": 20,
      "filters": { "searchKeywords": keywords },
    });
    let data: SearchData = self.call(SEARCH_QUERY, variables).await?;
    Ok(
      data
        .problemset_question_list
        .map(|list| list.questions)
        .unwrap_or_default(),
    )
  }

  pub async fn console_config(&self, slug: &str) -> Result<ConsoleQuestion> {
    let data: ConsoleData = self.call(CONSOLE_QUERY, json!({ "titleSlug": slug })).await?;
    data
      .question
      .ok_or_else(|| Error::UnexpectedResponse(format!("problem not found: {}", slug)))
  }

  pub async fn editor_data(&self, slug: &str) -> Result<Vec<Snippet>> {
    let data: EditorData = self.call(EDITOR_QUERY, json!({ "titleSlug": slug })).await?;
    Ok(
      data
        .question
        .and_then(|q| q.code_snippets)
        .unwrap_or_default(),
    )
  }

}

#[derive(Deserialize)]
struct GraphResponse<T> {
  data: T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchData {
  problemset_question_list: Option<QuestionList>,
}

#[derive(Deserialize)]
struct QuestionList {
  questions: Vec<Question>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
  pub frontend_question_id: String,
  pub ac_rate: f64,
  pub title_slug: String,
  pub paid_only: bool,
  pub title: String,
  pub difficulty: String,
  pub status: Option<String>,
}

#[derive(Deserialize)]
struct ConsoleData {
  question: Option<ConsoleQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleQuestion {
  pub question_id: String,
  pub question_frontend_id: String,
  #[serde(default)]
  pub example_testcase_list: Vec<String>,
  pub meta_data: String,
}

#[derive(Deserialize)]
struct EditorData {
  question: Option<EditorQuestion>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditorQuestion {
  code_snippets: Option<Vec<Snippet>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
  pub lang_slug: String,
  pub code: String,
}
