use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

/// Problem metadata blob attached to the console config.
///
/// Plain problems carry `name` and `params`; design problems carry
/// `classname` and `methods` instead. Everything is optional because the
/// judge omits fields freely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionMeta {
  #[serde(default)]
  pub name: Option<String>,

  #[serde(default)]
  pub params: Vec<MetaParam>,

  #[serde(default)]
  pub classname: Option<String>,

  #[serde(default)]
  pub methods: Option<Vec<MetaMethod>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetaParam {
  pub name: String,

  #[serde(default, rename = "type")]
  pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetaMethod {
  pub name: String,
}

/// Identity fields a generated document is stamped with.
#[derive(Debug, Clone)]
pub struct QuestionDisplay {
  /// Zero padded frontend id, used only for the generated filename.
  pub file_id: String,

  pub slug: String,

  /// Zero padded backend id. Run and submit requests are keyed on this
  /// id, so it is what the identity header and the url fragment carry;
  /// on most problems it differs from the frontend id.
  pub backend_id: String,
}

lazy_static! {
  /// Python method stubs come in header-only; a body keeps the generated
  /// file runnable before the user writes anything.
  static ref RE_DEF: Regex = Regex::new(r"( *def .*:\n +)").unwrap();
}

/// Build the runner test cases from the judge's example tests.
///
/// Design problems ship a single example whose first line lists method
/// names and second line their argument arrays; plain problems ship one
/// example per test case with one JSON value per line.
pub fn runner_cases(
  tests: &[String],
  meta: &QuestionMeta,
) -> Vec<(String, Vec<Value>)> {
  let mut cases = Vec::new();

  if meta.classname.is_some() && tests.len() == 1 {
    let mut lines = tests[0].lines();
    let methods: Vec<String> = lines
      .next()
      .and_then(|l| serde_json::from_str(l).ok())
      .unwrap_or_default();
    let args: Vec<Vec<Value>> = lines
      .next()
      .and_then(|l| serde_json::from_str(l).ok())
      .unwrap_or_default();
    let known = meta.methods.as_deref().unwrap_or_default();
    for (method, args) in methods.into_iter().zip(args) {
      if !known.iter().any(|m| m.name == method) {
        continue;
      }
      cases.push((method, args));
    }
    return cases;
  }

  let method = meta.name.clone().unwrap_or_else(|| "solve".to_string());
  for test in tests {
    let args = test
      .lines()
      .map(|line| {
        serde_json::from_str(line).unwrap_or_else(|_| Value::String(line.to_string()))
      })
      .collect();
    cases.push((method.clone(), args));
  }
  return cases;
}

/// Generate a fresh solution document: identity header, marker blocks and
/// the runner footer that executes the test cases locally.
pub fn generate(
  host: &url::Url,
  question: &QuestionDisplay,
  snippet: &str,
  tests: &[String],
  meta: &QuestionMeta,
) -> Result<String> {
  let class_name = meta.classname.clone().unwrap_or_else(|| "Solution".to_string());
  let instance = class_name.to_lowercase();
  let cases = runner_cases(tests, meta);
  let case_json = serde_json::to_string_pretty(&cases)?;
  let snippet = RE_DEF.replace_all(snippet, "${1}pass");

  let code = format!(
    r#"# {backend_id}-{slug}.py

# View this problem in your browser:
# {host}problems/{slug}#{backend_id}

# Write your solution between ojcli:code:start and ojcli:code:end
# Write test cases between ojcli:tests:start and ojcli:tests:end

from typing import List, Dict, Optional

# ojcli:code:start

{snippet}

# ojcli:code:end

null, true, false = None, True, False

# ojcli:tests:start

testcases = {case_json}

# ojcli:tests:end

if __name__ == "__main__":
    {instance} = {class_name}()
    for method, args in testcases:
        print("testcase:", method, args)
        function = getattr({instance}, method)
        result = function(*args)
        print("result:", result)

# ojcli:results:start
# Run your solution for memory and runtime status, or
# submit your solution for memory and runtime percentiles.
# ojcli:results:end
"#,
    backend_id = question.backend_id,
    slug = question.slug,
    host = host,
    snippet = snippet.trim_end(),
    case_json = case_json,
    instance = instance,
    class_name = class_name,
  );

  return Ok(code);
}
