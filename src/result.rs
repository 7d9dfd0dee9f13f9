use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
  error::{Error, Result},
  judge::Action,
  poll::PollState,
  testcase::TestCase,
};

const PASS_GLYPH: &str = "🟢";
const PARTIAL_GLYPH: &str = "🟡";
const FAIL_GLYPH: &str = "🔴";

/// Raw judge result: a mapping of named fields whose schema is owned by the
/// remote judge and drifts between its revisions.
///
/// Rendering pops the fields it recognizes and dumps whatever remains, so
/// the report degrades gracefully when the schema changes.
#[derive(Debug, Clone)]
pub struct JudgeResult {
  fields: Map<String, Value>,
}

impl JudgeResult {
  pub fn new(fields: Map<String, Value>) -> Self {
    JudgeResult { fields }
  }

  /// Judge reported state; anything unrecognized counts as still pending.
  pub fn state(&self) -> PollState {
    self
      .fields
      .get("state")
      .and_then(Value::as_str)
      .and_then(|s| s.parse().ok())
      .unwrap_or(PollState::Pending)
  }

  /// Remove and stringify a ticket field, whatever its JSON type.
  pub fn take_ticket(&mut self, key: &str) -> Result<String> {
    match self.fields.remove(key) {
      Some(Value::String(id)) => Ok(id),
      Some(Value::Number(id)) => Ok(id.to_string()),
      _ => Err(Error::UnexpectedResponse(format!(
        "no usable `{}` in judge response",
        key
      ))),
    }
  }

  fn pop(&mut self, key: &str) -> Option<Value> {
    self.fields.remove(key)
  }
}

/// Compact summary persisted into the results block of a solution document.
///
/// Overwritten wholesale on every run or submit, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
  pub status: String,
  pub total_correct: Option<u64>,
  pub total_testcases: Option<u64>,
  pub status_runtime: Option<String>,
  pub status_memory: Option<String>,
  pub timestamp: DateTime<Utc>,
}

impl Summary {
  /// Render the summary as the `# `-commented block written between the
  /// results markers.
  pub fn to_block(&self) -> Result<String> {
    let json = serde_json::to_string_pretty(self)?;
    let mut block = String::from("\n");
    for line in json.lines() {
      block.push_str("# ");
      block.push_str(line);
      block.push('\n');
    }
    return Ok(block);
  }
}

/// Render a terminal judge result into a human readable report and the
/// summary to persist.
///
/// `tests` carries the parsed test cases for a run so inputs can be shown
/// next to answers; submissions pass an empty slice since the hidden suite
/// is not disclosed. Every optional section type checks its fields before
/// formatting so a drifting schema never panics the renderer.
pub fn render(mut result: JudgeResult, action: Action, tests: &[TestCase]) -> (String, Summary) {
  let mut report = String::new();

  // Heading
  let total = result.pop("total_testcases").and_then(|v| v.as_u64());
  let correct = result.pop("total_correct").and_then(|v| v.as_u64());
  let status_msg = text_of(result.pop("status_msg"));

  match total {
    Some(total) if total > 0 => {
      let correct = correct.unwrap_or(0);
      let glyph = if correct == total {
        PASS_GLYPH
      } else if correct > 0 {
        PARTIAL_GLYPH
      } else {
        FAIL_GLYPH
      };
      report.push_str(&format!(
        "{} {}: {} / {} {}\n",
        action, status_msg, correct, total, glyph
      ));
    }
    _ => {
      report.push_str(&format!("{}\n", status_msg));
    }
  }

  // Status
  let status_runtime = result.pop("status_runtime");
  let status_memory = result.pop("status_memory");
  report.push_str(&format!("\n{} Status\n", action));
  report.push_str(&format!(
    "  Runtime Status: {}\n",
    text_of(status_runtime.clone())
  ));
  report.push_str(&format!(
    "  Memory Status: {}\n",
    text_of(status_memory.clone())
  ));
  if let Some(p) = result.pop("runtime_percentile").and_then(|v| v.as_f64()) {
    report.push_str(&format!("  Runtime Percentile: {:.5}\n", p));
  }
  if let Some(p) = result.pop("memory_percentile").and_then(|v| v.as_f64()) {
    report.push_str(&format!("  Memory Percentile: {:.5}\n", p));
  }

  // Per-test comparison, present for runs with disclosed answers
  let answers = result.pop("code_answer");
  let expected = result.pop("expected_code_answer");
  let compare = result.pop("compare_result");
  if let (Some(Value::Array(answers)), Some(Value::Array(expected)), Some(Value::String(compare))) =
    (answers, expected, compare)
  {
    report.push_str("\nTest Cases\n");
    for (i, answer) in answers.iter().enumerate() {
      let glyph = if compare.chars().nth(i) == Some('1') {
        PASS_GLYPH
      } else {
        FAIL_GLYPH
      };
      let input = tests
        .get(i)
        .map(|t| t.to_value().to_string())
        .unwrap_or_default();
      report.push_str(&format!("  Input    : {}\n", input));
      report.push_str(&format!(
        "  Expected : {}\n",
        text_of(expected.get(i).cloned())
      ));
      report.push_str(&format!("  Answer   : {}\n", text_of(Some(answer.clone()))));
      report.push_str(&format!("  Correct  : {}\n\n", glyph));
    }
  }

  // Errors
  if let Some(err) = result.pop("runtime_error") {
    report.push_str(&format!("\nError\n{}\n", text_of(Some(err))));
  }
  if let Some(err) = result.pop("full_runtime_error") {
    report.push_str(&format!("\nFull Error\n{}\n", text_of(Some(err))));
  }
  if let Some(true) = result.pop("invalid_testcase").map(|v| truthy(&v)) {
    report.push_str("\nInvalid Testcase\nThe judge rejected the supplied test input.\n");
  }

  // Whatever the judge sent that this revision does not recognize
  if !result.fields.is_empty() {
    let dump = serde_json::to_string_pretty(&result.fields)
      .unwrap_or_else(|_| "<unprintable>".to_string());
    report.push_str(&format!("\nOther Information\n{}\n", dump));
  }

  let summary = Summary {
    status: status_msg,
    total_correct: correct,
    total_testcases: total,
    status_runtime: status_runtime.map(|v| text_of(Some(v))),
    status_memory: status_memory.map(|v| text_of(Some(v))),
    timestamp: Utc::now(),
  };

  return (report, summary);
}

/// Display form of an optional field: strings verbatim, anything else as
/// JSON, absence as the empty string.
fn text_of(value: Option<Value>) -> String {
  match value {
    Some(Value::String(s)) => s,
    Some(other) => other.to_string(),
    None => String::new(),
  }
}

fn truthy(value: &Value) -> bool {
  match value {
    Value::Bool(b) => *b,
    Value::Null => false,
    Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
    Value::String(s) => !s.is_empty(),
    Value::Array(a) => !a.is_empty(),
    Value::Object(o) => !o.is_empty(),
  }
}
