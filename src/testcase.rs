use serde_json::Value;

use crate::error::{Error, Result};

/// A single test case parsed from the tests block.
///
/// Plain problems use an object of named arguments; class based problems
/// use a (method, args) pair driven by the runner footer.
#[derive(Debug, Clone, PartialEq)]
pub enum TestCase {
  Named(Vec<(String, Value)>),
  Call { method: String, args: Vec<Value> },
}

impl TestCase {
  /// Argument values in declared order.
  pub fn values(&self) -> Vec<&Value> {
    match self {
      TestCase::Named(pairs) => pairs.iter().map(|(_, v)| v).collect(),
      TestCase::Call { args, .. } => args.iter().collect(),
    }
  }

  /// JSON form of the test case, for display next to judge answers.
  pub fn to_value(&self) -> Value {
    match self {
      TestCase::Named(pairs) => Value::Object(pairs.iter().cloned().collect()),
      TestCase::Call { method, args } => {
        serde_json::json!([method, args])
      }
    }
  }
}

/// Parse the tests block into test cases.
///
/// The block is expected to hold a JSON5-tolerant array literal, possibly
/// preceded by an assignment and interleaved with `#` comment lines. The
/// comment lines are stripped and the outermost `[...]` is handed to the
/// JSON5 decoder.
pub fn parse_tests(block: &str) -> Result<Vec<TestCase>> {
  let stripped: String = block
    .lines()
    .filter(|line| !line.trim_start().starts_with('#'))
    .collect::<Vec<_>>()
    .join("\n");

  let open = stripped.find('[');
  let close = stripped.rfind(']');
  let literal = match (open, close) {
    (Some(open), Some(close)) if open < close => &stripped[open..=close],
    _ => {
      return Err(Error::UnparsableTests(
        "no array literal found between the tests markers".to_string(),
      ))
    }
  };

  let parsed: Value =
    json5::from_str(literal).map_err(|err| Error::UnparsableTests(err.to_string()))?;
  let items = match parsed {
    Value::Array(items) => items,
    _ => {
      return Err(Error::UnparsableTests(
        "tests must be an array of test cases".to_string(),
      ))
    }
  };

  let mut tests = Vec::with_capacity(items.len());
  for item in items {
    tests.push(parse_case(item)?);
  }
  return Ok(tests);
}

fn parse_case(item: Value) -> Result<TestCase> {
  match item {
    Value::Object(map) => Ok(TestCase::Named(map.into_iter().collect())),
    Value::Array(mut pair) => {
      if pair.len() != 2 {
        return Err(Error::UnparsableTests(
          "a test case pair must be [method, args]".to_string(),
        ));
      }
      let args = match pair.pop() {
        Some(Value::Array(args)) => args,
        _ => {
          return Err(Error::UnparsableTests(
            "test case args must be an array".to_string(),
          ))
        }
      };
      let method = match pair.pop() {
        Some(Value::String(method)) => method,
        _ => {
          return Err(Error::UnparsableTests(
            "test case method must be a string".to_string(),
          ))
        }
      };
      Ok(TestCase::Call { method, args })
    }
    other => Err(Error::UnparsableTests(format!(
      "unsupported test case shape: {}",
      other
    ))),
  }
}

/// Serialize test cases into the judge's run input: one JSON value per
/// line, test cases concatenated in order.
pub fn data_input(tests: &[TestCase]) -> String {
  let mut out = String::new();
  for test in tests {
    for value in test.values() {
      out.push_str(&value.to_string());
      out.push('\n');
    }
  }
  return out.trim().to_string();
}
