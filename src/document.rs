use regex::Regex;

use crate::{
  error::{Error, Result},
  testcase::{self, TestCase},
};

/// A named marker pair delimiting a region of a solution document.
///
/// The sentinels are exact literal strings. A well formed document contains
/// at most one occurrence of each, with the start sentinel preceding the end
/// sentinel and no two pairs overlapping.
#[derive(Debug, Clone, Copy)]
pub struct Marker {
  pub name: &'static str,
  pub start: &'static str,
  pub end: &'static str,
}

pub const CODE: Marker = Marker {
  name: "code",
  start: "# ojcli:code:start",
  end: "# ojcli:code:end",
};

pub const TESTS: Marker = Marker {
  name: "tests",
  start: "# ojcli:tests:start",
  end: "# ojcli:tests:end",
};

pub const RESULTS: Marker = Marker {
  name: "results",
  start: "# ojcli:results:start",
  end: "# ojcli:results:end",
};

/// Byte range of the text between a marker pair, markers excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
  pub start: usize,
  pub end: usize,
}

/// Problem identity extracted from a solution document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemIdentity {
  pub id: u64,
  pub slug: String,
}

lazy_static! {
  /// Identity comment, like `# 0001-two-sum.py`.
  static ref RE_NAME: Regex = Regex::new(r"# (\d+)-([\w-]+)\.py").unwrap();

  /// Embedded problem url, like `https://host/problems/two-sum#0001`
  /// or `https://host/problems/two-sum?id=1&envType=daily`.
  static ref RE_URL: Regex =
    Regex::new(r"/problems/([\w-]+)/?(\?[^\s#]*)?(?:#(\d+))?").unwrap();

  static ref RE_URL_ID: Regex = Regex::new(r"(?:\?|&)(?:id|envId)=(\d+)").unwrap();
}

/// A solution document: the full text of a file annotated with marker pairs.
///
/// The parser reads and rewrites the text in place. Everything outside a
/// replaced span is preserved byte for byte.
pub struct Document {
  text: String,
}

impl Document {
  pub fn new(text: String) -> Self {
    Document { text }
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn into_text(self) -> String {
    self.text
  }

  /// Locate a marker pair, requiring exactly one well ordered occurrence.
  ///
  /// Returns `None` when neither sentinel is present. A lone sentinel, a
  /// duplicated sentinel or an end before its start is ambiguous and is
  /// rejected rather than guessed at.
  pub fn span(&self, marker: &Marker) -> Result<Option<Span>> {
    let starts: Vec<usize> = self.text.match_indices(marker.start).map(|(i, _)| i).collect();
    let ends: Vec<usize> = self.text.match_indices(marker.end).map(|(i, _)| i).collect();

    if starts.is_empty() && ends.is_empty() {
      return Ok(None);
    }
    if starts.len() != 1 || ends.len() != 1 || ends[0] < starts[0] + marker.start.len() {
      return Err(Error::AmbiguousMarker {
        name: marker.name,
        start: marker.start,
        end: marker.end,
      });
    }

    return Ok(Some(Span {
      start: starts[0] + marker.start.len(),
      end: ends[0],
    }));
  }

  fn require(&self, marker: &Marker) -> Result<Span> {
    self.span(marker)?.ok_or(Error::MissingMarker {
      name: marker.name,
      start: marker.start,
      end: marker.end,
    })
  }

  /// Check that the marker pairs present in the document do not overlap.
  pub fn validate(&self) -> Result<()> {
    let mut outer: Vec<(&Marker, usize, usize)> = Vec::new();
    for marker in [&CODE, &TESTS, &RESULTS] {
      if let Some(span) = self.span(marker)? {
        outer.push((
          marker,
          span.start - marker.start.len(),
          span.end + marker.end.len(),
        ));
      }
    }
    outer.sort_by_key(|(_, start, _)| *start);
    for pair in outer.windows(2) {
      let (_, _, prev_end) = pair[0];
      let (marker, next_start, _) = pair[1];
      if next_start < prev_end {
        return Err(Error::AmbiguousMarker {
          name: marker.name,
          start: marker.start,
          end: marker.end,
        });
      }
    }
    return Ok(());
  }

  /// Derive the problem identity from the identity comment or, failing
  /// that, from an embedded problem url.
  pub fn identity(&self) -> Result<ProblemIdentity> {
    if let Some(caps) = RE_NAME.captures(&self.text) {
      if let Ok(id) = caps[1].parse::<u64>() {
        if id > 0 {
          return Ok(ProblemIdentity {
            id,
            slug: caps[2].to_string(),
          });
        }
      }
    }

    if let Some(caps) = RE_URL.captures(&self.text) {
      let slug = caps[1].to_string();
      let id = caps
        .get(3)
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .or_else(|| {
          let query = caps.get(2)?.as_str();
          RE_URL_ID.captures(query)?.get(1)?.as_str().parse().ok()
        });
      if let Some(id) = id {
        if id > 0 {
          return Ok(ProblemIdentity { id, slug });
        }
      }
    }

    return Err(Error::UnparsableIdentity);
  }

  /// Text of the code block.
  pub fn code(&self) -> Result<String> {
    let span = self.require(&CODE)?;
    Ok(self.text[span.start..span.end].to_string())
  }

  /// Raw text of the tests block, if the pair is present.
  pub fn tests_block(&self) -> Result<Option<&str>> {
    Ok(self.span(&TESTS)?.map(|span| &self.text[span.start..span.end]))
  }

  /// Raw text of the results block, if the pair is present.
  pub fn results(&self) -> Result<Option<&str>> {
    Ok(
      self
        .span(&RESULTS)?
        .map(|span| &self.text[span.start..span.end]),
    )
  }

  /// Replace the user code span with `code`.
  pub fn replace_code(&mut self, code: &str) -> Result<()> {
    let span = self.require(&CODE)?;
    self.text.replace_range(span.start..span.end, code);
    Ok(())
  }

  /// Replace exactly the results span with `payload`, preserving all text
  /// before and after.
  ///
  /// Returns `false` when the results pair does not exist; the caller is
  /// expected to skip persistence rather than fail.
  pub fn write_results(&mut self, payload: &str) -> Result<bool> {
    match self.span(&RESULTS)? {
      Some(span) => {
        self.text.replace_range(span.start..span.end, payload);
        Ok(true)
      }
      None => Ok(false),
    }
  }
}

/// Everything the judge needs, extracted from one document.
#[derive(Debug)]
pub struct Solution {
  pub identity: ProblemIdentity,
  pub code: String,
  pub tests: Vec<TestCase>,
  pub data_input: String,
}

/// Parse a solution document.
///
/// Tests are required for a run but not for a submission, which is graded
/// against the judge's hidden suite.
pub fn parse(doc: &Document, require_tests: bool) -> Result<Solution> {
  doc.validate()?;
  let identity = doc.identity()?;
  let code = doc.code()?;

  let (tests, data_input) = if require_tests {
    let block = doc.tests_block()?.ok_or(Error::MissingMarker {
      name: TESTS.name,
      start: TESTS.start,
      end: TESTS.end,
    })?;
    let tests = testcase::parse_tests(block)?;
    let data_input = testcase::data_input(&tests);
    (tests, data_input)
  } else {
    (Vec::new(), String::new())
  };

  return Ok(Solution {
    identity,
    code,
    tests,
    data_input,
  });
}
