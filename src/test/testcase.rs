use serde_json::json;

use crate::{
  error::Error,
  test,
  testcase::{self, TestCase},
};

#[test]
fn named_case_keeps_declared_order() {
  test::init();

  let tests = testcase::parse_tests(r#"[{"nums": [2, 7, 11, 15], "target": 9}]"#).unwrap();
  assert_eq!(tests.len(), 1);
  match &tests[0] {
    TestCase::Named(pairs) => {
      assert_eq!(pairs[0].0, "nums");
      assert_eq!(pairs[0].1, json!([2, 7, 11, 15]));
      assert_eq!(pairs[1].0, "target");
      assert_eq!(pairs[1].1, json!(9));
    }
    other => panic!("expected a named case, got {:?}", other),
  }
}

#[test]
fn json5_literals_and_comment_lines_tolerated() {
  test::init();

  let block = [
    "",
    "# local note, stripped before decoding",
    "testcases = [",
    "  {nums: [2, 7, 11, 15], target: 9}, // trailing comma is fine",
    "]",
    "",
  ]
  .join("\n");

  let tests = testcase::parse_tests(&block).unwrap();
  assert_eq!(tests.len(), 1);
  assert_eq!(testcase::data_input(&tests), "[2,7,11,15]\n9");
}

#[test]
fn call_pair_form() {
  test::init();

  let tests = testcase::parse_tests(r#"[["twoSum", [[2, 7, 11, 15], 9]]]"#).unwrap();
  assert_eq!(
    tests,
    vec![TestCase::Call {
      method: "twoSum".to_string(),
      args: vec![json!([2, 7, 11, 15]), json!(9)],
    }]
  );
}

#[test]
fn data_input_spans_all_cases() {
  test::init();

  let tests = testcase::parse_tests(
    r#"[{"nums": [1, 2], "target": 3}, {"nums": [4], "target": 4}]"#,
  )
  .unwrap();
  assert_eq!(testcase::data_input(&tests), "[1,2]\n3\n[4]\n4");
}

#[test]
fn missing_array_literal_rejected() {
  test::init();

  assert!(matches!(
    testcase::parse_tests("testcases = oops"),
    Err(Error::UnparsableTests(_))
  ));
}

#[test]
fn undecodable_literal_rejected() {
  test::init();

  assert!(matches!(
    testcase::parse_tests("[{nums: ]"),
    Err(Error::UnparsableTests(_))
  ));
}

#[test]
fn malformed_pair_rejected() {
  test::init();

  assert!(matches!(
    testcase::parse_tests(r#"[["twoSum"]]"#),
    Err(Error::UnparsableTests(_))
  ));
  assert!(matches!(
    testcase::parse_tests("[42]"),
    Err(Error::UnparsableTests(_))
  ));
}
