use std::fs;

use crate::{auth, error::Error, etc::CONFIG, judge, test};

#[test]
fn csrf_token_extraction() {
  test::init();

  assert_eq!(
    auth::csrf_token("csrftoken=abc123; LEETCODE_SESSION=xyz").as_deref(),
    Some("abc123")
  );
  assert_eq!(
    auth::csrf_token("LEETCODE_SESSION=xyz; csrftoken=abc123").as_deref(),
    Some("abc123")
  );
  // the value itself may contain '='
  assert_eq!(auth::csrf_token("csrftoken=a=b").as_deref(), Some("a=b"));
  assert_eq!(auth::csrf_token("LEETCODE_SESSION=xyz"), None);
  assert_eq!(auth::csrf_token("csrftoken="), None);
  assert_eq!(auth::csrf_token(""), None);
}

#[test]
fn cookie_file_lifecycle() {
  test::init();

  let dir = std::env::temp_dir().join(format!("ojcli-test-{}", std::process::id()));
  let path = dir.join("cookie");
  let _ = fs::remove_dir_all(&dir);
  CONFIG.write().unwrap().auth.cookie_file = path.to_string_lossy().to_string();

  // absent file
  assert!(matches!(auth::load_cookie(), Err(Error::MissingCredentials)));

  // an empty cookie is as good as none
  auth::store_cookie("  \n").unwrap();
  assert!(matches!(auth::load_cookie(), Err(Error::MissingCredentials)));

  let stored = auth::store_cookie(" csrftoken=abc; LEETCODE_SESSION=xyz \n").unwrap();
  assert_eq!(stored, path);
  assert_eq!(
    auth::load_cookie().unwrap(),
    "csrftoken=abc; LEETCODE_SESSION=xyz"
  );

  let _ = fs::remove_dir_all(&dir);
}

#[test]
fn judge_client_requires_a_csrf_token() {
  test::init();

  let cfg = CONFIG.read().unwrap().judge.clone();
  assert!(matches!(
    judge::Client::new(cfg.clone(), "LEETCODE_SESSION=xyz".to_string()),
    Err(Error::MissingCredentials)
  ));
  assert!(judge::Client::new(cfg, "csrftoken=abc; LEETCODE_SESSION=xyz".to_string()).is_ok());
}
