use std::{fs, io::ErrorKind, path::PathBuf};

use crate::{
  error::{Error, Result},
  etc::CONFIG,
};

/// Extract the csrf token from a raw session cookie string.
pub fn csrf_token(cookie: &str) -> Option<String> {
  for part in cookie.split(';') {
    let mut kv = part.trim().splitn(2, '=');
    if kv.next() == Some("csrftoken") {
      return kv.next().map(str::to_string).filter(|v| !v.is_empty());
    }
  }
  return None;
}

fn cookie_path() -> PathBuf {
  PathBuf::from(CONFIG.read().unwrap().auth.cookie_file.clone())
}

/// Read the stored session cookie.
///
/// An absent or empty cookie file maps to a credentials error so callers
/// can offer the login path instead of crashing mid-flow.
pub fn load_cookie() -> Result<String> {
  match fs::read_to_string(cookie_path()) {
    Ok(cookie) => {
      let cookie = cookie.trim().to_string();
      if cookie.is_empty() {
        return Err(Error::MissingCredentials);
      }
      Ok(cookie)
    }
    Err(err) if err.kind() == ErrorKind::NotFound => Err(Error::MissingCredentials),
    Err(err) => Err(err.into()),
  }
}

/// Persist the session cookie for later invocations.
pub fn store_cookie(cookie: &str) -> Result<PathBuf> {
  let path = cookie_path();
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, cookie.trim())?;
  return Ok(path);
}
