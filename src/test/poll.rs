use std::{collections::VecDeque, sync::Mutex, time::Duration};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::oneshot;

use crate::{
  error::{Error, Result},
  judge::{Action, Ticket},
  poll::{self, PollState, StatusSource},
  result::JudgeResult,
  test,
};

enum Step {
  Pending,
  Transport,
  Success,
}

/// Scripted status source: answers each poll with the next step, and keeps
/// answering pending once the script runs out.
struct Script {
  steps: Mutex<VecDeque<Step>>,
}

impl Script {
  fn new(steps: Vec<Step>) -> Self {
    Script {
      steps: Mutex::new(steps.into()),
    }
  }
}

#[async_trait]
impl StatusSource for Script {
  async fn status(&self, _ticket: &Ticket) -> Result<JudgeResult> {
    let step = self.steps.lock().unwrap().pop_front();
    match step {
      Some(Step::Success) => Ok(JudgeResult::new(
        json!({"state": "SUCCESS", "status_msg": "Accepted"})
          .as_object()
          .cloned()
          .unwrap(),
      )),
      Some(Step::Transport) => Err(Error::Transport(transport_error().await)),
      _ => Ok(JudgeResult::new(
        json!({"state": "PENDING"}).as_object().cloned().unwrap(),
      )),
    }
  }
}

// reqwest won't expose an error constructor; an unsupported scheme fails
// in the client before any connection is made.
async fn transport_error() -> reqwest::Error {
  reqwest::Client::new()
    .get("ftp://localhost/")
    .send()
    .await
    .unwrap_err()
}

fn ticket() -> Ticket {
  Ticket {
    id: "42".to_string(),
    slug: "two-sum".to_string(),
    action: Action::Run,
  }
}

#[test]
fn poll_state_round_trips_judge_spelling() {
  test::init();

  assert_eq!("PENDING".parse::<PollState>().unwrap(), PollState::Pending);
  assert_eq!("STARTED".parse::<PollState>().unwrap(), PollState::Started);
  assert_eq!("SUCCESS".parse::<PollState>().unwrap(), PollState::Success);
  assert!("FROZEN".parse::<PollState>().is_err());
}

#[tokio::test]
async fn returns_terminal_result() {
  test::init();

  let source = Script::new(vec![Step::Pending, Step::Success]);
  let (_tx, rx) = oneshot::channel();
  let result = poll::wait_judgement(&source, &ticket(), Duration::from_millis(1), 5, rx)
    .await
    .unwrap();
  assert_eq!(result.state(), PollState::Success);
}

#[tokio::test]
async fn times_out_after_max_retries() {
  test::init();

  let source = Script::new(vec![]);
  let (_tx, rx) = oneshot::channel();
  let outcome = poll::wait_judgement(&source, &ticket(), Duration::from_millis(1), 3, rx).await;
  assert!(matches!(outcome, Err(Error::JudgeTimeout { attempts: 3 })));
}

#[tokio::test]
async fn transport_errors_count_toward_the_ceiling() {
  test::init();

  let source = Script::new(vec![Step::Transport, Step::Pending]);
  let (_tx, rx) = oneshot::channel();
  let outcome = poll::wait_judgement(&source, &ticket(), Duration::from_millis(1), 2, rx).await;
  assert!(matches!(outcome, Err(Error::JudgeTimeout { attempts: 2 })));
}

#[tokio::test]
async fn transport_error_then_success_still_succeeds() {
  test::init();

  let source = Script::new(vec![Step::Transport, Step::Success]);
  let (_tx, rx) = oneshot::channel();
  let result = poll::wait_judgement(&source, &ticket(), Duration::from_millis(1), 5, rx)
    .await
    .unwrap();
  assert_eq!(result.state(), PollState::Success);
}

#[tokio::test]
async fn cancel_signal_stops_the_wait() {
  test::init();

  let source = Script::new(vec![]);
  let (tx, rx) = oneshot::channel();
  tx.send(()).unwrap();
  let outcome = poll::wait_judgement(&source, &ticket(), Duration::from_secs(60), 5, rx).await;
  assert!(matches!(outcome, Err(Error::Canceled)));
}

#[tokio::test]
async fn dropped_sender_counts_as_cancellation() {
  test::init();

  let source = Script::new(vec![]);
  let (tx, rx) = oneshot::channel::<()>();
  drop(tx);
  let outcome = poll::wait_judgement(&source, &ticket(), Duration::from_secs(60), 5, rx).await;
  assert!(matches!(outcome, Err(Error::Canceled)));
}
