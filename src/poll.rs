use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::{
  error::{Error, Result},
  judge::Ticket,
  result::JudgeResult,
};

/// Judge reported state of a ticket.
///
/// `Success` means the judging process finished, not that the solution
/// passed: a compile error or a wrong answer still arrives as `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PollState {
  Pending,
  Started,
  Success,
}

/// Anything that can report the current status of a ticket.
#[async_trait]
pub trait StatusSource {
  async fn status(&self, ticket: &Ticket) -> Result<JudgeResult>;
}

/// Poll the judge until the ticket reaches the terminal state.
///
/// Polls every `interval`, at most `max_retries` times, then gives up with
/// a timeout error; the ticket is not cancelled server side because no such
/// primitive exists. Transport errors count toward the ceiling and are
/// retried, so a transient network blip does not abort an otherwise healthy
/// wait. Cancellation is cooperative: the signal is only observed between
/// attempts, and dropping the sender cancels the wait as well.
pub async fn wait_judgement<S>(
  source: &S,
  ticket: &Ticket,
  interval: Duration,
  max_retries: u32,
  mut cancel: oneshot::Receiver<()>,
) -> Result<JudgeResult>
where
  S: StatusSource + Sync,
{
  for attempt in 1..=max_retries {
    tokio::select! {
      _ = tokio::time::sleep(interval) => {}
      _ = &mut cancel => {
        log::info!("canceled while waiting for ticket {}", ticket.id);
        return Err(Error::Canceled);
      }
    }

    match source.status(ticket).await {
      Ok(result) => {
        if result.state() == PollState::Success {
          return Ok(result);
        }
        log::debug!(
          "ticket {} not terminal yet (attempt {}/{})",
          ticket.id,
          attempt,
          max_retries
        );
      }
      Err(Error::Transport(err)) => {
        log::warn!(
          "status poll failed (attempt {}/{}): {}",
          attempt,
          max_retries,
          err
        );
      }
      Err(err) => return Err(err),
    }
  }

  return Err(Error::JudgeTimeout {
    attempts: max_retries,
  });
}
