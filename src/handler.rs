use std::path::PathBuf;

use tokio::sync::oneshot;

use crate::{
  auth,
  document::{self, Document},
  error::Result,
  etc::CONFIG,
  graph,
  judge::{self, Action},
  poll, result, template,
};

/// Store the session cookie, prompting for it when not given on the
/// command line.
pub async fn login(cookie: Option<String>) -> Result<()> {
  let cookie = match cookie {
    Some(cookie) => cookie,
    None => dialoguer::Input::<String>::new()
      .with_prompt("Paste session cookie")
      .interact_text()?,
  };

  let path = auth::store_cookie(&cookie)?;
  match auth::csrf_token(&cookie) {
    Some(_) => log::info!("cookie stored at {}", path.display()),
    None => log::warn!(
      "cookie stored at {}, but it has no csrftoken; judge calls will fail",
      path.display()
    ),
  }
  return Ok(());
}

/// Search problems and print one line per match.
pub async fn search(keywords: &str) -> Result<()> {
  let client = graph::Client::from_global_config();
  let questions = client.search_problems(keywords).await?;
  if questions.is_empty() {
    println!("no problems matched `{}`", keywords);
    return Ok(());
  }
  for q in questions {
    let price = if q.paid_only { "paid" } else { "free" };
    let status = match q.status.as_deref() {
      Some("ac") => " | accepted",
      Some("notac") => " | attempted",
      _ => "",
    };
    println!(
      "[{:0>4}] {} ({})  {} | ac {:.3}% | {}{}",
      q.frontend_question_id, q.title, q.title_slug, q.difficulty, q.ac_rate, price, status
    );
  }
  return Ok(());
}

/// Fetch a problem and write a generated solution file.
pub async fn load(slug: &str) -> Result<()> {
  let client = graph::Client::from_global_config();
  let (contents, question) = fetch_template(&client, slug).await?;

  let path = solution_path(&question);
  tokio::fs::write(&path, contents).await?;
  log::info!("wrote {}", path.display());
  return Ok(());
}

/// Run the solution against its test cases.
pub async fn run(file: &str) -> Result<()> {
  judge_file(file, Action::Run).await
}

/// Submit the solution for full grading.
pub async fn submit(file: &str) -> Result<()> {
  judge_file(file, Action::Submit).await
}

/// Regenerate the solution file from fresh metadata, keeping the user's
/// code block and any previous results block.
pub async fn update(file: &str) -> Result<()> {
  let text = tokio::fs::read_to_string(file).await?;
  let old = Document::new(text);
  old.validate()?;
  let identity = old.identity()?;
  let code = old.code()?;
  let results = old.results()?.map(str::to_string);

  let client = graph::Client::from_global_config();
  let (contents, _) = fetch_template(&client, &identity.slug).await?;

  let mut doc = Document::new(contents);
  doc.replace_code(&code)?;
  if let Some(results) = results {
    if !doc.write_results(&results)? {
      log::warn!("fresh template has no results markers; previous results dropped");
    }
  }

  tokio::fs::write(file, doc.into_text()).await?;
  log::info!("updated {}", file);
  return Ok(());
}

/// The shared run/submit flow: parse the document, post the request, poll
/// the ticket to its terminal state, render, and persist the summary.
async fn judge_file(file: &str, action: Action) -> Result<()> {
  let cfg = CONFIG.read().unwrap().judge.clone();

  let text = tokio::fs::read_to_string(file).await?;
  let mut doc = Document::new(text);
  let solution = document::parse(&doc, action == Action::Run)?;

  let client = judge::Client::from_global_config()?;
  let ticket = match action {
    Action::Run => {
      client
        .run(
          solution.identity.id,
          &solution.identity.slug,
          &solution.code,
          &solution.data_input,
        )
        .await?
    }
    Action::Submit => {
      client
        .submit(solution.identity.id, &solution.identity.slug, &solution.code)
        .await?
    }
  };
  log::info!(
    "{} accepted by the judge (ticket {}); waiting for the verdict",
    action,
    ticket.id
  );

  // Ctrl-C stops the poll between attempts; the ticket itself keeps
  // running on the judge.
  let (cancel_tx, cancel_rx) = oneshot::channel();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      let _ = cancel_tx.send(());
    }
  });

  let verdict =
    poll::wait_judgement(&client, &ticket, cfg.poll_interval, cfg.max_retries, cancel_rx).await?;
  let (report, summary) = result::render(verdict, ticket.action, &solution.tests);
  println!("{}", report);

  if doc.write_results(&summary.to_block()?)? {
    tokio::fs::write(file, doc.text()).await?;
    log::info!("results written back to {}", file);
  } else {
    log::warn!("no results markers in {}; skipping write back", file);
  }
  return Ok(());
}

async fn fetch_template(
  client: &graph::Client,
  slug: &str,
) -> Result<(String, template::QuestionDisplay)> {
  let cfg = CONFIG.read().unwrap().judge.clone();

  let console = client.console_config(slug).await?;
  let meta: template::QuestionMeta =
    serde_json::from_str(&console.meta_data).unwrap_or_else(|err| {
      log::warn!(
        "cannot parse metadata for {}; the generated runner may call the wrong method: {}",
        slug,
        err
      );
      template::QuestionMeta::default()
    });

  let snippets = client.editor_data(slug).await?;
  let snippet = snippets
    .into_iter()
    .find(|s| s.lang_slug == cfg.lang)
    .map(|s| s.code)
    .unwrap_or_else(|| {
      log::warn!("no {} snippet for {}; starting from an empty block", cfg.lang, slug);
      String::new()
    });

  let question = template::QuestionDisplay {
    file_id: format!("{:0>4}", console.question_frontend_id),
    slug: slug.to_string(),
    backend_id: format!("{:0>4}", console.question_id),
  };

  let contents = template::generate(
    &cfg.host,
    &question,
    &snippet,
    &console.example_testcase_list,
    &meta,
  )?;
  return Ok((contents, question));
}

fn solution_path(question: &template::QuestionDisplay) -> PathBuf {
  let path = PathBuf::from(format!("{}-{}.py", question.file_id, question.slug));
  if !path.exists() {
    return path;
  }
  // Same collision rule as the generated filenames have always used:
  // suffix the unix epoch instead of clobbering the existing file.
  let epoch = chrono::Utc::now().timestamp();
  return PathBuf::from(format!(
    "{}-{}-{}.py",
    question.file_id, question.slug, epoch
  ));
}
