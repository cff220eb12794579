//! Yes/no prompt on stdin.

use colored::*;
use std::future::Future;
use std::io::{self, BufRead, IsTerminal, Write};

/// Outcome of an interruptible prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    /// stdin is not interactive
    Skipped,
    Interrupted,
}

/// Ask `question`, returning `default` on an empty answer.
///
/// Returns `None` when stdin is not interactive.
pub fn confirm(question: &str, default: bool) -> io::Result<Option<bool>> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Ok(None);
    }

    let hint = if default { "[Y/n]" } else { "[y/N]" };
    print!("{} {} ", question.bold(), hint.dimmed());
    io::stdout().flush()?;

    let mut answer = String::new();
    stdin.lock().read_line(&mut answer)?;
    Ok(Some(parse_answer(&answer, default)))
}

/// Run the blocking `ask` on its own thread while `interrupt` races it.
///
/// Once tokio watches SIGINT the default handler no longer ends the
/// process, so a prompt must listen for Ctrl-C itself. An interrupted
/// prompt leaves its reader thread blocked; callers exit right after.
pub async fn ask_until<A, F>(ask: A, interrupt: F) -> eyre::Result<Answer>
where
    A: FnOnce() -> io::Result<Option<bool>> + Send + 'static,
    F: Future<Output = ()>,
{
    let reply = tokio::task::spawn_blocking(ask);
    tokio::select! {
        biased;
        _ = interrupt => Ok(Answer::Interrupted),
        reply = reply => Ok(match reply?? {
            Some(true) => Answer::Yes,
            Some(false) => Answer::No,
            None => Answer::Skipped,
        }),
    }
}

/// Resolves on Ctrl-C; never resolves if the signal cannot be watched.
pub async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn parse_answer(answer: &str, default: bool) -> bool {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    }
}
