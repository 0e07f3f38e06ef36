//! Implementation of the `new` command.
//!
//! Tickets are created by asking the user a fixed series of questions.
//! Answers come from an [`AnswerSource`] so the dialogue can be scripted.

use gitit_format::{DEFAULT_RELEASE, TicketKind, TicketRecord, TicketStatus, now_seconds};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use tracing::debug;

use crate::error::{Error, Result};
use crate::identity::IdentityProvider;
use crate::storage::validate_release;

/// Prompt for the ticket title
pub const TITLE_PROMPT: &str = "Title: ";

/// Prompt for the ticket type
pub const TYPE_PROMPT: &str = "Type [(b)ug, (f)eature, (i)ssue, (t)ask]: ";

/// Prompt for the ticket priority
pub const PRIORITY_PROMPT: &str = "Priority [(1)high, (2)medium, (3)low]: ";

/// Prompt for the release
pub const RELEASE_PROMPT: &str = "Release: ";

/// Priority used when the priority question is left empty
pub const DEFAULT_NEW_PRIORITY: i64 = 2;

/// Source of answers to interactive questions.
pub trait AnswerSource {
    /// Show `prompt` and return the answer without its line terminator.
    ///
    /// Returns `None` once input has ended.
    fn ask(&mut self, prompt: &str) -> Option<String>;
}

/// Prompts on stderr and reads answers from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinAnswers;

impl AnswerSource for StdinAnswers {
    fn ask(&mut self, prompt: &str) -> Option<String> {
        prompt_line(prompt, &mut io::stdin().lock(), &mut io::stderr())
    }
}

/// Write `prompt` to `output` and read one line from `input`.
///
/// A prompt that cannot be shown is logged and the line is read anyway.
fn prompt_line<R, W>(prompt: &str, input: &mut R, output: &mut W) -> Option<String>
where
    R: BufRead,
    W: Write,
{
    if let Err(e) = write!(output, "{prompt}").and_then(|()| output.flush()) {
        debug!(error = %e, "Could not show prompt");
    }

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        Err(e) => {
            debug!(error = %e, "Could not read answer");
            None
        }
    }
}

/// Answers taken from a fixed list, in order.
#[derive(Debug, Default, Clone)]
pub struct ScriptedAnswers {
    answers: VecDeque<String>,
    /// Every prompt asked so far.
    pub prompts: Vec<String>,
}

impl ScriptedAnswers {
    /// Create a source that replays `answers`.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }
}

impl AnswerSource for ScriptedAnswers {
    fn ask(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front()
    }
}

/// Ask `prompt` until `parse` accepts the answer.
fn ask_until<T, A, F>(answers: &mut A, prompt: &str, parse: F) -> Result<T>
where
    A: AnswerSource + ?Sized,
    F: Fn(&str) -> Option<T>,
{
    loop {
        let answer = answers.ask(prompt).ok_or(Error::InputAborted)?;
        if let Some(value) = parse(answer.trim()) {
            return Ok(value);
        }
    }
}

fn parse_kind(answer: &str) -> Option<TicketKind> {
    match answer {
        "b" => Some(TicketKind::Bug),
        "f" => Some(TicketKind::Feature),
        "i" => Some(TicketKind::Issue),
        "t" => Some(TicketKind::Task),
        _ => None,
    }
}

fn parse_priority(answer: &str) -> Option<i64> {
    match answer {
        "" => Some(DEFAULT_NEW_PRIORITY),
        "1" | "2" | "3" => answer.parse().ok(),
        _ => None,
    }
}

fn parse_release(answer: &str) -> Option<String> {
    if answer.is_empty() {
        return Some(DEFAULT_RELEASE.to_string());
    }
    match validate_release(answer) {
        Ok(()) => Some(answer.to_string()),
        Err(e) => {
            debug!(error = %e, "Rejected release answer");
            None
        }
    }
}

/// Build a new open ticket from the user's answers.
///
/// The identity is checked before any question is asked. The returned
/// ticket has no id yet.
///
/// # Errors
///
/// Returns [`Error::IdentityMissing`] if the git identity is incomplete and
/// [`Error::InputAborted`] if input ends before all answers are given.
pub fn create_interactive<A, I>(answers: &mut A, identity: &I) -> Result<TicketRecord>
where
    A: AnswerSource + ?Sized,
    I: IdentityProvider + ?Sized,
{
    let issuer = identity.issuer()?;

    let title = ask_until(answers, TITLE_PROMPT, |answer| {
        (!answer.is_empty()).then(|| answer.to_string())
    })?;
    let kind = ask_until(answers, TYPE_PROMPT, parse_kind)?;
    let priority = ask_until(answers, PRIORITY_PROMPT, parse_priority)?;
    let release = ask_until(answers, RELEASE_PROMPT, parse_release)?;

    Ok(TicketRecord {
        title,
        kind,
        issuer,
        created_at: now_seconds(),
        priority,
        status: TicketStatus::Open,
        release,
        ..TicketRecord::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::FixedIdentity;
    use rstest::rstest;

    fn jane() -> FixedIdentity {
        FixedIdentity::new("Jane Doe", "jane@example.com")
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn test_prompt_line_reads_answer() {
        let mut output = Vec::new();

        let answer = prompt_line(TITLE_PROMPT, &mut "Crash\r\nmore\n".as_bytes(), &mut output);

        assert_eq!(answer.as_deref(), Some("Crash"));
        assert_eq!(output, TITLE_PROMPT.as_bytes());
    }

    #[test]
    fn test_prompt_line_survives_unwritable_output() {
        let answer = prompt_line(TITLE_PROMPT, &mut "Crash\n".as_bytes(), &mut BrokenPipe);
        assert_eq!(answer.as_deref(), Some("Crash"));
    }

    #[test]
    fn test_prompt_line_end_of_input() {
        let answer = prompt_line(TITLE_PROMPT, &mut "".as_bytes(), &mut Vec::new());
        assert_eq!(answer, None);
    }

    #[test]
    fn test_create_full_dialogue() {
        let mut answers = ScriptedAnswers::new(["Crash on start", "b", "1", "v1"]);

        let ticket = create_interactive(&mut answers, &jane()).unwrap();

        assert_eq!(ticket.title, "Crash on start");
        assert_eq!(ticket.kind, TicketKind::Bug);
        assert_eq!(ticket.priority, 1);
        assert_eq!(ticket.release, "v1");
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.issuer, "Jane Doe <jane@example.com>");
        assert!(!ticket.is_assigned());
        assert_eq!(
            answers.prompts,
            vec![TITLE_PROMPT, TYPE_PROMPT, PRIORITY_PROMPT, RELEASE_PROMPT]
        );
    }

    #[test]
    fn test_create_defaults() {
        let mut answers = ScriptedAnswers::new(["Tidy up", "t", "", "  "]);

        let ticket = create_interactive(&mut answers, &jane()).unwrap();

        assert_eq!(ticket.priority, DEFAULT_NEW_PRIORITY);
        assert_eq!(ticket.release, DEFAULT_RELEASE);
    }

    #[test]
    fn test_invalid_answers_are_asked_again() {
        let mut answers =
            ScriptedAnswers::new(["", "   ", "Title", "x", "bf", "f", "4", "12", "3", "v2"]);

        let ticket = create_interactive(&mut answers, &jane()).unwrap();

        assert_eq!(ticket.title, "Title");
        assert_eq!(ticket.kind, TicketKind::Feature);
        assert_eq!(ticket.priority, 3);
        assert_eq!(ticket.release, "v2");
        assert_eq!(answers.prompts.len(), 10);
    }

    #[rstest]
    #[case::parent_directory("../x")]
    #[case::nested("v1/v2")]
    #[case::hidden(".hidden")]
    fn test_release_outside_root_is_asked_again(#[case] bad_release: &str) {
        let mut answers = ScriptedAnswers::new(["T", "b", "1", bad_release, "v1"]);

        let ticket = create_interactive(&mut answers, &jane()).unwrap();

        assert_eq!(ticket.release, "v1");
        assert_eq!(
            answers.prompts,
            vec![TITLE_PROMPT, TYPE_PROMPT, PRIORITY_PROMPT, RELEASE_PROMPT, RELEASE_PROMPT]
        );
    }

    #[rstest]
    #[case::during_title(vec![])]
    #[case::during_type(vec!["Title"])]
    #[case::during_priority(vec!["Title", "i"])]
    #[case::during_release(vec!["Title", "i", "2"])]
    fn test_end_of_input_aborts(#[case] script: Vec<&str>) {
        let mut answers = ScriptedAnswers::new(script);
        let result = create_interactive(&mut answers, &jane());
        assert!(matches!(result, Err(Error::InputAborted)));
    }

    #[test]
    fn test_missing_identity_asks_nothing() {
        let mut answers = ScriptedAnswers::new(["Title", "b", "1", "v1"]);
        let identity = FixedIdentity::new("Jane Doe", "");

        let result = create_interactive(&mut answers, &identity);

        assert!(matches!(result, Err(Error::IdentityMissing(_))));
        assert!(answers.prompts.is_empty());
    }
}
