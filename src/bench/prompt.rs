use std::io::{self, BufRead, Write};

/// Source of yes/no answers for interactive decisions.
pub trait Prompt {
    /// Asks `question` and returns `true` for a yes.
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Asks on stdout and reads the answer from stdin.
///
/// Only an answer starting with `y` or `Y` counts as a yes.  End of input
/// counts as a no.  A `quiet` prompt reads answers without printing the
/// question.
#[derive(Default, Debug, Clone, Copy)]
pub struct StdinPrompt {
    pub quiet: bool,
}

impl StdinPrompt {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Writes `question` unless quiet and returns the next line of stdin,
    /// including its line terminator.
    pub fn read_line(&self, question: &str) -> io::Result<String> {
        let mut stdin = io::stdin().lock();
        if self.quiet {
            ask(&mut stdin, None, question)
        } else {
            ask(&mut stdin, Some(&mut io::stdout()), question)
        }
    }
}

impl Prompt for StdinPrompt {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let line = self.read_line(question)?;
        Ok(is_yes(&line))
    }
}

fn ask(input: &mut impl BufRead, output: Option<&mut dyn Write>, question: &str) -> io::Result<String> {
    if let Some(out) = output {
        write!(out, "{question}")?;
        out.flush()?;
    }
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

/// Gives the same answer to every question.  Used for unattended runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Prompt for FixedAnswer {
    fn confirm(&mut self, _question: &str) -> io::Result<bool> {
        Ok(self.0)
    }
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        (**self).confirm(question)
    }
}

pub(crate) fn is_yes(answer: &str) -> bool {
    matches!(answer.trim_start().chars().next(), Some('y' | 'Y'))
}

#[test]
fn test_answers() {
    assert!(is_yes("y\n"));
    assert!(is_yes("Yes"));
    assert!(is_yes("  y"));
    assert!(!is_yes("n\n"));
    assert!(!is_yes(""));
    assert!(!is_yes("\n"));
    assert!(!is_yes("maybe"));

    let mut p = FixedAnswer(true);
    assert!(p.confirm("again? ").unwrap());
    assert!(!FixedAnswer(false).confirm("again? ").unwrap());
}

#[test]
fn test_ask_quiet() {
    let mut input = io::Cursor::new("7\nn\n");
    let mut output = Vec::<u8>::new();

    let line = ask(&mut input, Some(&mut output), "Size? ").unwrap();
    assert_eq!(line, "7\n");
    assert_eq!(output, b"Size? ");

    // nothing is written without an output
    let line = ask(&mut input, None, "Again? ").unwrap();
    assert!(!is_yes(&line));
    assert_eq!(output, b"Size? ");

    // end of input reads as an empty answer
    assert_eq!(ask(&mut input, None, "Again? ").unwrap(), "");
}
