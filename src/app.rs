//! One interactive run: health check, location prompt, report.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use crate::error::AppError;
use crate::service::WeatherReporter;

pub const LOCATION_PROMPT: &str = "Enter a location (e.g., 'Marion, IN' or 'London'): ";

/// Trims user input, falling back to `default` when nothing was entered
pub fn resolve_location(input: &str, default: &str) -> String {
    match input.trim() {
        "" => default.to_string(),
        location => location.to_string(),
    }
}

/// Runs the whole pipeline.
///
/// The location prompt goes to `prompt`; `output` receives either the report
/// or a single `Error: <message>` line. Only failures writing to `output`
/// surface as `Err`.
pub async fn run<R, P, W>(
    reporter: &WeatherReporter,
    input: &mut R,
    prompt: &mut P,
    output: &mut W,
) -> io::Result<ExitCode>
where
    R: BufRead,
    P: Write,
    W: Write,
{
    match produce_report(reporter, input, prompt).await {
        Ok(report) => {
            writeln!(output, "{report}")?;
            output.flush()?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::debug!(kind = err.kind(), error = %err, "Run failed");
            writeln!(output, "Error: {err}")?;
            output.flush()?;
            reporter.action_log().record(format!("Script failed: {err}"));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn produce_report<R, P>(
    reporter: &WeatherReporter,
    input: &mut R,
    prompt: &mut P,
) -> Result<String, AppError>
where
    R: BufRead,
    P: Write,
{
    reporter.check_model_health().await?;
    let location = read_location(input, prompt, &reporter.config().default_location)?;
    reporter.generate_report(&location).await
}

/// Shows the location prompt and reads one answer
pub fn read_location<R, P>(input: &mut R, prompt: &mut P, default: &str) -> Result<String, AppError>
where
    R: BufRead,
    P: Write,
{
    write!(prompt, "{LOCATION_PROMPT}")
        .and_then(|()| prompt.flush())
        .map_err(AppError::Prompt)?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(AppError::Input)?;

    Ok(resolve_location(&line, default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_selects_default() {
        assert_eq!(resolve_location("", "Marion, IN"), "Marion, IN");
        assert_eq!(resolve_location("\n", "Marion, IN"), "Marion, IN");
        assert_eq!(resolve_location("   \r\n", "Marion, IN"), "Marion, IN");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct FailingInput;

    impl io::Read for FailingInput {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::InvalidData, "not utf-8"))
        }
    }

    #[test]
    fn read_location_prompts_then_reads() {
        let mut prompt = Vec::new();
        let location =
            read_location(&mut io::Cursor::new("London\n"), &mut prompt, "Marion, IN").unwrap();
        assert_eq!(location, "London");
        assert_eq!(prompt, LOCATION_PROMPT.as_bytes());
    }

    #[test]
    fn prompt_write_failure_is_not_a_read_failure() {
        let err = read_location(&mut io::Cursor::new("London\n"), &mut BrokenPipe, "Marion, IN")
            .unwrap_err();
        assert!(matches!(err, AppError::Prompt(_)), "got {err:?}");
        assert_eq!(err.to_string(), "Could not show location prompt: closed");
        assert_eq!(err.kind(), "prompt");
    }

    #[test]
    fn input_failure_is_a_read_failure() {
        let mut input = io::BufReader::new(FailingInput);
        let err = read_location(&mut input, &mut Vec::new(), "Marion, IN").unwrap_err();
        assert!(matches!(err, AppError::Input(_)), "got {err:?}");
        assert_eq!(err.to_string(), "Could not read location: not utf-8");
    }

    #[test]
    fn entered_location_is_trimmed() {
        assert_eq!(resolve_location("  London \n", "Marion, IN"), "London");
        assert_eq!(resolve_location("Paris, France\n", "Marion, IN"), "Paris, France");
    }
}
