use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use services::config::{parse_flag, parse_timeout};
use services::{Advance, BankConfig, FinalScore, QuestionBankClient, QuizSession, SessionError};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

mod markup;
mod vm;

use vm::QuestionView;

type Input = Lines<BufReader<Stdin>>;

/// Pause between answering and the next question, so the verdict is readable.
const RESULT_PAUSE: Duration = Duration::from_millis(500);

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidValue { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidValue { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--bank-url <url>] [--timeout-secs <n>] [--shuffle-boolean <bool>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --bank-url {}", services::config::DEFAULT_BANK_URL);
    eprintln!("  --timeout-secs {}", services::config::DEFAULT_TIMEOUT.as_secs());
    eprintln!("  --shuffle-boolean false");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRIVIA_BANK_URL, TRIVIA_TIMEOUT_SECS, TRIVIA_SHUFFLE_BOOLEAN, TRIVIA_LOG");
}

/// Apply command-line flags on top of `config`. `None` means help was printed.
fn parse_args(
    mut config: BankConfig,
    args: &mut impl Iterator<Item = String>,
) -> Result<Option<BankConfig>, ArgsError> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--bank-url" => {
                let value = require_value(args, "--bank-url")?;
                config = config
                    .with_base_url("--bank-url", value.clone())
                    .map_err(|_| ArgsError::InvalidValue {
                        flag: "--bank-url",
                        raw: value,
                    })?;
            }
            "--timeout-secs" => {
                let value = require_value(args, "--timeout-secs")?;
                config.timeout = parse_timeout("--timeout-secs", &value).map_err(|_| {
                    ArgsError::InvalidValue {
                        flag: "--timeout-secs",
                        raw: value.clone(),
                    }
                })?;
            }
            "--shuffle-boolean" => {
                let value = require_value(args, "--shuffle-boolean")?;
                config.randomize_boolean =
                    parse_flag("--shuffle-boolean", &value).map_err(|_| {
                        ArgsError::InvalidValue {
                            flag: "--shuffle-boolean",
                            raw: value.clone(),
                        }
                    })?;
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    Ok(Some(config))
}

fn init_tracing() {
    // Logs go to stderr so they never interleave with the quiz on stdout.
    let filter = EnvFilter::try_from_env("TRIVIA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn render(view: &QuestionView) {
    println!();
    println!("{}", view.number_label);
    println!("[{}]", view.category);
    println!("{}", view.prompt);
    for (number, option) in view.options.iter().enumerate() {
        println!("  {}) {}", number + 1, option.label);
    }
}

/// Read until the user picks a valid option. `None` when stdin is closed.
async fn read_choice(
    view: &QuestionView,
    input: &mut Input,
) -> Result<Option<String>, std::io::Error> {
    loop {
        let Some(line) = input.next_line().await? else {
            return Ok(None);
        };
        let choice = line.trim().parse::<usize>().ok();
        if let Some(raw) = choice.and_then(|choice| view.raw_for_choice(choice)) {
            return Ok(Some(raw.to_string()));
        }
        println!("Pick a number from 1 to {}.", view.options.len());
    }
}

async fn ask_restart(input: &mut Input) -> Result<bool, std::io::Error> {
    println!("Restart? [y/N]");
    let line = input.next_line().await?.unwrap_or_default();
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

/// Play the loaded deck to the end. `None` if input ran out first.
async fn play(
    session: &mut QuizSession,
    input: &mut Input,
) -> Result<Option<FinalScore>, Box<dyn std::error::Error>> {
    loop {
        let view = QuestionView::from_current(&session.current_question()?);
        render(&view);

        let Some(raw) = read_choice(&view, input).await? else {
            return Ok(None);
        };
        let outcome = session.submit_answer(&raw)?;
        if outcome.correct {
            println!("Correct!");
        } else {
            println!(
                "Wrong. The answer was {}.",
                markup::decode_entities(&outcome.correct_answer)
            );
        }
        tokio::time::sleep(RESULT_PAUSE).await;

        if let Advance::Finished(score) = session.advance()? {
            return Ok(Some(score));
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = BankConfig::from_env()?;
    let mut argv = std::env::args().skip(1);
    let Some(config) = parse_args(config, &mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?
    else {
        return Ok(());
    };

    tracing::info!(bank = %config.base_url, "starting trivia session");
    let client = QuestionBankClient::from_config(config)?;
    let builder = client.config().option_builder();
    let mut session = QuizSession::new(Arc::new(client)).with_option_builder(builder);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    session.start()?;
    loop {
        println!("Loading questions...");
        match session.wait_loaded().await {
            Ok(_) => {
                let Some(score) = play(&mut session, &mut input).await? else {
                    return Ok(());
                };
                println!();
                println!("{}", vm::game_over_message(score));
            }
            Err(SessionError::EmptyDeck) => {
                eprintln!("Could not fetch any questions. Check your connection.");
            }
            Err(err) => return Err(err.into()),
        }

        if !ask_restart(&mut input).await? {
            return Ok(());
        }
        session.restart()?;
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> impl Iterator<Item = String> {
        items
            .iter()
            .map(|s| (*s).to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn flags_override_config() {
        let config = parse_args(
            BankConfig::default(),
            &mut args(&[
                "--bank-url",
                "http://localhost:9000/api.php",
                "--timeout-secs",
                "2",
                "--shuffle-boolean",
                "true",
            ]),
        )
        .unwrap()
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000/api.php");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert!(config.randomize_boolean);
    }

    #[test]
    fn missing_flag_value_is_reported() {
        let err = parse_args(BankConfig::default(), &mut args(&["--timeout-secs"])).unwrap_err();
        assert!(matches!(
            err,
            ArgsError::MissingValue {
                flag: "--timeout-secs"
            }
        ));
    }

    #[test]
    fn unknown_flag_is_reported() {
        let err = parse_args(BankConfig::default(), &mut args(&["--deck"])).unwrap_err();
        assert_eq!(err.to_string(), "unknown argument: --deck");
    }

    #[test]
    fn bad_bank_url_is_reported() {
        let err =
            parse_args(BankConfig::default(), &mut args(&["--bank-url", "file:///tmp"])).unwrap_err();
        assert_eq!(err.to_string(), "invalid --bank-url value: file:///tmp");
    }

    #[test]
    fn bad_timeout_is_reported() {
        let err =
            parse_args(BankConfig::default(), &mut args(&["--timeout-secs", "soon"])).unwrap_err();
        assert_eq!(err.to_string(), "invalid --timeout-secs value: soon");
    }
}
