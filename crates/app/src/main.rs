use std::fmt;
use std::io::Write;

use services::{
    AppServices, DailyWordSession, Direction, NavigationOutcome, Pronouncer, SubmitOutcome,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use word_core::model::{Day, WordList};
use word_core::settings::QuizSettings;

const CONTENT: &str = include_str!("../content/words.json");

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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
    eprintln!("  cargo run -p app -- [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://daily-word.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DAILY_WORD_DB_URL, RUST_LOG");
}

struct Args {
    db_url: String,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut db_url = std::env::var("DAILY_WORD_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://daily-word.sqlite3".into(), normalize_sqlite_url);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(Self { db_url }))
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

//
// ─── COMMANDS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Show,
    Quiz,
    Pick { task: usize, option: usize },
    Check,
    Shuffle,
    Next,
    Prev,
    Review,
    Reviews,
    Goto(Day),
    Unreview(Day),
    Say,
    Stats,
    Reset,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
enum CommandError {
    Unknown(String),
    MissingArgument(&'static str),
    InvalidNumber(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Unknown(cmd) => write!(f, "unknown command: {cmd} (try `help`)"),
            CommandError::MissingArgument(what) => write!(f, "missing {what}"),
            CommandError::InvalidNumber(raw) => write!(f, "not a valid number: {raw}"),
        }
    }
}

fn number(raw: Option<&str>, what: &'static str) -> Result<usize, CommandError> {
    let raw = raw.ok_or(CommandError::MissingArgument(what))?;
    match raw.parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(CommandError::InvalidNumber(raw.to_string())),
    }
}

fn day_arg(raw: Option<&str>) -> Result<Day, CommandError> {
    let raw = raw.ok_or(CommandError::MissingArgument("day"))?;
    raw.parse::<Day>()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

impl Command {
    fn parse(line: &str) -> Result<Self, CommandError> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Ok(Self::Show);
        };
        match head {
            "show" => Ok(Self::Show),
            "quiz" => Ok(Self::Quiz),
            "pick" => {
                let task = number(parts.next(), "task number")?;
                let option = number(parts.next(), "option number")?;
                Ok(Self::Pick { task, option })
            }
            "check" => Ok(Self::Check),
            "shuffle" => Ok(Self::Shuffle),
            "next" => Ok(Self::Next),
            "prev" => Ok(Self::Prev),
            "review" => Ok(Self::Review),
            "reviews" => Ok(Self::Reviews),
            "goto" => day_arg(parts.next()).map(Self::Goto),
            "unreview" => day_arg(parts.next()).map(Self::Unreview),
            "say" => Ok(Self::Say),
            "stats" => Ok(Self::Stats),
            "reset" => Ok(Self::Reset),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  show                 word of the day");
    println!("  quiz                 show the tasks");
    println!("  pick <task> <option> choose an option, e.g. `pick 1 3`");
    println!("  check                check your answers");
    println!("  shuffle              clear answers and reshuffle options");
    println!("  next | prev          move between days");
    println!("  review               add/remove the current word to review");
    println!("  reviews              list words for review");
    println!("  goto <day>           open a word from the review list");
    println!("  unreview <day>       remove a word from the review list");
    println!("  say                  pronounce the word");
    println!("  stats                statistics");
    println!("  reset                reset all statistics");
    println!("  quit");
}

//
// ─── RENDERING ─────────────────────────────────────────────────────────────────
//

struct ConsolePronouncer;

impl Pronouncer for ConsolePronouncer {
    fn speak(&self, text: &str, language: &str) {
        println!("🔊 {text} [{language}]");
    }
}

fn show_word(session: &DailyWordSession) {
    let word = session.current_word();
    println!();
    println!("Day {} of {}", session.current_day(), session.total_days());
    println!("  {} - {}", word.word(), word.translation());
    println!("  \"{}\"", word.example_sentence());
    println!("  {}", word.example_translation());
    if session.is_current_in_review() {
        println!("  (in review)");
    }
}

fn show_tasks(session: &DailyWordSession) {
    if session.is_quiz_locked() {
        println!("Quiz locked: finish the previous day first.");
        return;
    }
    let attempt = session.attempt();
    for (idx, task) in session.tasks().iter().enumerate() {
        println!();
        println!("Task {}: {}", idx + 1, task.prompt);
        println!("  {}", task.prompt_translation);
        for (opt_idx, option) in task.options.iter().enumerate() {
            let marker = if attempt.answer(idx) == Some(option.as_str()) {
                "*"
            } else {
                " "
            };
            println!("  {marker} {}. {option}", opt_idx + 1);
        }
        if attempt.errors()[idx] {
            println!("  ❌ Correct answer: {}", task.correct_answer);
        }
    }
}

fn show_stats(session: &DailyWordSession) {
    let stats = session.stats();
    println!("Learned:   {}", stats.learned);
    println!("In review: {}", stats.in_review);
    println!("Progress:  {}%", stats.percent);
}

fn show_navigation(outcome: NavigationOutcome, session: &DailyWordSession) {
    match outcome {
        NavigationOutcome::Moved(_) => show_word(session),
        NavigationOutcome::Blocked => println!("Not available yet."),
    }
}

//
// ─── LOOP ──────────────────────────────────────────────────────────────────────
//

async fn prompt(lines: &mut Lines<BufReader<Stdin>>) -> std::io::Result<Option<String>> {
    print!("> ");
    std::io::stdout().flush()?;
    lines.next_line().await
}

/// Handle one command; returns false when the user quits.
async fn dispatch(
    command: Command,
    session: &mut DailyWordSession,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        Command::Show => show_word(session),
        Command::Quiz => show_tasks(session),
        Command::Pick { task, option } => {
            let value = session
                .tasks()
                .get(task - 1)
                .and_then(|t| t.options.get(option - 1))
                .cloned();
            match value {
                Some(value) if session.select_option(task - 1, &value) => {
                    println!("Task {task}: {value}");
                }
                _ => println!("No such task or option."),
            }
        }
        Command::Check => match session.submit_answers().await? {
            SubmitOutcome::Locked => println!("Quiz locked: finish the previous day first."),
            SubmitOutcome::Evaluated { evaluation, .. } if evaluation.all_correct() => {
                println!("✅ Correct! The word is marked as learned.");
            }
            SubmitOutcome::Evaluated { .. } => show_tasks(session),
        },
        Command::Shuffle => {
            session.reshuffle();
            show_tasks(session);
        }
        Command::Next => {
            let outcome = session.navigate(Direction::Next).await?;
            show_navigation(outcome, session);
        }
        Command::Prev => {
            let outcome = session.navigate(Direction::Previous).await?;
            show_navigation(outcome, session);
        }
        Command::Review => {
            if session.toggle_review_current().await? {
                println!("Added to review.");
            } else {
                println!("Removed from review.");
            }
        }
        Command::Reviews => {
            let items = session.review_items();
            if items.is_empty() {
                println!("No words for review yet.");
            }
            for item in items {
                println!(
                    "  day {}: {} - {}",
                    item.day,
                    item.word.word(),
                    item.word.translation()
                );
            }
        }
        Command::Goto(day) => {
            let outcome = session.go_to_review_item(day).await?;
            show_navigation(outcome, session);
        }
        Command::Unreview(day) => {
            if session.remove_from_review(day).await? {
                println!("Removed day {day} from review.");
            }
        }
        Command::Say => session.play_pronunciation(&ConsolePronouncer),
        Command::Stats => show_stats(session),
        Command::Reset => {
            println!("Reset all statistics? [y/N]");
            let answer = prompt(lines).await?.unwrap_or_default();
            let confirmed = matches!(answer.trim(), "y" | "Y" | "yes");
            if session.reset_statistics(|| confirmed).await? {
                show_word(session);
            }
        }
        Command::Help => print_help(),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let Some(parsed) = Args::parse(&mut argv).inspect_err(|_| print_usage())? else {
        print_usage();
        return Ok(());
    };

    let words = WordList::from_json(CONTENT)?;
    log::info!("loaded {} words; database {}", words.total_days(), parsed.db_url);
    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, words, QuizSettings::default()).await?;
    let mut session = services.start_session().await?;

    let content = services.words();
    println!("{}", content.title());
    println!("{}", content.subtitle());
    show_word(&session);
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = prompt(&mut lines).await? {
        match Command::parse(&line) {
            Ok(command) => {
                if !dispatch(command, &mut session, &mut lines).await? {
                    break;
                }
            }
            Err(err) => println!("{err}"),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
