/// Entry point and session loop.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use crossterm::tty::IsTty;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use config::GameConfig;
use error::GameError;
use sim::event::{EndCause, GameEvent};
use sim::state::GameState;
use sim::step;
use ui::input::{InputReader, ReadAnswer};
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

/// Sort four numbers, climb five levels.
#[derive(Parser, Debug, Default)]
#[command(name = "sortify", version, about, long_about = None)]
struct Cli {
    /// Seed for the number generator; random when omitted
    #[arg(allow_negative_numbers = true)]
    seed: Option<String>,

    /// Extra arguments turn the seed off
    #[arg(hide = true, allow_negative_numbers = true)]
    extra: Vec<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Read settings from this file instead of searching for config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Parse arguments without ever exiting non-zero. Help and version are
    /// printed as usual; any other usage error falls back to defaults.
    fn parse_lenient<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        match Cli::try_parse_from(args) {
            Ok(cli) => cli,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                if let Err(io_err) = e.print() {
                    eprintln!("Could not print help: {io_err}");
                }
                std::process::exit(0);
            }
            Err(e) => {
                eprint!("Warning: {e}");
                eprintln!("Ignoring arguments.");
                Cli::default()
            }
        }
    }

    /// The seed, only when it is the sole positional argument.
    fn seed(&self) -> Option<i64> {
        if !self.extra.is_empty() {
            return None;
        }
        self.seed.as_deref().map(leading_integer)
    }
}

/// Leading optionally-signed decimal digits; no digits gives 0 and
/// out-of-range values saturate.
fn leading_integer(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let mut value: i64 = 0;
    for d in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = i64::from(d - b'0');
        value = match value.checked_mul(10).and_then(|v| {
            if negative { v.checked_sub(d) } else { v.checked_add(d) }
        }) {
            Some(v) => v,
            None => return if negative { i64::MIN } else { i64::MAX },
        };
    }
    value
}

fn main() {
    let cli = Cli::parse_lenient(std::env::args_os());
    let config = GameConfig::load(cli.config.as_deref());
    init_logging(&config.log_filter);

    let seed = cli.seed().or(config.seed).unwrap_or_else(rand::random);
    tracing::info!(seed, "starting session");
    let mut rng = StdRng::seed_from_u64(seed as u64);

    let stdout = io::stdout();
    let color = config.color && !cli.no_color && stdout.is_tty();
    let mut renderer = Renderer::new(BufWriter::new(stdout.lock()), color);
    let mut input = InputReader::new(io::stdin().lock());

    let sound = if config.sound { SoundEngine::new() } else { None };

    let mut state = GameState::new();
    let result = game_loop(&mut state, &mut input, &mut renderer, &mut rng, sound.as_ref());
    tracing::info!(
        cause = ?state.end_cause(),
        score = state.score(),
        rounds = state.rounds(),
        "session over"
    );

    // Every exit path, including a broken level table, ends with status 0.
    if let Err(e) = result {
        if let Err(io_err) = report_failure(e.as_ref(), &mut renderer) {
            eprintln!("Could not report failure: {io_err}");
        }
    }
    if let Err(e) = renderer.flush() {
        eprintln!("Output flush failed: {e}");
    }
}

/// A broken level table gets the in-game diagnostic; anything else goes
/// to stderr.
fn report_failure<W: Write>(
    err: &(dyn std::error::Error + 'static),
    renderer: &mut Renderer<W>,
) -> io::Result<()> {
    match err.downcast_ref::<GameError>() {
        Some(game_err) => {
            tracing::error!(%game_err, "level table cannot be played");
            renderer.invalid_range()?;
            renderer.flush()
        }
        None => {
            eprintln!("Game error: {err}");
            Ok(())
        }
    }
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Run commands until the session ends or input runs out.
fn game_loop<R: BufRead, W: Write, G: Rng + ?Sized>(
    state: &mut GameState,
    input: &mut InputReader<R>,
    renderer: &mut Renderer<W>,
    rng: &mut G,
    sound: Option<&SoundEngine>,
) -> Result<(), Box<dyn std::error::Error>> {
    renderer.welcome()?;
    renderer.menu()?;

    while state.is_running() {
        renderer.flush()?;
        let Some(command) = input.next_command()? else {
            tracing::debug!("input closed");
            end_session(state, renderer, sound)?;
            break;
        };

        match command {
            'p' => play_round(state, input, renderer, rng, sound)?,
            'q' => {
                let events = state.quit();
                show_events(&events, state, renderer, sound)?;
            }
            'm' => renderer.menu()?,
            's' => renderer.status(&state.status())?,
            other => {
                tracing::debug!(?other, "unknown command");
                renderer.unknown_option()?;
            }
        }
    }

    renderer.flush()?;
    Ok(())
}

/// Ask one question and score the reply. A malformed reply re-asks the
/// same question; end of input quits.
fn play_round<R: BufRead, W: Write, G: Rng + ?Sized>(
    state: &mut GameState,
    input: &mut InputReader<R>,
    renderer: &mut Renderer<W>,
    rng: &mut G,
    sound: Option<&SoundEngine>,
) -> Result<(), Box<dyn std::error::Error>> {
    let question = state.generate_round(state.current_level(), rng)?;
    renderer.question(&question)?;

    loop {
        renderer.flush()?;
        match input.next_answer()? {
            ReadAnswer::Complete(answer) => {
                let events = step::play_round(state, &question, &answer);
                return Ok(show_events(&events, state, renderer, sound)?);
            }
            ReadAnswer::Malformed(token) => {
                tracing::warn!(%token, "answer is not four integers");
                input.discard_line();
                renderer.ask_again(&question)?;
            }
            ReadAnswer::Eof => {
                tracing::debug!("input closed mid-round");
                return Ok(end_session(state, renderer, sound)?);
            }
        }
    }
}

fn end_session<W: Write>(
    state: &mut GameState,
    renderer: &mut Renderer<W>,
    sound: Option<&SoundEngine>,
) -> io::Result<()> {
    let events = state.quit();
    show_events(&events, state, renderer, sound)
}

fn show_events<W: Write>(
    events: &[GameEvent],
    state: &GameState,
    renderer: &mut Renderer<W>,
    sound: Option<&SoundEngine>,
) -> io::Result<()> {
    process_sound_events(sound, events);
    renderer.events(events, &state.status())
}

fn process_sound_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    for event in events {
        match event {
            GameEvent::AnsweredCorrectly { .. } => sfx.play_correct(),
            GameEvent::AnsweredWrong => sfx.play_wrong(),
            GameEvent::LevelUp { .. } => sfx.play_level_up(),
            GameEvent::GameEnded(EndCause::Win) => sfx.play_win(),
            GameEvent::GameEnded(EndCause::RanOutOfRounds) => sfx.play_game_over(),
            GameEvent::GameEnded(EndCause::Quit) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::level::LevelSpec;

    /// Play a scripted session and return (final state, transcript, loop result).
    fn run(levels: Vec<LevelSpec>, script: &str) -> (GameState, String, Result<(), String>) {
        let mut state = GameState::with_levels(levels);
        let mut input = InputReader::new(script.as_bytes());
        let mut out = Vec::new();
        let result = {
            let mut renderer = Renderer::new(&mut out, false);
            let mut rng = StdRng::seed_from_u64(1);
            game_loop(&mut state, &mut input, &mut renderer, &mut rng, None).map_err(|e| e.to_string())
        };
        (state, String::from_utf8(out).unwrap(), result)
    }

    /// Levels whose range is a single value, so the right answer is known.
    fn fixed_levels() -> Vec<LevelSpec> {
        (0..5).map(|i| LevelSpec::new(10 * (i + 1), i as i32, i as i32)).collect()
    }

    #[test]
    fn quit_immediately() {
        let (state, out, result) = run(fixed_levels(), "q\n");
        assert!(result.is_ok());
        assert_eq!(state.end_cause(), Some(EndCause::Quit));
        assert!(out.starts_with("WELCOME TO SORTIFY!\n"));
        assert!(out.contains("| level:  01                  |"));
        assert!(out.ends_with("Bye.\n"));
    }

    #[test]
    fn unknown_option_leaves_state_alone() {
        let (state, out, _) = run(fixed_levels(), "x\nq\n");
        assert!(out.contains("Unknown option.\n"));
        assert_eq!(state.rounds(), 0);
    }

    #[test]
    fn menu_and_status_commands() {
        let (_, out, _) = run(fixed_levels(), "m s q");
        assert_eq!(out.matches("| p - next challenge          |").count(), 2);
        // one status from 's', one from quitting
        assert_eq!(out.matches("| plays:  00                  |").count(), 2);
    }

    #[test]
    fn correct_and_wrong_rounds() {
        let (state, out, _) = run(fixed_levels(), "p\n0 0 0 0\np\n1 0 0 0\nq\n");
        assert!(out.contains("Sort the following numbers:\n0, 0, 0, 0\n"));
        assert!(out.contains("Well done!\n"));
        assert!(out.contains("Wrong answer.\n"));
        assert_eq!((state.score(), state.rounds()), (5, 2));
    }

    #[test]
    fn malformed_answer_reasks_same_question() {
        let (state, out, _) = run(fixed_levels(), "p\n0 zero 0 0\n0 0 0 0\nq\n");
        assert!(out.contains("Please sort the numbers\n0, 0, 0, 0\n"));
        assert!(out.contains("Well done!\n"));
        assert_eq!(state.rounds(), 1);
    }

    #[test]
    fn winning_session() {
        // 11 correct answers pass all five levels; answers track the level
        let answers = ["0", "0", "0", "1", "1", "2", "2", "3", "3", "4", "4"];
        let script: String = answers.iter().map(|v| format!("p {v} {v} {v} {v}\n")).collect();
        let (state, out, result) = run(fixed_levels(), &script);
        assert!(result.is_ok());
        assert_eq!(state.end_cause(), Some(EndCause::Win));
        assert_eq!(out.matches("Well done!").count(), 11);
        assert!(out.contains("Congratulations, you win!\n"));
        assert!(out.contains("| level:  06                  |"));
        assert!(out.ends_with("Game Over.\n"));
    }

    #[test]
    fn commands_after_game_end_are_ignored() {
        let script = "p 9 9 9 9\n".repeat(30) + "s\n";
        let (state, out, _) = run(fixed_levels(), &script);
        assert_eq!(state.end_cause(), Some(EndCause::RanOutOfRounds));
        assert!(out.contains("You have reached the maximum number of moves.\n"));
        assert!(out.ends_with("Game Over.\n"));
    }

    #[test]
    fn eof_ends_like_quit() {
        let (state, out, _) = run(fixed_levels(), "s\n");
        assert_eq!(state.end_cause(), Some(EndCause::Quit));
        assert!(out.ends_with("Bye.\n"));
    }

    #[test]
    fn eof_mid_round_ends_like_quit() {
        let (state, out, _) = run(fixed_levels(), "p\n0 0\n");
        assert_eq!(state.end_cause(), Some(EndCause::Quit));
        assert_eq!(state.rounds(), 0);
        assert!(out.ends_with("Bye.\n"));
    }

    #[test]
    fn inverted_range_aborts_the_loop() {
        let (state, _, result) = run(vec![LevelSpec::new(10, 5, 1)], "p\n");
        let err = result.unwrap_err();
        assert!(err.contains("min 5 is greater than max 1"), "{err}");
        assert_eq!(state.rounds(), 0);
    }

    #[test]
    fn invalid_utf8_command_is_unknown_then_quits() {
        let mut state = GameState::new();
        let mut input = InputReader::new(&b"\xff\nq\n"[..]);
        let mut out = Vec::new();
        let result = {
            let mut renderer = Renderer::new(&mut out, false);
            let mut rng = StdRng::seed_from_u64(1);
            game_loop(&mut state, &mut input, &mut renderer, &mut rng, None).map_err(|e| e.to_string())
        };
        let out = String::from_utf8(out).unwrap();
        assert!(result.is_ok(), "{result:?}");
        assert_eq!(state.end_cause(), Some(EndCause::Quit));
        let unknown = out.find("Unknown option.\n").unwrap();
        let bye = out.find("Bye.\n").unwrap();
        assert!(unknown < bye);
        assert!(out.ends_with("Bye.\n"));
    }

    #[test]
    fn broken_level_table_prints_diagnostic() {
        let mut state = GameState::with_levels(vec![LevelSpec::new(10, 5, 1)]);
        let mut input = InputReader::new("p\n".as_bytes());
        let mut out = Vec::new();
        {
            let mut renderer = Renderer::new(&mut out, false);
            let mut rng = StdRng::seed_from_u64(1);
            let err = game_loop(&mut state, &mut input, &mut renderer, &mut rng, None).unwrap_err();
            report_failure(err.as_ref(), &mut renderer).unwrap();
        }
        let out = String::from_utf8(out).unwrap();
        assert!(out.ends_with("Max must be larger than Min\n"), "{out}");
        assert_eq!(state.end_cause(), None);
    }

    #[test]
    fn other_failures_leave_the_transcript_alone() {
        let mut out = Vec::new();
        let err = io::Error::new(io::ErrorKind::BrokenPipe, "closed");
        {
            let mut renderer = Renderer::new(&mut out, false);
            report_failure(&err, &mut renderer).unwrap();
        }
        assert!(out.is_empty());
    }

    #[test]
    fn cli_accepts_negative_seed() {
        let cli = Cli::parse_lenient(["sortify", "-7", "--no-color"]);
        assert_eq!(cli.seed(), Some(-7));
        assert!(cli.no_color);
    }

    #[test]
    fn cli_seed_is_optional() {
        let cli = Cli::parse_lenient(["sortify"]);
        assert_eq!(cli.seed(), None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn non_numeric_seed_reads_as_zero() {
        let cli = Cli::try_parse_from(["sortify", "abc"]).unwrap();
        assert_eq!(cli.seed(), Some(0));
        assert_eq!(Cli::parse_lenient(["sortify", "12abc"]).seed(), Some(12));
    }

    #[test]
    fn two_positional_arguments_drop_the_seed() {
        let cli = Cli::try_parse_from(["sortify", "1", "2"]).unwrap();
        assert_eq!(cli.seed(), None);
    }

    #[test]
    fn unknown_flag_falls_back_to_defaults() {
        let cli = Cli::parse_lenient(["sortify", "--bogus", "5"]);
        assert_eq!(cli.seed(), None);
        assert!(!cli.no_color);
    }

    #[test]
    fn leading_integer_reads_the_numeric_prefix() {
        assert_eq!(leading_integer("42"), 42);
        assert_eq!(leading_integer("  -15x"), -15);
        assert_eq!(leading_integer("+8"), 8);
        assert_eq!(leading_integer("x1"), 0);
        assert_eq!(leading_integer(""), 0);
        assert_eq!(leading_integer("99999999999999999999999"), i64::MAX);
        assert_eq!(leading_integer("-99999999999999999999999"), i64::MIN);
    }
}
