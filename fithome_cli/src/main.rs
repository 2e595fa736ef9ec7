use chrono::Utc;
use clap::{Parser, Subcommand};
use crossterm::{
    cursor, execute, queue,
    style::Print,
    terminal::{self, ClearType},
};
use fithome_core::shell::{
    render_dashboard, render_exercises, render_profile, render_progress, render_session,
    render_summary,
};
use fithome_core::*;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Terminal bell rung on each session transition
const BELL: char = '\x07';

#[derive(Parser)]
#[command(name = "fithome")]
#[command(about = "Home bodyweight workout tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard (default)
    Dashboard,

    /// Browse and filter the exercise library
    Exercises {
        /// Case-insensitive match on name or description
        #[arg(long, default_value = "")]
        search: String,

        /// Category (Chest, Legs, Abs, "Full Body", Arms) or "all"
        #[arg(long, default_value = "all")]
        category: String,

        /// Difficulty (Beginner, Intermediate, Advanced) or "all"
        #[arg(long, default_value = "all")]
        difficulty: String,
    },

    /// Show totals, weekly activity, recent workouts and achievements
    Progress,

    /// Show or update the user profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        /// male, female, other
        #[arg(long)]
        gender: Option<Gender>,
        /// Kilograms
        #[arg(long)]
        weight: Option<f64>,
        /// Centimetres
        #[arg(long)]
        height: Option<f64>,
        /// beginner, intermediate, advanced
        #[arg(long)]
        fitness_level: Option<FitnessLevel>,
        /// lose-weight, build-muscle, stay-fit
        #[arg(long)]
        goal: Option<FitnessGoal>,
    },

    /// Run a workout session
    Workout {
        /// Template id (full-body, chest, abs, legs, morning-energy, ...)
        #[arg(required_unless_present = "exercise")]
        template: Option<String>,

        /// Build a custom workout from exercise ids instead of a template
        #[arg(long, value_delimiter = ',', conflicts_with = "template")]
        exercise: Vec<u32>,

        /// Name for a custom workout
        #[arg(long, default_value = "Custom Workout")]
        name: String,

        /// Auto-complete (for testing) - let every countdown run out instantly
        #[arg(long, conflicts_with_all = ["auto_skip", "abandon_after"])]
        auto_complete: bool,

        /// Auto-skip (for testing) - skip every exercise and rest
        #[arg(long, conflicts_with = "abandon_after")]
        auto_skip: bool,

        /// Abandon (for testing) after this many ticks
        #[arg(long)]
        abandon_after: Option<u32>,

        /// Print share text when the workout completes
        #[arg(long)]
        share: bool,
    },

    /// Export workout history to CSV
    Export {
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    fithome_core::logging::init_with_level(if cli.verbose { "debug" } else { "warn" });

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::Catalog("Invalid catalog".into()));
    }

    let mut app = AppState::load(FileStore::new(data_dir))?;

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => {
            print!("{}", render_dashboard(catalog, app.stats(), app.profile()));
            Ok(())
        }
        Commands::Exercises {
            search,
            category,
            difficulty,
        } => {
            let filter = ExerciseFilter::parse(&search, &category, &difficulty)?;
            print!("{}", render_exercises(catalog, &filter));
            Ok(())
        }
        Commands::Progress => {
            print!("{}", render_progress(app.stats(), Utc::now().date_naive()));
            Ok(())
        }
        Commands::Profile {
            name,
            age,
            gender,
            weight,
            height,
            fitness_level,
            goal,
        } => {
            let mut profile = app.profile().clone();
            let before = profile.clone();
            profile.name = name.or(profile.name);
            profile.age = age.or(profile.age);
            profile.gender = gender.or(profile.gender);
            profile.weight = weight.or(profile.weight);
            profile.height = height.or(profile.height);
            profile.fitness_level = fitness_level.or(profile.fitness_level);
            profile.goal = goal.or(profile.goal);

            if profile != before {
                app.update_profile(profile)?;
                println!("✓ Profile Updated!");
                println!();
            }
            print!("{}", render_profile(app.profile()));
            Ok(())
        }
        Commands::Workout {
            template,
            exercise,
            name,
            auto_complete,
            auto_skip,
            abandon_after,
            share,
        } => {
            let workout = match template {
                Some(id) => catalog.workout(&id)?,
                None => catalog.build_workout(&name, &exercise)?,
            };
            let mode = if auto_complete {
                RunMode::AutoComplete
            } else if auto_skip {
                RunMode::AutoSkip
            } else if let Some(ticks) = abandon_after {
                RunMode::AbandonAfter(ticks)
            } else {
                RunMode::Live
            };
            cmd_workout(&mut app, workout, mode, share, &config)
        }
        Commands::Export { out } => {
            let count = export_history_csv(app.stats(), &out)?;
            println!("✓ Exported {} workouts to {}", count, out.display());
            Ok(())
        }
    }
}

enum RunMode {
    Live,
    AutoComplete,
    AutoSkip,
    AbandonAfter(u32),
}

enum RunOutcome {
    Completed(WorkoutSummary),
    Abandoned(WorkoutSession),
}

fn cmd_workout(
    app: &mut AppState<FileStore>,
    workout: WorkoutDefinition,
    mode: RunMode,
    share_requested: bool,
    config: &Config,
) -> Result<()> {
    let weight = app.weight_kg(config.profile.default_weight_kg);
    let mut session = WorkoutSession::start(workout, weight, Utc::now())?;

    let outcome = match mode {
        RunMode::Live => run_live(session, Duration::from_millis(config.timer.tick_millis))?,
        RunMode::AutoComplete => loop {
            if let Some(Transition::Completed(summary)) = session.tick(Utc::now()) {
                break RunOutcome::Completed(summary);
            }
        },
        RunMode::AutoSkip => loop {
            let transition = if session.is_resting() {
                session.skip_rest()?
            } else {
                session.skip_exercise(Utc::now())?
            };
            if let Transition::Completed(summary) = transition {
                break RunOutcome::Completed(summary);
            }
        },
        RunMode::AbandonAfter(ticks) => {
            let mut completed = None;
            for _ in 0..ticks {
                if let Some(Transition::Completed(summary)) = session.tick(Utc::now()) {
                    completed = Some(summary);
                    break;
                }
            }
            match completed {
                Some(summary) => RunOutcome::Completed(summary),
                None => RunOutcome::Abandoned(session),
            }
        }
    };

    match outcome {
        RunOutcome::Completed(summary) => {
            println!();
            print!("{}", render_summary(&summary));
            app.record_workout(summary.clone())?;
            println!("\n✓ Workout saved! ({} total)", app.stats().total_workouts);

            if share_requested {
                let mut target = StdoutShare;
                share(Some(&mut target), &summary)?;
            }
        }
        RunOutcome::Abandoned(session) => {
            let name = session.definition().name.clone();
            session.abandon();
            println!("\nWorkout '{}' abandoned - nothing recorded.", name);
        }
    }
    Ok(())
}

#[derive(Clone)]
enum Input {
    Tick,
    Line(String),
}

fn run_live(mut session: WorkoutSession, interval: Duration) -> Result<RunOutcome> {
    let (tx, rx) = mpsc::channel();

    // Detached stdin reader. It stays blocked in `lines()` once the session
    // ends and goes away with the process; its sends fail after `rx` drops.
    let input_tx = tx.clone();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(Input::Line(line)).is_err() {
                break;
            }
        }
    });

    let ticker = Ticker::spawn(interval, tx, Input::Tick);
    let interactive = io::stdout().is_terminal();
    let mut sound = true;

    draw(&session, interactive)?;
    let outcome = loop {
        let Ok(input) = rx.recv() else {
            break RunOutcome::Abandoned(session);
        };

        let result = match input {
            Input::Tick => Ok(session.tick(Utc::now())),
            Input::Line(cmd) => match cmd.trim() {
                "p" => session.toggle_timer().map(|_| None),
                "s" => session.skip_exercise(Utc::now()).map(Some),
                "r" => session.skip_rest().map(Some),
                "t" => session.reset_timer().map(|_| None),
                "m" => {
                    sound = !sound;
                    println!("Sound {}", if sound { "on" } else { "off" });
                    Ok(None)
                }
                "q" => break RunOutcome::Abandoned(session),
                _ => Ok(None),
            },
        };

        match result {
            Ok(Some(Transition::Completed(summary))) => {
                if sound {
                    ring_bell()?;
                }
                break RunOutcome::Completed(summary);
            }
            Ok(Some(_)) if sound => ring_bell()?,
            Ok(_) => {}
            Err(e) => println!("{}", e),
        }
        draw(&session, interactive)?;
    };

    ticker.cancel();
    Ok(outcome)
}

fn draw(session: &WorkoutSession, interactive: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if interactive {
        execute!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    }
    write!(stdout, "{}", render_session(session))?;
    writeln!(
        stdout,
        "[p] pause/resume  [s] skip  [r] skip rest  [t] reset timer  [m] sound  [q] quit"
    )?;
    stdout.flush()?;
    Ok(())
}

fn ring_bell() -> Result<()> {
    let mut stdout = io::stdout().lock();
    queue!(stdout, Print(BELL))?;
    stdout.flush()?;
    Ok(())
}

/// Share target that prints to the terminal
struct StdoutShare;

impl ShareTarget for StdoutShare {
    fn share(&mut self, title: &str, text: &str) -> Result<()> {
        println!("\n{}\n{}", title, text);
        Ok(())
    }
}
