//! Run an americano tournament from the terminal.
//!
//! Picks a mode, collects the roster, then reads scoring commands from stdin
//! until `quit`. With a database configured, `save` persists the tournament.

use anyhow::{Context, Result, bail};
use log::{info, warn};
use pico_args::Arguments;
use std::{io::Write, sync::Arc};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use americano::{
    GameMode,
    db::{Database, TournamentRepository},
    entitlement::{EntitlementCheck, PgEntitlements, StaticEntitlements, mode_access},
    session::{SessionHandle, TournamentActor},
    tournament::{PhaseOverview, TournamentPhase},
};
use americano_cli::{
    commands::{self, Command, parse_command},
    config::{CliConfig, CliOverrides},
    render,
};

const HELP: &str = "\
Run an americano tournament

USAGE:
  americano_cli [OPTIONS]

OPTIONS:
  --mode MODE              super8 | super12 | super6-fixed | super8-fixed | super12-fixed  [default: env AMERICANO_MODE or super8]
  --pairing TYPE           manual | random  [default: env AMERICANO_PAIRING or manual]
  --scoring MODEL          games | wins  [default: env AMERICANO_SCORING or games]
  --players A,B,...        Roster entries in slot order; missing ones are prompted for
  --name NAME              Name used when saving
  --user UUID              Signed-in user (premium modes, saving)  [default: env AMERICANO_USER]
  --database-url URL       Enable persistence  [default: env DATABASE_URL]

FLAGS:
  -h, --help               Print help information
";

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let overrides = CliOverrides {
        mode: pargs.opt_value_from_str("--mode")?,
        pairing: pargs.opt_value_from_str("--pairing")?,
        scoring: pargs.opt_value_from_str("--scoring")?,
        players: pargs.opt_value_from_str("--players")?,
        name: pargs.opt_value_from_str("--name")?,
        user: pargs.opt_value_from_str("--user")?,
        database_url: pargs.opt_value_from_str("--database-url")?,
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info,sqlx=warn"))
        .format_target(false)
        .init();

    let config = CliConfig::from_env(overrides).context("Invalid configuration")?;
    config.validate().context("Invalid configuration")?;

    run(config).await
}

async fn run(config: CliConfig) -> Result<()> {
    let database = match &config.database {
        Some(db_config) => {
            let db = Database::new(db_config)
                .await
                .context("Failed to connect to database")?;
            db.health_check().await.context("Database health check failed")?;
            info!("Connected to database");
            Some(db)
        }
        None => None,
    };

    let entitlements: Box<dyn EntitlementCheck> = match &database {
        Some(db) => Box::new(PgEntitlements::new(db.pool().clone())),
        None => Box::new(StaticEntitlements::new()),
    };

    let mut access = Vec::with_capacity(GameMode::ALL.len());
    for mode in GameMode::ALL {
        access.push((mode, mode_access(mode, config.user, entitlements.as_ref()).await));
    }
    print!("{}", render::modes(&access));

    let mode = config.settings.mode;
    if !mode_access(mode, config.user, entitlements.as_ref()).await.is_granted() {
        bail!("{mode} needs a premium account");
    }

    let (mut actor, session) = TournamentActor::new(config.settings);
    if let Some(db) = &database {
        let repository = db.tournaments();
        repository
            .ensure_schema()
            .await
            .context("Failed to prepare schema")?;
        let repository: Arc<dyn TournamentRepository> = Arc::new(repository);
        actor = actor.with_repository(repository);
    }
    let actor_task = tokio::spawn(actor.run());

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    session
        .fill(config.players.clone())
        .await
        .context("Failed to enter roster")?;

    if collect_roster(&session, &mut input).await? {
        repl(&config, &session, &mut input).await?;
    }

    session.close().await.ok();
    actor_task.await.context("Session task failed")?;
    if let Some(db) = database {
        db.close().await;
    }
    Ok(())
}

/// Prompt for blank slots until the roster is ready, then start.
///
/// Returns `false` if stdin closed first.
async fn collect_roster(session: &SessionHandle, input: &mut Input) -> Result<bool> {
    loop {
        let phase = session.snapshot().await?;
        let draft = match &phase {
            TournamentPhase::Setup(draft) => draft,
            TournamentPhase::Running(_) => return Ok(true),
        };

        match draft.readiness() {
            Ok(()) => {
                let state = session.start().await?;
                println!("Started {} with {} entries", state.mode(), state.roster().len());
                show(session, state.navigator().round_number(), state.navigator().round_count()).await?;
                return Ok(true);
            }
            Err(not_ready) => {
                let Some(&slot) = not_ready.blank_slots.first() else {
                    bail!("{not_ready}");
                };
                let unit = if phase.settings().mode.is_fixed_pairs() { "Pair" } else { "Player" };
                let Some(label) = prompt(&format!("{unit} {slot}: "), input).await? else {
                    return Ok(false);
                };
                if let Err(e) = session.set_entry(slot, label).await {
                    println!("{e}");
                }
            }
        }
    }
}

async fn repl(config: &CliConfig, session: &SessionHandle, input: &mut Input) -> Result<()> {
    println!("Type 'help' for commands");

    while let Some(line) = prompt("> ", input).await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        let outcome = match command {
            Command::Quit => return Ok(()),
            Command::Help => {
                print!("{}", commands::HELP);
                Ok(())
            }
            Command::Reset => {
                session.reset().await?;
                println!("Tournament reset");
                if !collect_roster(session, input).await? {
                    return Ok(());
                }
                Ok(())
            }
            command => execute(config, session, command).await,
        };

        if let Err(e) = outcome {
            println!("{e}");
        }
    }
    Ok(())
}

/// Commands that act on a running tournament.
async fn execute(config: &CliConfig, session: &SessionHandle, command: Command) -> Result<()> {
    let round_count = config.settings.mode.round_count();

    match command {
        Command::Show => current_round(session).await,
        Command::Next => {
            let index = session.advance().await?;
            show(session, index + 1, round_count).await
        }
        Command::Prev => {
            let index = session.retreat().await?;
            show(session, index + 1, round_count).await
        }
        Command::Score { slot, delta } => {
            let total = session.record_score(slot, delta).await?;
            println!("Slot {slot}: {total}");
            Ok(())
        }
        Command::Result {
            court,
            team1,
            team2,
        } => {
            let result = session.record_result(court, team1, team2).await?;
            println!(
                "Round {} court {}: {}-{}",
                result.round, result.court, result.team1_score, result.team2_score
            );
            Ok(())
        }
        Command::Rank => {
            print!("{}", render::ranking(&session.ranking().await?));
            Ok(())
        }
        Command::Audit => {
            print!("{}", render::audit(config.settings.mode.schedule()));
            Ok(())
        }
        Command::Save => {
            let Some(owner) = config.user else {
                bail!("Saving needs --user");
            };
            let handle = session
                .save(owner, config.name.as_str())
                .await
                .inspect_err(|e| warn!("Save failed: {e}"))?;
            println!("Saved as {handle}");
            Ok(())
        }
        Command::Quit | Command::Help | Command::Reset => Ok(()),
    }
}

async fn current_round(session: &SessionHandle) -> Result<()> {
    match session.snapshot().await? {
        TournamentPhase::Running(state) => {
            let navigator = state.navigator();
            print!(
                "{}",
                render::round(
                    navigator.round_number(),
                    navigator.round_count(),
                    &state.current_matches()
                )
            );
            Ok(())
        }
        TournamentPhase::Setup(_) => bail!("Tournament has not started"),
    }
}

async fn show(session: &SessionHandle, number: usize, round_count: usize) -> Result<()> {
    let courts = session.current_matches().await?;
    print!("{}", render::round(number, round_count, &courts));
    Ok(())
}

async fn prompt(text: &str, input: &mut Input) -> Result<Option<String>> {
    print!("{text}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}
