use crate::config::Config;
use crate::error::{AppResult, Error};
use crate::teams::{Team, TeamMatch, TeamTable};
use std::io::{self, BufRead, Write};
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Config(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config, logging the failure before it is reported
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

/// Print the team menu and read a choice from `input`
pub fn select_team<R, W>(teams: &TeamTable, mut input: R, mut output: W) -> AppResult<Team>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "\nAvailable teams:\n")?;
    writeln!(output, "{}", teams.menu())?;
    writeln!(output, "\n  Or type a team name to search\n")?;
    write!(output, "Enter team number or name: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let choice = line.trim();

    let (team, matched) = teams
        .find_match(choice)
        .ok_or_else(|| Error::TeamNotFound(choice.to_string()))?;

    if matched == TeamMatch::Search {
        writeln!(output, "\nFound: {}", team.name)?;
    }

    Ok(team.clone())
}

/// Interactive team selection on stdin/stdout
pub fn prompt_team(teams: &TeamTable) -> AppResult<Team> {
    let stdin = io::stdin();
    select_team(teams, stdin.lock(), io::stdout())
}
