use clap::Parser;
use nfl_fantasy::adapters::storage::parse_players_csv;
use nfl_fantasy::config::cli::{CliConfig, Command};
use nfl_fantasy::core::points::SchemeKind;
use nfl_fantasy::core::research::{PlayersQuery, StatType, PLAYERS_URL};
use nfl_fantasy::core::Storage;
use nfl_fantasy::utils::error::ErrorSeverity;
use nfl_fantasy::utils::{logger, validation::Validate};
use nfl_fantasy::{
    HttpFetcher, LeagueConfig, LocalStorage, Result, Roster, Scorecard, ScoringSchema, SnakeDraft,
};
use std::path::Path;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting nfl-fantasy");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(config.command).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(command: Command) -> Result<()> {
    let stat_type = command.stat_type();

    match command {
        Command::Scoring {
            provider,
            file,
            section,
        } => {
            let schema = match &file {
                Some(path) => ScoringSchema::from_file(path)?,
                None => ScoringSchema::bundled(provider)?,
            };
            let entries = match &section {
                Some(name) => schema.section(name)?,
                None => schema.series().iter().collect(),
            };

            println!("{:<6} {:<20} {:<36} VALUE", "SECTION", "CATEGORY", "STAT");
            for entry in entries {
                println!(
                    "{:<6} {:<20} {:<36} {}",
                    entry.section, entry.category, entry.stat, entry.value
                );
            }
        }

        Command::Points {
            offense,
            kickers,
            defensest,
            scheme,
            stats,
        } => {
            let scorecard = Scorecard::with_overrides(
                offense.as_deref(),
                kickers.as_deref(),
                defensest.as_deref(),
            )?;

            if stats.is_empty() {
                for scheme in scorecard.schemes() {
                    println!("[{}]", scheme.kind().name());
                    for (category, stat, points) in scheme.series() {
                        println!("{:<24} {:<28} {:>8.2}", category, stat, points);
                    }
                    println!();
                }
            } else {
                let kind: SchemeKind = scheme.into();
                let scheme = scorecard
                    .schemes()
                    .into_iter()
                    .find(|s| s.kind() == kind)
                    .unwrap_or(scorecard.offense());
                let line: Vec<(&str, &str, f64)> = stats
                    .iter()
                    .map(|(category, stat, value)| (category.as_str(), stat.as_str(), *value))
                    .collect();

                let points = scheme.score(&line)?;
                println!("{:.2}", points);
            }
        }

        Command::Roster { config, players } => {
            let league = load_league(&config)?;
            let players = parse_players_csv(&std::fs::read(&players)?)?;

            let roster = Roster::new(league.positions()?, &players)?;
            let unplaced = players.iter().filter(|p| !roster.contains(p)).count();
            if unplaced > 0 {
                tracing::warn!("{} players did not fit on the roster", unplaced);
            }

            println!("{} ({})", league.league.name, league.league.provider);
            print!("{}", roster);
        }

        Command::Draft {
            config,
            players,
            output,
        } => {
            let league = load_league(&config)?;
            let pool = parse_players_csv(&std::fs::read(&players)?)?;
            tracing::info!("Loaded {} ranked players", pool.len());

            let positions = league.positions()?;
            let rosters = league
                .league
                .teams
                .iter()
                .map(|_| Roster::new(positions.clone(), &[]))
                .collect::<Result<Vec<_>>>()?;

            let mut draft = SnakeDraft::new(rosters, league.rounds()?)?;
            let picks = draft.draft_best_available(&pool)?;
            tracing::info!(
                "Made {} of {} picks across {} rounds",
                picks.len(),
                draft.volume(),
                draft.nrounds()
            );

            print!("{}", draft);

            let storage = LocalStorage::new(league.output.path.clone());
            storage
                .write_file(&output, draft.to_csv(&league.league.teams)?.as_bytes())
                .await?;

            let output_path = Path::new(storage.base_path()).join(&output);
            tracing::info!("📁 Draft results saved to: {}", output_path.display());
            println!("📁 Draft results saved to: {}", output_path.display());
        }

        Command::Research {
            config,
            position,
            season,
            week,
            output,
        } => {
            let league = match &config {
                Some(path) => Some(load_league(path)?),
                None => None,
            };
            let (url, timeout, output_dir) = match &league {
                Some(league) => (
                    league.research.url.clone(),
                    league.research.timeout_seconds,
                    league.output.path.clone(),
                ),
                None => (PLAYERS_URL.to_string(), 30, "./output".to_string()),
            };

            let mut query = PlayersQuery::new().with_url(url);
            query.set_position(position);
            if let Some(season) = season {
                query.set_stat_season(season);
            }
            query.set_stat_type(stat_type);
            if stat_type == StatType::WeekStats {
                query.set_stat_week(week)?;
            }

            tracing::info!(
                "Researching position {} for {} ({})",
                query.position().code(),
                query.stat_season(),
                query.stat_type().as_str()
            );

            let fetcher = HttpFetcher::new(timeout)?;
            let table = query.fetch(&fetcher).await?;

            let storage = LocalStorage::new(output_dir);
            storage.write_file(&output, table.to_csv()?.as_bytes()).await?;

            let output_path = Path::new(storage.base_path()).join(&output);
            tracing::info!("✅ Saved {} players", table.lines.len());
            println!("📁 Player stats saved to: {}", output_path.display());
        }
    }

    Ok(())
}

fn load_league(path: &Path) -> Result<LeagueConfig> {
    tracing::info!("📁 Loading league from: {}", path.display());
    let league = LeagueConfig::from_file(path)?;
    league.validate()?;
    tracing::debug!(
        "League '{}' with {} teams",
        league.league.name,
        league.league.teams.len()
    );
    Ok(league)
}
