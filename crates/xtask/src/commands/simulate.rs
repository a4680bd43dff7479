//! Resolve a scenario from the content directory
//!
//! Loads config, catalog, map and scenario, runs every scripted combat in
//! order and prints the playback each one produced.

use anyhow::{Context, Result, bail};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use pack_content::ContentFactory;
use pack_core::{
    ActionLog, Checkpoint, CombatEngine, CombatReport, Env, LiteralEvaluator, PcgRng, Playback,
    WorldState,
};

use crate::dirs;

/// Resolve every combat of a scenario
#[derive(Parser)]
pub struct Simulate {
    /// Scenario name (file stem under `scenarios/`)
    #[arg(value_name = "SCENARIO")]
    scenario: String,

    /// Content directory (defaults to $PACK_DATA_DIR or ./data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Override the configured game seed
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Rewind the whole log and replay it, failing if the digest differs
    #[arg(long)]
    replay_check: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Playback and final unit state
    Summary,
    /// Full JSON output
    Json,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let factory = ContentFactory::new(dirs::data_dir(self.data_dir));
        let mut config = factory.load_config().context("Failed to load config")?;
        if let Some(seed) = self.seed {
            config = config.with_game_seed(seed);
        }
        let catalog = factory.load_catalog().context("Failed to load catalog")?;
        let scenario = factory
            .load_scenario(&self.scenario)
            .with_context(|| format!("Failed to load scenario '{}'", self.scenario))?;
        let map = factory
            .load_map(&scenario.map)
            .with_context(|| format!("Failed to load map '{}'", scenario.map))?;

        let env = Env::with_all(&map, &catalog, &LiteralEvaluator, &PcgRng);
        let mut world = scenario.build_world(&catalog)?;
        let specs = scenario.combat_specs(&world)?;
        let initial = world.clone();

        let mut engine = CombatEngine::new(config);
        let mut log = ActionLog::new();
        let mut reports = Vec::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            let report = engine
                .resolve(&mut world, &mut log, &env, spec)
                .with_context(|| format!("Combat #{index} was rejected"))?;
            reports.push(report);
        }
        let root = log.actions_root();

        if self.replay_check {
            log.rewind_to(&mut world, Checkpoint(0));
            if world != initial {
                bail!("Rewinding the log did not restore the initial world");
            }
            let mut replay = CombatEngine::new(engine.config().clone());
            for spec in &specs {
                replay.resolve(&mut world, &mut log, &env, spec)?;
            }
            if log.actions_root() != root {
                bail!(
                    "Replay diverged: {} != {}",
                    hex::encode(log.actions_root()),
                    hex::encode(root)
                );
            }
        }

        match self.format {
            OutputFormat::Summary => print_summary(&self.scenario, &reports, &mut world, &root),
            OutputFormat::Json => print_json(&reports, &mut world, &root)?,
        }

        if self.replay_check {
            println!("\n{}", style("Replay matched").green().bold());
        }

        Ok(())
    }
}

fn print_summary(name: &str, reports: &[CombatReport], world: &mut WorldState, root: &[u8; 32]) {
    println!("{}", style(format!("Scenario: {name}")).bold().cyan());

    for (index, report) in reports.iter().enumerate() {
        println!(
            "\n{} {} strikes, {} actions{}",
            style(format!("Combat #{index}")).bold(),
            report.strikes,
            report.committed,
            if report.ended_early {
                style(" (ended early)").yellow().to_string()
            } else {
                String::new()
            }
        );
        for entry in report.playback.iter() {
            println!("  {}", format_playback(entry));
        }
    }

    println!("\n{}", style("Units").bold());
    for unit in world.units() {
        let position = unit
            .position
            .map(|p| p.to_string())
            .unwrap_or_else(|| "off board".to_owned());
        let skills: Vec<&str> = unit.skills.iter().map(|skill| skill.nid.as_str()).collect();
        println!(
            "  {} {:<10} {:>3}/{:<3} at {:<10} [{}]",
            style(unit.id).dim(),
            unit.nid,
            unit.hp,
            unit.max_hp,
            position,
            skills.join(", ")
        );
    }

    let events = world.take_events();
    if !events.is_empty() {
        println!("\n{}", style("Requested events").bold());
        for event in events {
            println!("  {} for {}", style(&event.nid).magenta(), event.unit);
        }
    }

    println!("\nActions root: {}", style(hex::encode(root)).dim());
}

fn print_json(reports: &[CombatReport], world: &mut WorldState, root: &[u8; 32]) -> Result<()> {
    let combats: Vec<_> = reports
        .iter()
        .map(|report| {
            serde_json::json!({
                "session": report.session.0,
                "checkpoint": report.checkpoint.0,
                "committed": report.committed,
                "strikes": report.strikes,
                "ended_early": report.ended_early,
                "playback": report.playback,
            })
        })
        .collect();
    let units: Vec<_> = world.units().collect();
    let output = serde_json::json!({
        "combats": combats,
        "units": units,
        "events": world.take_events(),
        "actions_root": hex::encode(root),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn format_playback(entry: &Playback) -> String {
    format!(
        "{:<16} {} -> {} {}",
        style(entry.nid()).green(),
        entry.attacker,
        entry.defender,
        style(format!("{:?}", entry.kind)).dim()
    )
}
