//! Load every piece of content and report problems

use anyhow::{Context, Result, bail};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use pack_content::ContentFactory;

use crate::dirs;

/// Load all content and report problems
#[derive(Parser)]
pub struct Validate {
    /// Content directory (defaults to $PACK_DATA_DIR or ./data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl Validate {
    pub fn execute(self) -> Result<()> {
        let factory = ContentFactory::new(dirs::data_dir(self.data_dir));
        println!(
            "{} {}",
            style("Validating").bold().cyan(),
            factory.data_dir().display()
        );

        let config = factory.load_config().context("config.toml")?;
        println!(
            "  {} config (max_strikes={}, seed={})",
            style("ok").green(),
            config.max_strikes,
            config.game_seed
        );
        let catalog = factory.load_catalog().context("catalog.ron")?;
        println!("  {} catalog", style("ok").green());

        let mut failures = 0usize;
        for name in factory.scenario_names()? {
            let checked = factory.load_scenario(&name).and_then(|scenario| {
                factory.load_map(&scenario.map)?;
                let world = scenario.build_world(&catalog)?;
                scenario.combat_specs(&world)?;
                Ok(scenario.combats.len())
            });
            match checked {
                Ok(combats) => println!("  {} {name} ({combats} combats)", style("ok").green()),
                Err(error) => {
                    failures += 1;
                    println!("  {} {name}: {error:#}", style("error").red().bold());
                }
            }
        }

        if failures > 0 {
            bail!("{failures} scenario(s) failed to load");
        }
        Ok(())
    }
}
