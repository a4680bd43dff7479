//! List the built-in components

use anyhow::Result;
use clap::Parser;
use console::style;

use pack_core::Component;

/// List the built-in components and their hook points
#[derive(Parser)]
pub struct Components {
    /// Print default-configured components as JSON (catalog-ready)
    #[arg(long)]
    json: bool,
}

impl Components {
    pub fn execute(self) -> Result<()> {
        let components = Component::defaults();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&components)?);
            return Ok(());
        }

        println!("{}", style("Components").bold().cyan());
        for component in &components {
            let hooks: Vec<&str> = component.hooks().iter_names().map(|(name, _)| name).collect();
            let hooks = if hooks.is_empty() {
                style("(marker)".to_owned()).dim()
            } else {
                style(hooks.join(" ").to_lowercase()).dim()
            };
            println!("  {:<24} {}", style(component.nid()).green(), hooks);
        }
        Ok(())
    }
}
