use anyhow::{Context, Result};
use qtpack_core::rules::DomainRules;

/// Print the built-in domain rules, for bootstrapping a rules file.
pub fn default_rules_command(yaml: bool) -> Result<()> {
    let rules = DomainRules::default();
    let serialized = if yaml {
        serde_yaml::to_string(&rules).context("Failed to serialize rules to YAML")?
    } else {
        serde_json::to_string_pretty(&rules).context("Failed to serialize rules to JSON")?
    };
    println!("{}", serialized);
    Ok(())
}
