//! Implementation of the `execgate policy` command.

use execgate::config::GateConfig;
use execgate::error::Result;
use execgate::exit_codes;
use std::path::Path;

/// Execute the `execgate policy` command.
pub fn cmd_policy(config: &GateConfig, source: Option<&Path>) -> Result<i32> {
    print!("{}", render_policy(config, source)?);
    Ok(exit_codes::SUCCESS)
}

fn render_policy(config: &GateConfig, source: Option<&Path>) -> Result<String> {
    let header = match source {
        Some(path) => format!("# policy loaded from {}\n", path.display()),
        None => "# built-in default policy\n".to_string(),
    };
    Ok(format!("{}{}", header, config.to_yaml()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_policy_round_trips() {
        let text = render_policy(&GateConfig::default(), None).unwrap();
        assert!(text.starts_with("# built-in default policy\n"));
        assert_eq!(GateConfig::from_yaml(&text).unwrap(), GateConfig::default());
    }

    #[test]
    fn test_header_names_source() {
        let path = PathBuf::from("/srv/agents/execgate.yaml");
        let text = render_policy(&GateConfig::default(), Some(&path)).unwrap();
        assert!(text.starts_with("# policy loaded from /srv/agents/execgate.yaml\n"));
        assert!(text.contains("max_timeout: 300"));
    }
}
