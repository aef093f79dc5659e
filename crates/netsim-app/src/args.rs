//! Command-line options.

use std::path::PathBuf;

use anyhow::{Result, bail};
use netsim_types::{DeviceType, Language, SimConfig};

pub const USAGE: &str = "\
usage: netsim [--config <path>] [--device router|switch] [--lang en|he] [--memory]

  --config <path>   simulator configuration (TOML); also read from NETSIM_CONFIG
  --device <type>   device to emulate, overrides the configuration
  --lang <code>     description language, overrides the configuration
  --memory          keep device state in memory only";

#[derive(Debug, Default, PartialEq)]
pub struct Options {
    pub config: Option<PathBuf>,
    pub device: Option<DeviceType>,
    pub language: Option<Language>,
    pub memory: bool,
    pub help: bool,
}

impl Options {
    /// Parse arguments, not including the program name.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = Options::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    options.config = Some(PathBuf::from(value(&arg, args.next())?));
                },
                "--device" | "-d" => {
                    let text = value(&arg, args.next())?;
                    options.device = Some(text.parse().map_err(anyhow::Error::msg)?);
                },
                "--lang" | "-l" => {
                    let text = value(&arg, args.next())?;
                    options.language = Some(text.parse().map_err(anyhow::Error::msg)?);
                },
                "--memory" => options.memory = true,
                "--help" | "-h" => options.help = true,
                other => bail!("unexpected argument: {other}\n\n{USAGE}"),
            }
        }
        Ok(options)
    }

    /// Command-line choices take precedence over the configuration file.
    pub fn apply(&self, config: &mut SimConfig) {
        if let Some(device) = self.device {
            config.device = device;
        }
        if let Some(language) = self.language {
            config.language = language;
        }
    }
}

fn value(flag: &str, next: Option<String>) -> Result<String> {
    match next {
        Some(v) if !v.starts_with("--") => Ok(v),
        _ => bail!("{flag} needs a value\n\n{USAGE}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Options> {
        Options::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments() {
        assert_eq!(parse(&[]).unwrap(), Options::default());
    }

    #[test]
    fn all_options() {
        let options = parse(&[
            "--config", "lab.toml", "--device", "switch", "--lang", "he", "--memory",
        ])
        .unwrap();
        assert_eq!(options.config, Some(PathBuf::from("lab.toml")));
        assert_eq!(options.device, Some(DeviceType::Switch));
        assert_eq!(options.language, Some(Language::He));
        assert!(options.memory);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["--device", "firewall"]).is_err());
        assert!(parse(&["--lang"]).is_err());
        assert!(parse(&["--config", "--memory"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
    }

    #[test]
    fn overrides_apply_to_config() {
        let options = parse(&["-d", "switch"]).unwrap();
        let mut config = SimConfig::default();
        options.apply(&mut config);
        assert_eq!(config.device, DeviceType::Switch);
        assert_eq!(config.language, Language::En);
    }
}
