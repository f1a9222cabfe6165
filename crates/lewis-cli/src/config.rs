use crate::cli::{CentralizeFlag, LayoutArgs};
use crate::error::{CliError, Result};
use lewisviz::engine::config as core_config;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialPlacementSection {
    #[serde(rename = "s-orbital-shift")]
    s_orbital_shift: Option<f64>,
    #[serde(rename = "sp-orbital-shift")]
    sp_orbital_shift: Option<f64>,
    centralize: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialScaleSection {
    #[serde(rename = "s-orbital")]
    s_orbital: Option<f64>,
    #[serde(rename = "sp-orbital")]
    sp_orbital: Option<f64>,
    #[serde(rename = "p-orbital")]
    p_orbital: Option<f64>,
}

/// Layout settings as read from a TOML file; every field is optional.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct PartialLayoutConfig {
    placement: Option<PartialPlacementSection>,
    scale: Option<PartialScaleSection>,
}

impl PartialLayoutConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Combines file values, `--set` overrides and explicit flags, in
    /// increasing priority, on top of the library defaults.
    pub fn merge_with_cli(mut self, args: &LayoutArgs) -> Result<core_config::LayoutConfig> {
        self.apply_set_values(&args.set_values)?;

        let placement = self.placement.take().unwrap_or_default();
        let scale = self.scale.take().unwrap_or_default();

        let mut builder = core_config::LayoutConfigBuilder::new();
        if let Some(v) = placement.s_orbital_shift {
            builder = builder.s_orbital_shift(v);
        }
        if let Some(v) = placement.sp_orbital_shift {
            builder = builder.sp_orbital_shift(v);
        }
        if let Some(v) = scale.s_orbital {
            builder = builder.s_orbital_scale(v);
        }
        if let Some(v) = scale.sp_orbital {
            builder = builder.sp_orbital_scale(v);
        }
        if let Some(v) = scale.p_orbital {
            builder = builder.p_orbital_scale(v);
        }
        builder = Self::merge_centralize(builder, args.centralize, placement.centralize);

        Ok(builder.build()?)
    }

    fn merge_centralize(
        builder: core_config::LayoutConfigBuilder,
        cli_flags: CentralizeFlag,
        file_val: Option<bool>,
    ) -> core_config::LayoutConfigBuilder {
        match cli_flags.value().or(file_val) {
            Some(centralize) => builder.centralize(centralize),
            None => builder,
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();
            let value_str = value_str.trim();

            let parse_float = || -> Result<f64> {
                value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })
            };

            match key {
                "placement.s-orbital-shift" => {
                    self.placement
                        .get_or_insert_with(Default::default)
                        .s_orbital_shift = Some(parse_float()?);
                }
                "placement.sp-orbital-shift" => {
                    self.placement
                        .get_or_insert_with(Default::default)
                        .sp_orbital_shift = Some(parse_float()?);
                }
                "placement.centralize" => {
                    self.placement
                        .get_or_insert_with(Default::default)
                        .centralize = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid boolean value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                "scale.s-orbital" => {
                    self.scale.get_or_insert_with(Default::default).s_orbital =
                        Some(parse_float()?);
                }
                "scale.sp-orbital" => {
                    self.scale.get_or_insert_with(Default::default).sp_orbital =
                        Some(parse_float()?);
                }
                "scale.p-orbital" => {
                    self.scale.get_or_insert_with(Default::default).p_orbital =
                        Some(parse_float()?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
