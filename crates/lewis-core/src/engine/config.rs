use thiserror::Error;

pub const DEFAULT_S_ORBITAL_SHIFT: f64 = 2.0;
pub const DEFAULT_SP_ORBITAL_SHIFT: f64 = 3.0;
pub const DEFAULT_S_ORBITAL_SCALE: f64 = 0.25;
pub const DEFAULT_SP_ORBITAL_SCALE: f64 = 1.0;
pub const DEFAULT_P_ORBITAL_SCALE: f64 = 1.0;
pub const DEFAULT_CENTRALIZE: bool = true;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Parameter '{name}' must be a finite positive number (got {value})")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Distances used when placing atoms around the central atom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementConfig {
    /// Shift per proton for an unhybridized (`s`) atom.
    pub s_orbital_shift: f64,
    /// Fixed shift for a hybridized atom, chosen so that bonding lobes overlap.
    pub sp_orbital_shift: f64,
    /// Move a diatomic molecule so that the bond midpoint sits at the origin.
    pub centralize: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            s_orbital_shift: DEFAULT_S_ORBITAL_SHIFT,
            sp_orbital_shift: DEFAULT_SP_ORBITAL_SHIFT,
            centralize: DEFAULT_CENTRALIZE,
        }
    }
}

/// Uniform scale applied to each lobe mesh, per lobe type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalScales {
    pub s: f64,
    pub sp: f64,
    pub p: f64,
}

impl Default for OrbitalScales {
    fn default() -> Self {
        Self {
            s: DEFAULT_S_ORBITAL_SCALE,
            sp: DEFAULT_SP_ORBITAL_SCALE,
            p: DEFAULT_P_ORBITAL_SCALE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutConfig {
    pub placement: PlacementConfig,
    pub scales: OrbitalScales,
}

#[derive(Default)]
pub struct LayoutConfigBuilder {
    s_orbital_shift: Option<f64>,
    sp_orbital_shift: Option<f64>,
    centralize: Option<bool>,
    s_orbital_scale: Option<f64>,
    sp_orbital_scale: Option<f64>,
    p_orbital_scale: Option<f64>,
}

impl LayoutConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn s_orbital_shift(mut self, shift: f64) -> Self {
        self.s_orbital_shift = Some(shift);
        self
    }
    pub fn sp_orbital_shift(mut self, shift: f64) -> Self {
        self.sp_orbital_shift = Some(shift);
        self
    }
    pub fn centralize(mut self, centralize: bool) -> Self {
        self.centralize = Some(centralize);
        self
    }
    pub fn s_orbital_scale(mut self, scale: f64) -> Self {
        self.s_orbital_scale = Some(scale);
        self
    }
    pub fn sp_orbital_scale(mut self, scale: f64) -> Self {
        self.sp_orbital_scale = Some(scale);
        self
    }
    pub fn p_orbital_scale(mut self, scale: f64) -> Self {
        self.p_orbital_scale = Some(scale);
        self
    }

    /// Builds the configuration, filling unset values with the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] if any distance or scale is
    /// zero, negative, or not finite.
    pub fn build(self) -> Result<LayoutConfig, ConfigError> {
        let placement = PlacementConfig {
            s_orbital_shift: positive(
                "s_orbital_shift",
                self.s_orbital_shift.unwrap_or(DEFAULT_S_ORBITAL_SHIFT),
            )?,
            sp_orbital_shift: positive(
                "sp_orbital_shift",
                self.sp_orbital_shift.unwrap_or(DEFAULT_SP_ORBITAL_SHIFT),
            )?,
            centralize: self.centralize.unwrap_or(DEFAULT_CENTRALIZE),
        };
        let scales = OrbitalScales {
            s: positive(
                "s_orbital_scale",
                self.s_orbital_scale.unwrap_or(DEFAULT_S_ORBITAL_SCALE),
            )?,
            sp: positive(
                "sp_orbital_scale",
                self.sp_orbital_scale.unwrap_or(DEFAULT_SP_ORBITAL_SCALE),
            )?,
            p: positive(
                "p_orbital_scale",
                self.p_orbital_scale.unwrap_or(DEFAULT_P_ORBITAL_SCALE),
            )?,
        };
        Ok(LayoutConfig { placement, scales })
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_without_overrides_matches_default() {
        let config = LayoutConfigBuilder::new().build().unwrap();
        assert_eq!(config, LayoutConfig::default());
        assert_eq!(config.placement.s_orbital_shift, 2.0);
        assert_eq!(config.placement.sp_orbital_shift, 3.0);
        assert!(config.placement.centralize);
        assert_eq!(config.scales.s, 0.25);
    }

    #[test]
    fn builder_applies_overrides() {
        let config = LayoutConfigBuilder::new()
            .s_orbital_shift(1.0)
            .sp_orbital_shift(2.0)
            .centralize(false)
            .s_orbital_scale(1.0)
            .sp_orbital_scale(0.5)
            .p_orbital_scale(0.75)
            .build()
            .unwrap();

        assert_eq!(
            config.placement,
            PlacementConfig {
                s_orbital_shift: 1.0,
                sp_orbital_shift: 2.0,
                centralize: false,
            }
        );
        assert_eq!(
            config.scales,
            OrbitalScales {
                s: 1.0,
                sp: 0.5,
                p: 0.75,
            }
        );
    }

    #[test]
    fn builder_rejects_non_positive_values() {
        let err = LayoutConfigBuilder::new()
            .sp_orbital_shift(0.0)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidParameter {
                name: "sp_orbital_shift",
                value: 0.0
            }
        );

        let err = LayoutConfigBuilder::new()
            .p_orbital_scale(-1.0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter {
                name: "p_orbital_scale",
                ..
            }
        ));
    }

    #[test]
    fn builder_rejects_non_finite_values() {
        assert!(
            LayoutConfigBuilder::new()
                .s_orbital_shift(f64::NAN)
                .build()
                .is_err()
        );
        assert!(
            LayoutConfigBuilder::new()
                .s_orbital_scale(f64::INFINITY)
                .build()
                .is_err()
        );
    }
}
