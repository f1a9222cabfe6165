use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The mixing pattern of an atom's valence orbitals.
///
/// The variants form a ladder from a pure `s` orbital up to `sp3d5`; each step
/// adds one hybrid orbital. The lobe layout produced for an atom is driven
/// entirely by this value (see [`crate::engine::orbitals`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Hybridization {
    /// Unhybridized; a single spherical `s` orbital.
    #[default]
    S,
    Sp,
    Sp2,
    Sp3,
    Sp3d,
    Sp3d2,
    Sp3d3,
    Sp3d4,
    Sp3d5,
}

impl Hybridization {
    /// Returns the hybridization one step up the ladder, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::S => Some(Self::Sp),
            Self::Sp => Some(Self::Sp2),
            Self::Sp2 => Some(Self::Sp3),
            Self::Sp3 => Some(Self::Sp3d),
            Self::Sp3d => Some(Self::Sp3d2),
            Self::Sp3d2 => Some(Self::Sp3d3),
            Self::Sp3d3 => Some(Self::Sp3d4),
            Self::Sp3d4 => Some(Self::Sp3d5),
            Self::Sp3d5 => None,
        }
    }

    /// Returns the hybridization one step down the ladder, if any.
    pub fn previous(self) -> Option<Self> {
        match self {
            Self::S => None,
            Self::Sp => Some(Self::S),
            Self::Sp2 => Some(Self::Sp),
            Self::Sp3 => Some(Self::Sp2),
            Self::Sp3d => Some(Self::Sp3),
            Self::Sp3d2 => Some(Self::Sp3d),
            Self::Sp3d3 => Some(Self::Sp3d2),
            Self::Sp3d4 => Some(Self::Sp3d3),
            Self::Sp3d5 => Some(Self::Sp3d4),
        }
    }

    /// Number of orbitals that take part in the mix (1 for `s`, 4 for `sp3`, ...).
    pub fn hybrid_orbital_count(self) -> usize {
        self as usize + 1
    }

    pub fn is_hybridized(self) -> bool {
        self != Self::S
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid hybridization string: '{0}'")]
pub struct ParseHybridizationError(pub String);

impl FromStr for Hybridization {
    type Err = ParseHybridizationError;

    /// Parses the solver's upper-case spelling (`"SP3D"`) as well as the
    /// conventional lower-case one (`"sp3d"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" => Ok(Self::S),
            "sp" => Ok(Self::Sp),
            "sp2" => Ok(Self::Sp2),
            "sp3" => Ok(Self::Sp3),
            "sp3d" => Ok(Self::Sp3d),
            "sp3d2" => Ok(Self::Sp3d2),
            "sp3d3" => Ok(Self::Sp3d3),
            "sp3d4" => Ok(Self::Sp3d4),
            "sp3d5" => Ok(Self::Sp3d5),
            _ => Err(ParseHybridizationError(s.to_string())),
        }
    }
}

impl fmt::Display for Hybridization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::S => "s",
                Self::Sp => "sp",
                Self::Sp2 => "sp2",
                Self::Sp3 => "sp3",
                Self::Sp3d => "sp3d",
                Self::Sp3d2 => "sp3d2",
                Self::Sp3d3 => "sp3d3",
                Self::Sp3d4 => "sp3d4",
                Self::Sp3d5 => "sp3d5",
            }
        )
    }
}

/// An atom of a molecule as seen by the geometry engine.
///
/// Atoms carry no position or rotation of their own: a given hybridization
/// always yields the same local lobe layout, and the world transform is
/// produced by the placement engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    /// Identifier from the source structure.
    pub id: u32,
    /// Element symbol (e.g. "N", "Cl").
    pub name: String,
    /// Atomic number, used as a tie-breaker and to scale the atom visually.
    pub proton_count: u32,
    /// Raw count of non-bonding electrons (two per lone pair).
    pub lone_electrons: u32,
    pub hybridization: Hybridization,
    /// Number of unhybridized p orbitals, used for pi-bond lobes.
    pub p_orbital_count: usize,
}

impl Atom {
    /// Creates an atom with no lone electrons and no p orbitals.
    pub fn new(name: &str, id: u32, proton_count: u32, hybridization: Hybridization) -> Self {
        Self {
            id,
            name: name.to_string(),
            proton_count,
            lone_electrons: 0,
            hybridization,
            p_orbital_count: 0,
        }
    }

    pub fn with_lone_electrons(mut self, lone_electrons: u32) -> Self {
        self.lone_electrons = lone_electrons;
        self
    }

    pub fn with_p_orbitals(mut self, count: usize) -> Self {
        self.p_orbital_count = count;
        self
    }

    pub fn lone_pairs(&self) -> u32 {
        self.lone_electrons / 2
    }
}
