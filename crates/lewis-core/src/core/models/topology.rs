use super::ids::AtomId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondType {
    #[default]
    Sigma,
    Pi,
}

#[derive(Debug, Error)]
#[error("Invalid bond type string")]
pub struct ParseBondTypeError;

impl FromStr for BondType {
    type Err = ParseBondTypeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s" | "sigma" => Ok(Self::Sigma),
            "p" | "pi" => Ok(Self::Pi),
            _ => Err(ParseBondTypeError),
        }
    }
}

impl fmt::Display for BondType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Sigma => "SIGMA",
                Self::Pi => "PI",
            }
        )
    }
}

/// One entry of an atom's adjacency list: the atom on the other end and the
/// kind of bond. The owning atom is implied by the list the entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub other: AtomId,
    pub bond_type: BondType,
}

impl Bond {
    pub fn new(other: AtomId, bond_type: BondType) -> Self {
        Self { other, bond_type }
    }

    pub fn points_to(&self, atom_id: AtomId) -> bool {
        self.other == atom_id
    }
}
