use phf::{Map, phf_map};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Atomic number and Pauling electronegativity for the elements a Lewis
/// structure is likely to contain. Noble gases without a Pauling value carry
/// `None`.
static BUILTIN_ELEMENTS: Map<&'static str, (u32, Option<f64>)> = phf_map! {
    "H" => (1, Some(2.20)), "He" => (2, None),
    "Li" => (3, Some(0.98)), "Be" => (4, Some(1.57)), "B" => (5, Some(2.04)),
    "C" => (6, Some(2.55)), "N" => (7, Some(3.04)), "O" => (8, Some(3.44)),
    "F" => (9, Some(3.98)), "Ne" => (10, None),
    "Na" => (11, Some(0.93)), "Mg" => (12, Some(1.31)), "Al" => (13, Some(1.61)),
    "Si" => (14, Some(1.90)), "P" => (15, Some(2.19)), "S" => (16, Some(2.58)),
    "Cl" => (17, Some(3.16)), "Ar" => (18, None),
    "K" => (19, Some(0.82)), "Ca" => (20, Some(1.00)), "Sc" => (21, Some(1.36)),
    "Ti" => (22, Some(1.54)), "V" => (23, Some(1.63)), "Cr" => (24, Some(1.66)),
    "Mn" => (25, Some(1.55)), "Fe" => (26, Some(1.83)), "Co" => (27, Some(1.88)),
    "Ni" => (28, Some(1.91)), "Cu" => (29, Some(1.90)), "Zn" => (30, Some(1.65)),
    "Ga" => (31, Some(1.81)), "Ge" => (32, Some(2.01)), "As" => (33, Some(2.18)),
    "Se" => (34, Some(2.55)), "Br" => (35, Some(2.96)), "Kr" => (36, Some(3.00)),
    "Rb" => (37, Some(0.82)), "Sr" => (38, Some(0.95)), "Y" => (39, Some(1.22)),
    "Zr" => (40, Some(1.33)), "Nb" => (41, Some(1.6)), "Mo" => (42, Some(2.16)),
    "Tc" => (43, Some(1.9)), "Ru" => (44, Some(2.2)), "Rh" => (45, Some(2.28)),
    "Pd" => (46, Some(2.20)), "Ag" => (47, Some(1.93)), "Cd" => (48, Some(1.69)),
    "In" => (49, Some(1.78)), "Sn" => (50, Some(1.96)), "Sb" => (51, Some(2.05)),
    "Te" => (52, Some(2.1)), "I" => (53, Some(2.66)), "Xe" => (54, Some(2.6)),
};

/// Noble-gas cores closing each period.
const NOBLE_GAS_CORES: [u32; 7] = [0, 2, 10, 18, 36, 54, 86];

/// Electrons in the outermost `s` and `p` subshells of a neutral atom.
///
/// Transition and inner-transition metals report their two outer `s`
/// electrons; ground-state exceptions such as chromium are not modelled.
pub fn valence_electrons(atomic_number: u32) -> u32 {
    let core = NOBLE_GAS_CORES
        .iter()
        .rev()
        .copied()
        .find(|&core| core < atomic_number)
        .unwrap_or(0);
    let offset = atomic_number - core;
    match core {
        0 | 2 | 10 => offset,
        18 | 36 if offset > 12 => offset - 10,
        54 | 86 if offset > 26 => offset - 24,
        _ => offset.min(2),
    }
}

/// Per-element data needed to build and draw a Lewis structure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementData {
    pub atomic_number: u32,
    /// Pauling electronegativity, if the element has one.
    pub electronegativity: Option<f64>,
}

impl ElementData {
    pub fn valence_electrons(&self) -> u32 {
        valence_electrons(self.atomic_number)
    }
}

#[derive(Debug, Error)]
pub enum ElementTableError {
    #[error("Failed to read element table file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse element table CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Row {row}: expected at least two columns (atomic number, symbol)")]
    MissingColumn { row: usize },
    #[error("Row {row}: invalid atomic number '{value}'")]
    InvalidAtomicNumber { row: usize, value: String },
    #[error("Row {row}: invalid electronegativity '{value}'")]
    InvalidElectronegativity { row: usize, value: String },
}

/// Lookup from element symbol to [`ElementData`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementTable {
    elements: HashMap<String, ElementData>,
}

impl ElementTable {
    /// The compiled-in table covering hydrogen through xenon.
    pub fn builtin() -> Self {
        Self {
            elements: BUILTIN_ELEMENTS
                .entries()
                .map(|(symbol, &(atomic_number, electronegativity))| {
                    let data = ElementData {
                        atomic_number,
                        electronegativity,
                    };
                    (symbol.to_string(), data)
                })
                .collect(),
        }
    }

    /// Loads a table from a CSV file.
    ///
    /// The first row is a header. Column 0 holds the atomic number and column
    /// 1 the symbol. A column headed `Electronegativity` (any case) is read if
    /// present, where a blank cell means the element has none; other columns
    /// are ignored. Spaces inside the symbol are removed.
    pub fn load(path: &Path) -> Result<Self, ElementTableError> {
        let file = std::fs::File::open(path).map_err(|e| ElementTableError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, ElementTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let electronegativity_column = csv_reader
            .headers()?
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case("electronegativity"));

        let mut elements = HashMap::new();
        for (index, result) in csv_reader.records().enumerate() {
            let record = result?;
            // Header is row 1.
            let row = index + 2;
            let (Some(number), Some(symbol)) = (record.get(0), record.get(1)) else {
                return Err(ElementTableError::MissingColumn { row });
            };
            let number = number.trim();
            let atomic_number =
                number
                    .parse::<u32>()
                    .map_err(|_| ElementTableError::InvalidAtomicNumber {
                        row,
                        value: number.to_string(),
                    })?;
            let electronegativity = match electronegativity_column
                .and_then(|column| record.get(column))
                .map(str::trim)
            {
                None | Some("") => None,
                Some(value) => Some(value.parse::<f64>().map_err(|_| {
                    ElementTableError::InvalidElectronegativity {
                        row,
                        value: value.to_string(),
                    }
                })?),
            };
            elements.insert(
                symbol.replace(' ', ""),
                ElementData {
                    atomic_number,
                    electronegativity,
                },
            );
        }
        Ok(Self { elements })
    }

    pub fn get(&self, symbol: &str) -> Option<ElementData> {
        self.elements.get(symbol).copied()
    }

    pub fn proton_count(&self, symbol: &str) -> Option<u32> {
        self.elements.get(symbol).map(|data| data.atomic_number)
    }

    pub fn electronegativity(&self, symbol: &str) -> Option<f64> {
        self.elements.get(symbol)?.electronegativity
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn builtin_table_covers_first_five_periods() {
        let table = ElementTable::builtin();
        assert_eq!(table.len(), 54);
        assert_eq!(table.proton_count("H"), Some(1));
        assert_eq!(table.proton_count("C"), Some(6));
        assert_eq!(table.proton_count("Cl"), Some(17));
        assert_eq!(table.proton_count("Xe"), Some(54));
        assert_eq!(table.proton_count("Cs"), None);
        assert_eq!(table.proton_count("cl"), None);
        assert_eq!(table.electronegativity("F"), Some(3.98));
        assert_eq!(table.electronegativity("Ne"), None);
    }

    #[test]
    fn valence_electrons_count_outer_s_and_p() {
        let cases = [
            ("H", 1),
            ("He", 2),
            ("C", 4),
            ("O", 6),
            ("Ne", 8),
            ("P", 5),
            ("Cl", 7),
            ("Fe", 2),
            ("Zn", 2),
            ("Se", 6),
            ("Sr", 2),
            ("I", 7),
            ("Xe", 8),
        ];
        let table = ElementTable::builtin();
        for (symbol, expected) in cases {
            assert_eq!(table.get(symbol).unwrap().valence_electrons(), expected, "{symbol}");
        }
        assert_eq!(valence_electrons(56), 2);
        assert_eq!(valence_electrons(64), 2);
        assert_eq!(valence_electrons(82), 4);
        assert_eq!(valence_electrons(86), 8);
    }

    #[test]
    fn from_reader_parses_atomic_number_and_symbol_columns() {
        let csv = "AtomicNumber,Symbol,Name\n1, H,Hydrogen\n8,O ,Oxygen\n17,C l,Chlorine\n";
        let table = ElementTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.proton_count("H"), Some(1));
        assert_eq!(table.proton_count("O"), Some(8));
        assert_eq!(table.proton_count("Cl"), Some(17));
        assert_eq!(table.electronegativity("O"), None);
    }

    #[test]
    fn from_reader_reads_the_electronegativity_column_by_header() {
        let csv = "AtomicNumber,Symbol,Name,Electronegativity\n\
                   2,He,Helium,\n\
                   6,C,Carbon, 2.55\n\
                   8,O,Oxygen,3.44\n";
        let table = ElementTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.electronegativity("He"), None);
        assert_eq!(table.electronegativity("C"), Some(2.55));
        assert_eq!(
            table.get("O"),
            Some(ElementData {
                atomic_number: 8,
                electronegativity: Some(3.44)
            })
        );
    }

    #[test]
    fn from_reader_rejects_bad_electronegativity() {
        let csv = "AtomicNumber,Symbol,electronegativity\n1,H,high\n";
        let result = ElementTable::from_reader(csv.as_bytes());
        assert!(matches!(
            result,
            Err(ElementTableError::InvalidElectronegativity { row: 2, ref value }) if value == "high"
        ));
    }

    #[test]
    fn from_reader_rejects_bad_atomic_number() {
        let csv = "AtomicNumber,Symbol\n1,H\nsix,C\n";
        let result = ElementTable::from_reader(csv.as_bytes());
        assert!(matches!(
            result,
            Err(ElementTableError::InvalidAtomicNumber { row: 3, ref value }) if value == "six"
        ));
    }

    #[test]
    fn from_reader_rejects_short_rows() {
        let csv = "AtomicNumber,Symbol\n1\n";
        let result = ElementTable::from_reader(csv.as_bytes());
        assert!(matches!(
            result,
            Err(ElementTableError::MissingColumn { row: 2 })
        ));
    }

    #[test]
    fn header_only_file_gives_empty_table() {
        let table = ElementTable::from_reader("AtomicNumber,Symbol\n".as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("elements.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "AtomicNumber,Element").unwrap();
        writeln!(file, "7,N").unwrap();
        writeln!(file, "9,F").unwrap();

        let table = ElementTable::load(&path).unwrap();
        assert_eq!(table.proton_count("N"), Some(7));
        assert_eq!(table.proton_count("F"), Some(9));
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = ElementTable::load(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(ElementTableError::Io { .. })));
    }
}
