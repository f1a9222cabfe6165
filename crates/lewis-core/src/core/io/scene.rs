use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Scene serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Element symbol and source identifier of an atom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomLabel {
    pub name: String,
    pub id: u32,
}

/// A lobe with its orientation relative to the atom and in world space.
///
/// Quaternions are stored as `[i, j, k, w]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLobe {
    pub orbital_type: String,
    pub local_orientation: [f64; 4],
    pub world_orientation: [f64; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneAtom {
    pub name: String,
    pub id: u32,
    pub proton_count: u32,
    pub position: [f64; 3],
    pub rotation: [f64; 4],
    pub lobes: Vec<SceneLobe>,
}

/// Renderer-independent description of a laid out molecule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub geometry: String,
    pub central_atom: AtomLabel,
    pub atoms: Vec<SceneAtom>,
}

/// Pretty-printed JSON persistence for [`Scene`].
pub struct SceneFile;

impl SceneFile {
    pub fn write_to(scene: &Scene, writer: &mut impl Write) -> Result<(), SceneError> {
        serde_json::to_writer_pretty(&mut *writer, scene)?;
        writeln!(writer)?;
        Ok(())
    }

    pub fn write_to_path<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<(), SceneError> {
        let mut writer = BufWriter::new(File::create(path)?);
        Self::write_to(scene, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
