use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use minefield_core::{BestTimeStore, BestTimes};

/// Keeps best times as a JSON object in a single file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BestTimeStore for JsonFileStore {
    type Error = anyhow::Error;

    fn load(&self) -> Result<BestTimes> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("invalid best times in {}", self.path.display())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BestTimes::default()),
            Err(err) => {
                Err(err).with_context(|| format!("could not read {}", self.path.display()))
            }
        }
    }

    fn save(&mut self, times: &BestTimes) -> Result<()> {
        let json = serde_json::to_string(times)?;
        fs::write(&self.path, json)
            .with_context(|| format!("could not write {}", self.path.display()))?;
        log::debug!("Saved best times to {}", self.path.display());
        Ok(())
    }
}
