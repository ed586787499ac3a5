use anyhow::Result;
use std::fs;
use std::path::PathBuf;

pub struct AppPaths;

impl AppPaths {
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot determine data directory"))?
            .join("lostfound-client");

        fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn store_file() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("store.json"))
    }
}
