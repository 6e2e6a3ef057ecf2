use std::{env, fs, path::PathBuf};

/// Name of the configuration directory created under the user
/// home directory.
const CONF_DIR: &str = ".gboyemu";

/// Name of the save state sub directory.
const DUMP_DIR: &str = "dump";

/// Ensures that the configuration and dump directories exist,
/// returning the path of the dump directory.
pub fn ensure_dump_dir() -> Result<PathBuf, String> {
    let home = env::var("HOME").map_err(|_| String::from("Could not resolve home directory"))?;
    let dump_dir = PathBuf::from(home).join(CONF_DIR).join(DUMP_DIR);
    fs::create_dir_all(&dump_dir)
        .map_err(|error| format!("Could not create directory {}: {}", dump_dir.display(), error))?;
    Ok(dump_dir)
}
