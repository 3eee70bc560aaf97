use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const DATA_DIR: &str = "data";
pub const SPECS_FILE: &str = "specs.json";
pub const CONFIG_FILE: &str = "specgen.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn data_dir(root: &Path) -> PathBuf {
    root.join(DATA_DIR)
}

pub fn specs_path(root: &Path) -> PathBuf {
    data_dir(root).join(SPECS_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(specs_path(root), PathBuf::from("/tmp/proj/data/specs.json"));
        assert_eq!(config_path(root), PathBuf::from("/tmp/proj/specgen.yaml"));
    }
}
