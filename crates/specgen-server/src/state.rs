use llm_client::TextGenerator;
use specgen_core::config::Config;
use specgen_core::store::SpecStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub config: Arc<Config>,
    pub store: SpecStore,
    pub generator: Arc<dyn TextGenerator>,
    /// Serializes the load-prepend-save sequence of concurrent generations.
    pub history_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(root: PathBuf, config: Config, generator: Arc<dyn TextGenerator>) -> Self {
        let store = config.store(&root);
        Self {
            root,
            config: Arc::new(config),
            store,
            generator,
            history_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Build state from `config`, constructing the provider client from the
    /// environment. A missing credential is not an error here.
    pub fn from_config(root: PathBuf, config: Config) -> anyhow::Result<Self> {
        let generator = llm_client::from_env(config.provider, &config.client_options())?;
        Ok(Self::new(root, config, Arc::from(generator)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_points_store_at_root_data_dir() {
        let state =
            AppState::from_config(PathBuf::from("/tmp/test"), Config::default()).unwrap();
        assert_eq!(state.root, PathBuf::from("/tmp/test"));
        assert_eq!(
            state.store.path(),
            std::path::Path::new("/tmp/test/data/specs.json")
        );
    }
}
