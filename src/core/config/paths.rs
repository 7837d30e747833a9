use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub project_root: PathBuf,
    pub log_dir: PathBuf,
    pub config_path: PathBuf,
    pub secrets_path: PathBuf,
}

impl AppPaths {
    pub fn new() -> Self {
        let project_root = discover_project_root();
        Self::with_root(project_root)
    }

    pub fn with_root(project_root: PathBuf) -> Self {
        let log_dir = discover_log_dir(&project_root);
        let config_path = env::var("RAG_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| project_root.join("config.yml"));
        let secrets_path = project_root.join("secrets.yaml");

        AppPaths {
            project_root,
            log_dir,
            config_path,
            secrets_path,
        }
    }

    pub fn ensure_log_dir(&self) {
        let _ = fs::create_dir_all(&self.log_dir);
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

fn discover_project_root() -> PathBuf {
    if let Ok(root) = env::var("RAG_ROOT") {
        return PathBuf::from(root);
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    if manifest_dir.join("config.yml").exists() {
        return manifest_dir;
    }

    env::current_dir().unwrap_or(manifest_dir)
}

fn discover_log_dir(project_root: &Path) -> PathBuf {
    if let Ok(dir) = env::var("RAG_LOG_DIR") {
        return PathBuf::from(dir);
    }
    project_root.join("logs")
}
