use std::path::PathBuf;
use std::sync::OnceLock;

static EXE_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Returns the directory containing the executable.
pub fn get_exe_dir() -> &'static PathBuf {
    EXE_DIR.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

/// Returns the logs directory: `<exe_dir>/logs/`
pub fn get_logs_dir() -> PathBuf {
    get_exe_dir().join("logs")
}

/// Returns the directory exported reports are saved to: `<exe_dir>/results/`
pub fn get_results_dir() -> PathBuf {
    get_exe_dir().join("results")
}

/// Returns the illustration directory: `<exe_dir>/resources/images/`
///
/// Overlay guides and grade reference pictures are looked up here by
/// naming convention (`<name>.png`).
pub fn get_images_dir() -> PathBuf {
    get_exe_dir().join("resources").join("images")
}

/// Ensures all output directories exist. Call at startup.
pub fn ensure_directories() -> std::io::Result<()> {
    std::fs::create_dir_all(get_logs_dir())?;
    std::fs::create_dir_all(get_results_dir())?;
    Ok(())
}
