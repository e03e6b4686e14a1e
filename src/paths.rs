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

/// Returns the debug capture directory: `<exe_dir>/captures/`
pub fn get_captures_dir() -> PathBuf {
    get_exe_dir().join("captures")
}

/// Returns the type icon directory: `<exe_dir>/resources/icons/`
pub fn get_icons_dir() -> PathBuf {
    get_exe_dir().join("resources").join("icons")
}

/// Returns the reference data directory.
///
/// Prefers `<exe_dir>/data/` (populated by the build script) and falls back
/// to `./data/` so `cargo run` from the repository root also works.
pub fn get_data_dir() -> PathBuf {
    let beside_exe = get_exe_dir().join("data");
    if beside_exe.is_dir() {
        return beside_exe;
    }
    PathBuf::from("data")
}

/// Ensures all output directories exist. Call at startup.
pub fn ensure_directories() -> std::io::Result<()> {
    std::fs::create_dir_all(get_logs_dir())?;
    std::fs::create_dir_all(get_captures_dir())?;
    Ok(())
}
