use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    // Copy reference data, icons and config next to the executable
    let Some(target_dir) = target_dir() else {
        println!("cargo:warning=Could not find target directory; runtime files not copied");
        return;
    };

    copy_dir("data", &target_dir.join("data"));
    copy_dir("resources/icons", &target_dir.join("resources").join("icons"));
    copy_config(&target_dir);
}

/// Returns the profile directory (target/debug or target/release).
fn target_dir() -> Option<PathBuf> {
    let out_dir = env::var("OUT_DIR").ok()?;
    // OUT_DIR is something like target/release/build/pokemmo-type-overlay-xxx/out
    // Go up 3 levels: out -> hash -> build -> release
    Path::new(&out_dir).ancestors().nth(3).map(Path::to_path_buf)
}

/// Copies a source directory to the target directory if it exists.
fn copy_dir(src: &str, dst: &Path) {
    let src_path = Path::new(src);
    if src_path.exists() {
        copy_dir_recursive(src_path, dst);
        // Tell Cargo to re-run if the directory changes
        println!("cargo:rerun-if-changed={}/", src);
    }
}

/// Recursively copies a directory and its contents.
fn copy_dir_recursive(src: &Path, dst: &Path) {
    let _ = fs::create_dir_all(dst);

    if let Ok(entries) = fs::read_dir(src) {
        for entry in entries.flatten() {
            let src_path = entry.path();
            let dst_path = dst.join(entry.file_name());

            if src_path.is_dir() {
                copy_dir_recursive(&src_path, &dst_path);
            } else {
                let _ = fs::copy(&src_path, &dst_path);
            }
        }
    }
}

/// Copies config.json to the target directory.
fn copy_config(target_dir: &Path) {
    let config_src = Path::new("config.json");
    if config_src.exists() {
        let _ = fs::copy(config_src, target_dir.join("config.json"));
        println!("cargo:rerun-if-changed=config.json");
    }
}
