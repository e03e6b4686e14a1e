use anyhow::{anyhow, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::log;

const TESSDATA_REPO: &str = "https://github.com/tesseract-ocr/tessdata/raw/main";

/// Install locations checked after the local directory and PATH.
const COMMON_INSTALL_DIRS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR",
    r"C:\Program Files (x86)\Tesseract-OCR",
    "/usr/bin",
    "/usr/local/bin",
    "/opt/homebrew/bin",
];

const SYSTEM_TESSDATA_DIRS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR\tessdata",
    r"C:\Program Files (x86)\Tesseract-OCR\tessdata",
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4.00/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    "/opt/homebrew/share/tessdata",
];

/// Where Tesseract and its language data were found.
#[derive(Clone, Debug)]
pub struct TesseractPaths {
    pub executable: PathBuf,
    /// `None` lets Tesseract use its compiled-in default
    pub tessdata: Option<PathBuf>,
}

/// Returns the directory for storing Tesseract files
pub fn get_tesseract_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pokemmo-type-overlay")
        .join("tesseract")
}

fn traineddata_name(language: &str) -> String {
    format!("{}.traineddata", language)
}

/// Ensures Tesseract is available and has data for `language`.
/// Downloads the trained data if necessary.
pub fn ensure_tesseract(language: &str) -> Result<TesseractPaths> {
    let executable = find_tesseract_executable()?;
    log(&format!("Tesseract executable: {}", executable.display()));

    if let Some(tessdata) = find_tessdata_dir(language) {
        log(&format!("Tesseract data found at: {}", tessdata.display()));
        return Ok(TesseractPaths {
            executable,
            tessdata: Some(tessdata),
        });
    }

    log(&format!(
        "{} not found locally, downloading...",
        traineddata_name(language)
    ));

    let tessdata = get_tesseract_dir().join("tessdata");
    fs::create_dir_all(&tessdata)?;
    download_tessdata(&tessdata, language)?;

    log(&format!("Tesseract ready, data at: {}", tessdata.display()));

    Ok(TesseractPaths {
        executable,
        tessdata: Some(tessdata),
    })
}

/// Finds Tesseract without downloading anything.
pub fn locate_tesseract(language: &str) -> Result<TesseractPaths> {
    Ok(TesseractPaths {
        executable: find_tesseract_executable()?,
        tessdata: find_tessdata_dir(language),
    })
}

/// Downloads trained data for `language` from the tessdata repository
fn download_tessdata(tessdata_dir: &Path, language: &str) -> Result<()> {
    let file_name = traineddata_name(language);
    let url = format!("{}/{}", TESSDATA_REPO, file_name);
    let target = tessdata_dir.join(&file_name);

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(300))
        .build()?;

    let response = client
        .get(&url)
        .header("User-Agent", "pokemmo-type-overlay")
        .send()?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Failed to download {}: HTTP {}",
            file_name,
            response.status()
        ));
    }

    let bytes = response.bytes()?;
    let mut file = fs::File::create(&target)?;
    file.write_all(&bytes)?;

    log(&format!("Downloaded {} ({} bytes)", file_name, bytes.len()));

    Ok(())
}

/// Finds the Tesseract executable, checking our local dir first, then system
pub fn find_tesseract_executable() -> Result<PathBuf> {
    let exe_name = format!("tesseract{}", std::env::consts::EXE_SUFFIX);

    let local_exe = get_tesseract_dir().join(&exe_name);
    if local_exe.exists() {
        return Ok(local_exe);
    }

    // Check PATH
    if let Ok(output) = std::process::Command::new("tesseract")
        .arg("--version")
        .output()
    {
        if output.status.success() {
            return Ok(PathBuf::from("tesseract"));
        }
    }

    for dir in COMMON_INSTALL_DIRS {
        let p = Path::new(dir).join(&exe_name);
        if p.exists() {
            return Ok(p);
        }
    }

    Err(anyhow!(
        "Tesseract not found. Please install Tesseract-OCR:\n\
         1. Download from: https://github.com/UB-Mannheim/tesseract/releases\n\
         2. Run the installer (choose to add to PATH)\n\
         3. Or copy the portable build to: {}\n\
         4. Restart this application after installation",
        get_tesseract_dir().display()
    ))
}

/// Finds a tessdata directory containing data for `language`
pub fn find_tessdata_dir(language: &str) -> Option<PathBuf> {
    let file_name = traineddata_name(language);

    let local = get_tesseract_dir().join("tessdata");
    if local.join(&file_name).exists() {
        return Some(local);
    }

    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        let p = PathBuf::from(&prefix);
        if p.join(&file_name).exists() {
            return Some(p);
        }
        let p = p.join("tessdata");
        if p.join(&file_name).exists() {
            return Some(p);
        }
    }

    SYSTEM_TESSDATA_DIRS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.join(&file_name).exists())
}
