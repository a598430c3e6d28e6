//! File readers and exporters for the two tools.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use plate_core::dict::VoiceoverDictionary;
use plate_core::pattern::PatternError;
use plate_core::render::{RenderError, Voiceover};
use plate_core::settings::SettingsError;
use plate_core::text::{split_lines, trim_invisible};

pub const VOICEOVER_HEADER: &str = "name;options";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub fn read_text(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|e| CliError::io(path, e))
}

/// One code per line. Codes may contain spaces, so only BOM and zero-width
/// characters are trimmed.
pub fn read_codes(path: &Path) -> Result<Vec<String>, CliError> {
    let text = read_text(path)?;
    Ok(split_lines(&text)
        .map(trim_invisible)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect())
}

pub fn read_dictionary(path: &Path) -> Result<VoiceoverDictionary, CliError> {
    Ok(VoiceoverDictionary::parse(&read_text(path)?))
}

/// Write `records` joined by `\n`, creating parent directories as needed.
pub fn export_lines<S: AsRef<str>>(path: &Path, records: &[S]) -> Result<(), CliError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| CliError::io(dir, e))?;
    }
    let content = records
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n");
    fs::write(path, content).map_err(|e| CliError::io(path, e))
}

/// `name;options` header, then `name;opt1,opt2,...` per voiceover.
pub fn export_voiceovers(path: &Path, voiceovers: &[Voiceover]) -> Result<(), CliError> {
    let mut lines = Vec::with_capacity(voiceovers.len() + 1);
    lines.push(VOICEOVER_HEADER.to_string());
    lines.extend(
        voiceovers
            .iter()
            .map(|v| format!("{};{}", v.name, v.options.join(","))),
    );
    export_lines(path, &lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/numbers.txt");
        export_lines(&path, &["А001АА 78", "А002АА 78"]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "А001АА 78\nА002АА 78");
    }

    #[test]
    fn test_export_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        export_lines::<&str>(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_export_voiceovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voiceovers.csv");
        let voiceovers = vec![
            Voiceover::new("М01", "эм ноль один"),
            Voiceover {
                name: "М02".into(),
                options: vec!["эм ноль два".into(), "мэ нуль два".into()],
            },
        ];
        export_voiceovers(&path, &voiceovers).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "name;options\nМ01;эм ноль один\nМ02;эм ноль два,мэ нуль два"
        );
    }

    #[test]
    fn test_read_codes_keeps_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("numbers.txt");
        fs::write(&path, "\u{FEFF}А001АА 78\r\n\r\nВ002ВВ 77\n").unwrap();
        assert_eq!(read_codes(&path).unwrap(), vec!["А001АА 78", "В002ВВ 77"]);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = read_codes(&path).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }
}
