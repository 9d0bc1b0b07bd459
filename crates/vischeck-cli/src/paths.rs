//! Output-path conventions

use std::path::{Path, PathBuf};

/// Derive the default output path `<parent>/<stem>_<suffix>.png`
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let name = format!("{}_{}.png", stem, suffix);
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
        _ => PathBuf::from(name),
    }
}

/// Render a path as absolute for reporting, without touching the
/// filesystem
pub fn display_absolute(path: &Path) -> String {
    if path.is_absolute() {
        return path.display().to_string();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path).display().to_string(),
        Err(_) => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/captures/home.png"), "normalized"),
            PathBuf::from("/captures/home_normalized.png")
        );
        assert_eq!(
            default_output_path(Path::new("shot.jpeg"), "matched"),
            PathBuf::from("shot_matched.png")
        );
    }

    #[test]
    fn test_display_absolute_passes_through_absolute_paths() {
        assert_eq!(display_absolute(Path::new("/a/b.png")), "/a/b.png");
    }
}
