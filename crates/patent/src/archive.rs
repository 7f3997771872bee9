//! Local PDF archive.
//!
//! The archive is a plain directory with one `<NUMBER>.pdf` file per downloaded patent. There
//! is no index: presence of the file is the record. Downloads land in a `<NUMBER>.pdf.part` file
//! first and are renamed into place once complete, so a `.part` file never counts as archived.

use super::*;

/// Handle on the archive directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
  /// Directory holding the PDFs
  dir: PathBuf,
}

impl Archive {
  /// Creates a handle for `dir`. The directory does not need to exist yet.
  pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

  /// Returns the default archive location.
  ///
  /// The path is constructed as follows:
  /// - On Unix and macOS: `~/Documents/patent/pdfs`
  /// - On Windows: `Documents\patent\pdfs`
  /// - Fallback: `./pdfs` in the current directory
  pub fn default_path() -> PathBuf {
    dirs::document_dir()
      .map(|dir| dir.join("patent").join("pdfs"))
      .unwrap_or_else(|| PathBuf::from("pdfs"))
  }

  /// The archive directory.
  pub fn dir(&self) -> &Path { &self.dir }

  /// Canonical location of the document for `number`.
  ///
  /// Characters that can't appear in a file name on every platform are replaced with `_`, so
  /// each number maps to exactly one path.
  pub fn path_for(&self, number: &str) -> PathBuf {
    let file_stem: String = number
      .trim()
      .chars()
      .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
      .collect();
    self.dir.join(format!("{file_stem}.pdf"))
  }

  /// Returns the archived document for `number`, if there is one.
  pub fn find_local_file(&self, number: &str) -> Option<PathBuf> {
    let path = self.path_for(number);
    trace!("Checking archive for {number} at {}", path.display());
    path.is_file().then_some(path)
  }

  /// Creates the archive directory if it is missing.
  pub fn ensure_dir(&self) -> Result<()> {
    if !self.dir.exists() {
      debug!("Creating archive directory {}", self.dir.display());
      std::fs::create_dir_all(&self.dir)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_file_is_none() {
    let dir = tempdir().unwrap();
    let archive = Archive::new(dir.path());
    assert_eq!(archive.find_local_file("CN1234567A"), None);
  }

  #[test]
  fn test_present_file_is_found_repeatedly() {
    let dir = tempdir().unwrap();
    let archive = Archive::new(dir.path());
    std::fs::write(dir.path().join("CN1234567A.pdf"), b"%PDF-1.5").unwrap();

    let expected = dir.path().join("CN1234567A.pdf");
    assert_eq!(archive.find_local_file("CN1234567A"), Some(expected.clone()));
    assert_eq!(archive.find_local_file("CN1234567A"), Some(expected));
  }

  #[test]
  fn test_directory_with_pdf_name_is_not_a_document() {
    let dir = tempdir().unwrap();
    let archive = Archive::new(dir.path());
    std::fs::create_dir(dir.path().join("CN1234567A.pdf")).unwrap();
    assert_eq!(archive.find_local_file("CN1234567A"), None);
  }

  #[test]
  fn test_partial_download_is_not_archived() {
    let dir = tempdir().unwrap();
    let archive = Archive::new(dir.path());
    std::fs::write(dir.path().join("CN1234567A.pdf.part"), b"%PDF-1.").unwrap();
    assert_eq!(archive.find_local_file("CN1234567A"), None);
  }

  #[test]
  fn test_path_for_is_sanitized() {
    let archive = Archive::new("/archive");
    assert_eq!(archive.path_for("CN202310123456.7"), PathBuf::from("/archive/CN202310123456.7.pdf"));
    assert_eq!(archive.path_for("../etc/passwd"), PathBuf::from("/archive/.._etc_passwd.pdf"));
  }

  #[test]
  fn test_ensure_dir_creates_nested_directory() {
    let dir = tempdir().unwrap();
    let archive = Archive::new(dir.path().join("a").join("b"));
    archive.ensure_dir().unwrap();
    assert!(archive.dir().is_dir());
    archive.ensure_dir().unwrap();
  }
}
