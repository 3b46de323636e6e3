use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Duration, Local};

use crate::{
    constants::{REPORT_EXTENSION, REPORT_LIFETIME_HOURS, REPORT_PREFIX, REPORT_TIMESTAMP_FORMAT},
    error::ReportError,
    stock::aggregate::PairedDisplay,
};

use super::pdf;

pub fn report_file_name(now: DateTime<Local>) -> String {
    format!(
        "{REPORT_PREFIX}{}.{REPORT_EXTENSION}",
        now.format(REPORT_TIMESTAMP_FORMAT)
    )
}

/// Only names this cache produces can be served back out of it.
pub fn is_report_file_name(name: &str) -> bool {
    let Some(stem) = name
        .strip_prefix(REPORT_PREFIX)
        .and_then(|rest| rest.strip_suffix(&format!(".{REPORT_EXTENSION}")))
    else {
        return false;
    };

    stem.len() == 15
        && stem
            .char_indices()
            .all(|(i, c)| if i == 8 { c == '_' } else { c.is_ascii_digit() })
}

/// Directory of generated reports. Reports are disposable: anything
/// older than the retention window is removed before the next one is
/// written.
#[derive(Clone, Debug)]
pub struct ReportCache {
    dir: PathBuf,
}

impl ReportCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> Option<PathBuf> {
        is_report_file_name(name).then(|| self.dir.join(name))
    }

    /// Deletes files last modified before `now - 6h`. Returns how many
    /// were removed; a file that cannot be inspected or removed is
    /// logged and left alone.
    pub fn cleanup(&self, now: DateTime<Local>) -> Result<usize, ReportError> {
        fs::create_dir_all(&self.dir)?;
        let cutoff = now - Duration::hours(REPORT_LIFETIME_HOURS);
        let mut removed = 0;

        for entry in fs::read_dir(&self.dir)? {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    log::error!("> Failed to read cache entry: {e}");
                    continue;
                }
            };

            let modified = match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => match meta.modified() {
                    Ok(modified) => DateTime::<Local>::from(modified),
                    Err(e) => {
                        log::error!("> No modification time for {}: {e}", path.display());
                        continue;
                    }
                },
                Ok(_) => continue,
                Err(e) => {
                    log::error!("> Failed to stat {}: {e}", path.display());
                    continue;
                }
            };

            if modified < cutoff {
                match fs::remove_file(&path) {
                    Ok(_) => {
                        log::trace!("> Removed expired report {}", path.display());
                        removed += 1;
                    }
                    Err(e) => log::error!("> Failed to remove {}: {e}", path.display()),
                }
            }
        }

        Ok(removed)
    }

    /// Clears expired reports, then renders and stores a new one.
    /// Returns the file name it was stored under.
    pub fn write(&self, paired: &PairedDisplay, now: DateTime<Local>) -> Result<String, ReportError> {
        let removed = self.cleanup(now)?;
        if removed > 0 {
            log::info!("> Removed {removed} expired reports");
        }

        let name = report_file_name(now);
        let path = self.dir.join(&name);
        if path.exists() {
            log::warn!("> Report {name} already exists, overwriting");
        }

        let bytes = pdf::render(paired, now)?;
        fs::write(&path, bytes)?;

        log::info!("> Wrote report {name}");
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs::File, time::SystemTime};

    use chrono::TimeZone;

    use super::*;
    use crate::stock::aggregate::{PairKey, Quantity};

    fn touch(path: &Path, modified: SystemTime) {
        let file = File::create(path).unwrap();
        file.set_modified(modified).unwrap();
    }

    #[test]
    fn file_name_uses_timestamp() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(report_file_name(now), "cellar_run_20240309_070501.pdf");
        assert!(is_report_file_name(&report_file_name(now)));
    }

    #[test]
    fn only_report_names_are_served() {
        let cache = ReportCache::new("pdf_cache");
        assert!(cache.path_for("cellar_run_20240309_070501.pdf").is_some());
        assert!(cache.path_for("../secret.pdf").is_none());
        assert!(cache.path_for("cellar_run_2024030_9070501.pdf").is_none());
        assert!(cache.path_for("cellar_run_20240309_070501.pdf.bak").is_none());
        assert!(cache.path_for("cellar_run_../../etc/pass.pdf").is_none());
    }

    #[test]
    fn cleanup_removes_only_expired_files() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ReportCache::new(dir.path());
        let now = Local::now();

        let old = dir.path().join("old.pdf");
        let fresh = dir.path().join("fresh.pdf");
        touch(&old, (now - Duration::hours(7)).into());
        touch(&fresh, (now - Duration::hours(5)).into());
        fs::create_dir(dir.path().join("nested")).unwrap();

        assert_eq!(cache.cleanup(now).unwrap(), 1);
        assert!(!old.exists());
        assert!(fresh.exists());
        assert!(dir.path().join("nested").exists());
    }

    #[test]
    fn cleanup_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ReportCache::new(dir.path().join("pdf_cache"));

        assert_eq!(cache.cleanup(Local::now()).unwrap(), 0);
        assert!(cache.dir().is_dir());
    }

    #[test]
    fn same_second_write_replaces_report() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ReportCache::new(dir.path());
        let now = Local::now();

        let first = cache.write(&PairedDisplay::new(), now).unwrap();
        let before = fs::read(dir.path().join(&first)).unwrap();

        let mut paired = PairedDisplay::new();
        paired.insert(
            PairKey::from_bar("Top Bar", 5),
            [("Malibu".to_string(), Quantity::from_bottles(5))].into(),
        );
        let second = cache.write(&paired, now).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
        assert_ne!(fs::read(dir.path().join(&second)).unwrap(), before);
    }

    #[test]
    fn write_clears_expired_before_storing() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ReportCache::new(dir.path());
        let now = Local::now();

        let old = dir.path().join("cellar_run_20000101_000000.pdf");
        touch(&old, (now - Duration::hours(12)).into());

        let mut paired = PairedDisplay::new();
        paired.insert(
            PairKey::from_bar("Bottom Bar", 3),
            [("Tito's".to_string(), Quantity::from_bottles(3))].into(),
        );

        let name = cache.write(&paired, now).unwrap();
        assert_eq!(name, report_file_name(now));
        assert!(dir.path().join(&name).is_file());
        assert!(!old.exists());
    }
}
