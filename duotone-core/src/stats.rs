use std::fmt;

/// How many failure descriptors the status note will list.
pub const MAX_LISTED_FAILURES: usize = 20;

/// Image variants tracked per photo pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    Bw,
    High,
    Color,
}

impl VariantKind {
    pub const ALL: [Self; 3] = [Self::Bw, Self::High, Self::Color];

    pub fn label(self) -> &'static str {
        match self {
            Self::Bw => "B/W",
            Self::High => "High",
            Self::Color => "Color",
        }
    }
}

/// One failed load attempt, kept for the diagnostic listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub kind: VariantKind,
    pub name: String,
    pub path: String,
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {} -> {}", self.kind.label(), self.name, self.path)
    }
}

// ---------------------------------------------------------------------------
// Source scheme hints
// ---------------------------------------------------------------------------

/// Where a base image location points. Remote schemes cannot be read by the
/// local loader and earn an explanatory hint instead of a load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceScheme {
    File,
    Http,
    Https,
}

impl SourceScheme {
    pub fn detect(location: &str) -> Self {
        let lower = location.trim_start().to_ascii_lowercase();
        if lower.starts_with("https://") {
            Self::Https
        } else if lower.starts_with("http://") {
            Self::Http
        } else {
            Self::File
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// Hint shown when loads may be blocked by where the images live.
    /// Empty for plain filesystem paths.
    pub fn hint(self) -> &'static str {
        match self {
            Self::File => "",
            Self::Http => {
                "An image folder points at an http:// URL. The viewer reads local \
                 folders only; download the gallery or point the folder settings at \
                 a local copy."
            }
            Self::Https => {
                "An image folder points at an https:// URL. The viewer reads local \
                 folders only; download the gallery or point the folder settings at \
                 a local copy."
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Load statistics
// ---------------------------------------------------------------------------

/// What a recorded load attempt means for the user-visible surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusUpdate {
    /// Replacement text for the status note, when it should change.
    pub note: Option<String>,
    /// Set on the attempt that brought the session to completion. Reported
    /// exactly once even under mixed success/failure interleavings.
    pub completed: bool,
    /// The diagnostic log panel should become visible.
    pub reveal_log: bool,
}

/// Monotonic per-session load accounting: three variants per pair.
#[derive(Debug, Clone)]
pub struct LoadStats {
    total: usize,
    loaded: usize,
    failed: usize,
    failures: Vec<FailureRecord>,
    completion_reported: bool,
}

impl LoadStats {
    pub fn new(pair_count: usize) -> Self {
        Self {
            total: pair_count * VariantKind::ALL.len(),
            loaded: 0,
            failed: 0,
            failures: Vec::new(),
            completion_reported: false,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn failures(&self) -> &[FailureRecord] {
        &self.failures
    }

    pub fn is_complete(&self) -> bool {
        self.loaded + self.failed >= self.total
    }

    pub fn record_success(&mut self) -> StatusUpdate {
        self.loaded += 1;
        self.finish_attempt()
    }

    pub fn record_failure(&mut self, record: FailureRecord) -> StatusUpdate {
        self.failed += 1;
        self.failures.push(record);
        let mut update = self.finish_attempt();
        update.reveal_log = true;
        if update.note.is_none() {
            update.note = Some(self.failure_note());
        }
        update
    }

    fn finish_attempt(&mut self) -> StatusUpdate {
        if !self.is_complete() || self.completion_reported {
            return StatusUpdate::default();
        }
        self.completion_reported = true;
        let note = if self.failed > 0 {
            Some(format!(
                "Load complete. Loaded: {}, Failed: {}. See the log for the first {} \
                 missing files.",
                self.loaded,
                self.failed,
                self.failures.len().min(MAX_LISTED_FAILURES)
            ))
        } else {
            None
        };
        StatusUpdate {
            note,
            completed: true,
            reveal_log: false,
        }
    }

    /// Running failure listing, capped at [`MAX_LISTED_FAILURES`] entries.
    fn failure_note(&self) -> String {
        let sample: Vec<String> = self
            .failures
            .iter()
            .take(MAX_LISTED_FAILURES)
            .map(|f| format!("{}: {}", f.kind.label(), f.name))
            .collect();
        format!("Load failures ({}): {}", self.failures.len(), sample.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(kind: VariantKind, name: &str) -> FailureRecord {
        FailureRecord {
            kind,
            name: name.to_string(),
            path: format!("./local/{name}"),
        }
    }

    #[test]
    fn all_variants_failing_reports_once() {
        // Two pairs, three tracked variants each.
        let mut stats = LoadStats::new(2);
        assert_eq!(stats.total(), 6);

        let mut completions = 0;
        let mut revealed = false;
        for i in 0..6 {
            let update = stats.record_failure(failure(VariantKind::Bw, &format!("f{i}.jpg")));
            revealed |= update.reveal_log;
            if update.completed {
                completions += 1;
            }
        }
        assert_eq!(stats.loaded(), 0);
        assert_eq!(stats.failed(), 6);
        assert!(stats.is_complete());
        assert!(revealed);
        assert_eq!(completions, 1);
        assert_eq!(stats.failures().len(), 6);
    }

    #[test]
    fn mixed_interleaving_completes_once() {
        let mut stats = LoadStats::new(1);
        let mut completions = 0;
        for update in [
            stats.record_success(),
            stats.record_failure(failure(VariantKind::High, "a.jpg")),
            stats.record_success(),
        ] {
            if update.completed {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
    }

    #[test]
    fn clean_completion_has_no_note() {
        let mut stats = LoadStats::new(1);
        stats.record_success();
        stats.record_success();
        let last = stats.record_success();
        assert!(last.completed);
        assert_eq!(last.note, None);
        assert!(!last.reveal_log);
    }

    #[test]
    fn failure_listing_is_capped() {
        let mut stats = LoadStats::new(10);
        let mut last_note = String::new();
        for i in 0..25 {
            let update = stats.record_failure(failure(VariantKind::Color, &format!("f{i}.jpg")));
            if let Some(note) = update.note {
                last_note = note;
            }
        }
        assert!(last_note.starts_with("Load failures (25):"));
        assert_eq!(last_note.matches(" | ").count(), MAX_LISTED_FAILURES - 1);
    }

    #[test]
    fn scheme_detection() {
        assert_eq!(SourceScheme::detect("./local_bw"), SourceScheme::File);
        assert_eq!(SourceScheme::detect("/srv/photos"), SourceScheme::File);
        assert_eq!(
            SourceScheme::detect("http://example.com/bw"),
            SourceScheme::Http
        );
        assert_eq!(
            SourceScheme::detect("HTTPS://example.com/bw"),
            SourceScheme::Https
        );
        assert!(SourceScheme::File.hint().is_empty());
        assert!(!SourceScheme::Http.hint().is_empty());
    }
}
