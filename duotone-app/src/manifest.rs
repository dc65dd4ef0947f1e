use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use duotone_core::{PairSet, PhotoPair, SourceScheme, VariantKind};

use crate::config::AppConfig;

/// On-disk pair manifest: two parallel filename lists.
#[derive(Debug, Deserialize)]
struct PairManifest {
    bw: Vec<String>,
    color: Vec<String>,
}

/// Load the pair manifest at `path`. Errors are logged and yield `None`;
/// the app then shows an empty gallery instead of dying.
pub fn load_pairs(path: &Path) -> Option<PairSet> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to read manifest {}: {e}", path.display());
            return None;
        }
    };
    let manifest: PairManifest = match serde_json::from_str(&json) {
        Ok(manifest) => manifest,
        Err(e) => {
            error!("Failed to parse manifest {}: {e}", path.display());
            return None;
        }
    };
    match PairSet::new(manifest.bw, manifest.color) {
        Ok(pairs) => {
            info!("Loaded {} pairs from {}", pairs.len(), path.display());
            Some(pairs)
        }
        Err(e) => {
            error!("Rejecting manifest {}: {e}", path.display());
            None
        }
    }
}

/// Location of one variant image: the variant's directory joined with the
/// pair's filename. URL-style directories keep forward slashes so the scheme
/// hint stays recognizable in failure listings.
pub fn variant_location(config: &AppConfig, pair: &PhotoPair, kind: VariantKind) -> String {
    let (dir, name) = match kind {
        VariantKind::Bw => (config.bw_dir.as_str(), pair.bw_name.as_str()),
        VariantKind::High => (config.high_dir.as_str(), pair.color_name.as_str()),
        VariantKind::Color => (config.color_dir(), pair.color_name.as_str()),
    };
    if SourceScheme::detect(dir) != SourceScheme::File {
        format!("{}/{}", dir.trim_end_matches('/'), name)
    } else {
        Path::new(dir).join(name).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn pair() -> PhotoPair {
        PhotoPair {
            bw_name: "street.jpg".into(),
            color_name: "street_color.jpg".into(),
        }
    }

    #[test]
    fn variant_locations_use_the_right_dir_and_name() {
        let config = AppConfig::default();
        let p = pair();
        assert!(variant_location(&config, &p, VariantKind::Bw).ends_with("street.jpg"));
        let high = variant_location(&config, &p, VariantKind::High);
        assert!(high.contains("local_high") && high.ends_with("street_color.jpg"));
        // No color_dir configured: color falls back to high_dir.
        let color = variant_location(&config, &p, VariantKind::Color);
        assert_eq!(color, high);
    }

    #[test]
    fn url_dirs_join_with_forward_slashes() {
        let config = AppConfig {
            bw_dir: "https://photos.example/bw/".into(),
            ..AppConfig::default()
        };
        assert_eq!(
            variant_location(&config, &pair(), VariantKind::Bw),
            "https://photos.example/bw/street.jpg"
        );
    }

    #[test]
    fn mismatched_manifest_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"bw": ["a.jpg", "b.jpg"], "color": ["a2.jpg"]}}"#).unwrap();
        assert!(load_pairs(file.path()).is_none());
    }

    #[test]
    fn valid_manifest_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"bw": ["a.jpg"], "color": ["a2.jpg"]}}"#).unwrap();
        let pairs = load_pairs(file.path()).unwrap();
        assert_eq!(pairs.len(), 1);
    }
}
