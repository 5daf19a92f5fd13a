use git2::{Oid, Repository};
use std::collections::HashMap;
use tracing::debug;

use crate::types::ReleaseTier;

/// A `major.minor.patch` release version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Parse tags of the form `v<major>.<minor>.<patch>`; anything else is not a release.
    pub fn parse_tag(tag: &str) -> Option<Self> {
        let mut parts = tag.strip_prefix('v')?.split('.');
        let mut component = || -> Option<u64> {
            let part = parts.next()?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            part.parse().ok()
        };

        let version = Self {
            major: component()?,
            minor: component()?,
            patch: component()?,
        };
        parts.next().is_none().then_some(version)
    }
}

/// Tier of each version, judged against the release before it (the first against `0.0.0`).
pub fn classify_versions(versions: &[Version]) -> HashMap<Version, ReleaseTier> {
    let mut sorted = versions.to_vec();
    sorted.sort();
    sorted.dedup();

    let mut previous = Version {
        major: 0,
        minor: 0,
        patch: 0,
    };
    let mut tiers = HashMap::with_capacity(sorted.len());
    for version in sorted {
        let tier = if version.major != previous.major {
            ReleaseTier::Major
        } else if version.minor != previous.minor {
            ReleaseTier::Minor
        } else {
            ReleaseTier::Patch
        };
        tiers.insert(version, tier);
        previous = version;
    }
    tiers
}

/// Map commits carrying a release tag to the most significant tier among their tags.
pub fn release_tiers(repo: &Repository) -> Result<HashMap<Oid, ReleaseTier>, git2::Error> {
    let names = repo.tag_names(None)?;

    let mut tagged: Vec<(Oid, Version)> = Vec::new();
    for name in names.iter().flatten() {
        let Some(version) = Version::parse_tag(name) else {
            continue;
        };
        // Tags on trees or blobs have no commit to mark.
        match repo
            .revparse_single(&format!("refs/tags/{name}"))
            .and_then(|object| object.peel_to_commit())
        {
            Ok(commit) => tagged.push((commit.id(), version)),
            Err(e) => debug!(tag = name, "skipping release tag: {}", e),
        }
    }

    let versions: Vec<Version> = tagged.iter().map(|(_, version)| *version).collect();
    let tiers = classify_versions(&versions);

    let mut by_commit: HashMap<Oid, ReleaseTier> = HashMap::new();
    for (oid, version) in tagged {
        let tier = tiers.get(&version).copied().unwrap_or_default();
        let entry = by_commit.entry(oid).or_default();
        *entry = (*entry).max(tier);
    }
    Ok(by_commit)
}
