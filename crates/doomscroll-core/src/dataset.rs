//! Supported public video datasets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A public video-captioning dataset that can be prepared locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// MSR-VTT (video clips with ~20 captions each).
    Msrvtt,
    /// DiDeMo (distinct describable moments).
    Didemo,
    /// Panda-70M (YouTube clips with timestamped captions).
    Panda70m,
}

impl DatasetKind {
    /// All supported datasets, in the order they are documented.
    pub const ALL: [Self; 3] = [Self::Msrvtt, Self::Didemo, Self::Panda70m];

    /// Hugging Face dataset repository id.
    pub const fn repo_id(self) -> &'static str {
        match self {
            Self::Msrvtt => "friedrichor/MSR-VTT",
            Self::Didemo => "friedrichor/DiDeMo",
            Self::Panda70m => "multimodalart/panda-70m",
        }
    }

    /// Directory name under `assets/videos/`.
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Msrvtt => "msrvtt",
            Self::Didemo => "didemo",
            Self::Panda70m => "panda70m",
        }
    }

    /// Human-readable name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Msrvtt => "MSR-VTT",
            Self::Didemo => "DiDeMo",
            Self::Panda70m => "Panda-70M",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Returned when parsing an unknown dataset name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown dataset '{0}' (expected one of: msrvtt, didemo, panda70m)")]
pub struct UnknownDataset(pub String);

impl FromStr for DatasetKind {
    type Err = UnknownDataset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "msrvtt" => Ok(Self::Msrvtt),
            "didemo" => Ok(Self::Didemo),
            "panda70m" => Ok(Self::Panda70m),
            _ => Err(UnknownDataset(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_display_spellings() {
        assert_eq!("MSR-VTT".parse::<DatasetKind>(), Ok(DatasetKind::Msrvtt));
        assert_eq!("didemo".parse::<DatasetKind>(), Ok(DatasetKind::Didemo));
        assert_eq!("Panda-70M".parse::<DatasetKind>(), Ok(DatasetKind::Panda70m));
        assert_eq!("panda_70m".parse::<DatasetKind>(), Ok(DatasetKind::Panda70m));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "kinetics".parse::<DatasetKind>().unwrap_err();
        assert!(err.to_string().contains("kinetics"));
    }

    #[test]
    fn test_dir_names_are_stable() {
        let names: Vec<_> = DatasetKind::ALL.iter().map(|k| k.dir_name()).collect();
        assert_eq!(names, ["msrvtt", "didemo", "panda70m"]);
    }
}
