//! ---
//! ranklog_section: "01-core-functionality"
//! ranklog_subsection: "module"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Shared primitives and utilities for the logging engine."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
//! Severity scale and rank selection policy.
//!
//! Severities follow the syslog ordering: a lower ordinal is more severe.
//! A configured maximum severity permits every level at or above it in
//! importance, so configuring [`Severity::Info`] admits `emerg..=info` and
//! suppresses `debug`.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::Error;

/// 24-bit color tag attached to a severity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Syslog severity levels.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    IntoStaticStr,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "&'static str")]
#[repr(u8)]
pub enum Severity {
    #[strum(to_string = "emerg", serialize = "emergency")]
    Emerg = 0,
    #[strum(to_string = "alert")]
    Alert = 1,
    #[strum(to_string = "crit", serialize = "critical")]
    Crit = 2,
    #[strum(to_string = "err", serialize = "error")]
    Err = 3,
    #[strum(to_string = "warning", serialize = "warn")]
    Warning = 4,
    #[strum(to_string = "notice")]
    Notice = 5,
    #[strum(to_string = "info")]
    Info = 6,
    #[strum(to_string = "debug")]
    Debug = 7,
}

// Indexed by ordinal.
const STYLES: [(&str, Rgb); 8] = [
    ("EMERG", Rgb::new(139, 0, 0)),
    ("ALERT", Rgb::new(255, 0, 0)),
    ("CRIT", Rgb::new(255, 140, 0)),
    ("ERR", Rgb::new(255, 165, 0)),
    ("WARNING", Rgb::new(255, 165, 0)),
    ("NOTICE", Rgb::new(0, 128, 0)),
    ("INFO", Rgb::new(0, 0, 255)),
    ("DEBUG", Rgb::new(128, 0, 128)),
];

impl Severity {
    /// Numeric syslog ordinal.
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Upper-case tag rendered between brackets, e.g. `WARNING`.
    pub fn label(self) -> &'static str {
        STYLES[self as usize].0
    }

    /// Color tag used when rendering the label.
    pub fn color(self) -> Rgb {
        STYLES[self as usize].1
    }

    /// Whether a message at `candidate` passes when `self` is the configured maximum.
    pub fn permits(self, candidate: Severity) -> bool {
        candidate <= self
    }

    /// All severities from most to least severe.
    pub fn all() -> impl Iterator<Item = Severity> {
        Severity::iter()
    }
}

impl TryFrom<String> for Severity {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Error> {
        value.trim().parse().map_err(|_| Error::InvalidValue {
            key: "severity",
            value,
        })
    }
}

/// Which ranks act on a log or timer call.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    EnumString,
    IntoStaticStr,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "&'static str")]
pub enum RankSelector {
    /// Only rank 0 acts.
    #[default]
    #[strum(to_string = "leader", serialize = "zero")]
    Leader,
    /// Every rank acts, in rank order.
    #[strum(to_string = "all")]
    All,
}

impl RankSelector {
    /// Whether `rank` is selected by this policy.
    pub fn selects(self, rank: usize) -> bool {
        match self {
            RankSelector::All => true,
            RankSelector::Leader => rank == 0,
        }
    }
}

impl TryFrom<String> for RankSelector {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Error> {
        value.trim().parse().map_err(|_| Error::InvalidValue {
            key: "ranks",
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_syslog() {
        let levels: Vec<_> = Severity::all().collect();
        assert_eq!(levels.len(), 8);
        assert_eq!(levels.first(), Some(&Severity::Emerg));
        assert_eq!(levels.last(), Some(&Severity::Debug));
        for pair in levels.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].ordinal() + 1, pair[1].ordinal());
        }
    }

    #[test]
    fn filtering_is_monotonic() {
        for max in Severity::all() {
            for lower in Severity::all() {
                for higher in Severity::all().filter(|s| *s <= lower) {
                    if max.permits(lower) {
                        assert!(max.permits(higher), "{max}: {lower} passes but {higher} does not");
                    }
                }
            }
        }
    }

    #[test]
    fn info_threshold_suppresses_debug_only() {
        let admitted: Vec<_> = Severity::all()
            .filter(|s| Severity::Info.permits(*s))
            .collect();
        assert_eq!(admitted.len(), 7);
        assert!(!Severity::Info.permits(Severity::Debug));
        assert!(Severity::Emerg.permits(Severity::Emerg));
        assert!(!Severity::Emerg.permits(Severity::Alert));
    }

    #[test]
    fn labels_and_colors_come_from_the_table() {
        assert_eq!(Severity::Emerg.label(), "EMERG");
        assert_eq!(Severity::Err.label(), "ERR");
        assert_eq!(Severity::Debug.label(), "DEBUG");
        assert_eq!(Severity::Emerg.color(), Rgb::new(139, 0, 0));
        assert_eq!(Severity::Err.color(), Severity::Warning.color());
        assert_eq!(Severity::Debug.color(), Rgb::new(128, 0, 128));
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("emerg".parse::<Severity>().unwrap(), Severity::Emerg);
        assert_eq!("Emergency".parse::<Severity>().unwrap(), Severity::Emerg);
        assert_eq!("WARN".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("error".parse::<Severity>().unwrap(), Severity::Err);
        assert_eq!("crit".parse::<Severity>().unwrap(), Severity::Crit);
        assert!("verbose".parse::<Severity>().is_err());
        assert_eq!(Severity::Crit.to_string(), "crit");

        assert_eq!("zero".parse::<RankSelector>().unwrap(), RankSelector::Leader);
        assert_eq!("ALL".parse::<RankSelector>().unwrap(), RankSelector::All);
        assert!("some".parse::<RankSelector>().is_err());
    }

    #[test]
    fn selector_picks_ranks() {
        assert!(RankSelector::Leader.selects(0));
        assert!(!RankSelector::Leader.selects(1));
        assert!((0..16).all(|rank| RankSelector::All.selects(rank)));
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        let parsed: Severity = serde_json::from_str("\"Critical\"").unwrap();
        assert_eq!(parsed, Severity::Crit);
        let err = serde_json::from_str::<Severity>("\"loud\"").unwrap_err();
        assert!(err.to_string().contains("loud"));
    }
}
