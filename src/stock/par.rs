use std::sync::OnceLock;

use regex::Regex;

use crate::constants::{
    AU_PREFIX, BOTTOM_BAR_SECTIONS, CORKYS, DEFAULT_PAR, TOP_BAR_HIGH_VOLUME, TOP_BAR_MID_VOLUME,
    TOP_BAR_SECTION, VANILLA,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionClass {
    BottomBar,
    TopBar,
    Other,
}

impl From<&str> for SectionClass {
    fn from(value: &str) -> Self {
        if BOTTOM_BAR_SECTIONS.contains(&value) {
            Self::BottomBar
        } else if value == TOP_BAR_SECTION {
            Self::TopBar
        } else {
            Self::Other
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum SectionMatch {
    Any,
    Class(SectionClass),
}

#[derive(Clone, Copy, Debug)]
pub enum BarMatch {
    Any,
    Number(u64),
}

#[derive(Clone, Copy, Debug)]
pub enum SpiritMatch {
    Any,
    OneOf(&'static [&'static str]),
    /// Either an "AU " product or one of the listed names.
    AuOr(&'static [&'static str]),
}

#[derive(Clone, Copy, Debug)]
pub struct ParRule {
    pub section: SectionMatch,
    pub bar: BarMatch,
    pub spirit: SpiritMatch,
    pub par: u32,
}

/* evaluated top to bottom, first match wins, DEFAULT_PAR otherwise */
pub const PAR_RULES: &[ParRule] = &[
    ParRule {
        section: SectionMatch::Any,
        bar: BarMatch::Any,
        spirit: SpiritMatch::OneOf(VANILLA),
        par: 2,
    },
    ParRule {
        section: SectionMatch::Class(SectionClass::BottomBar),
        bar: BarMatch::Number(4),
        spirit: SpiritMatch::OneOf(CORKYS),
        par: 3,
    },
    ParRule {
        section: SectionMatch::Class(SectionClass::BottomBar),
        bar: BarMatch::Any,
        spirit: SpiritMatch::Any,
        par: 4,
    },
    ParRule {
        section: SectionMatch::Class(SectionClass::TopBar),
        bar: BarMatch::Number(5),
        spirit: SpiritMatch::OneOf(TOP_BAR_HIGH_VOLUME),
        par: 10,
    },
    ParRule {
        section: SectionMatch::Class(SectionClass::TopBar),
        bar: BarMatch::Number(5),
        spirit: SpiritMatch::AuOr(TOP_BAR_MID_VOLUME),
        par: 5,
    },
    ParRule {
        section: SectionMatch::Class(SectionClass::TopBar),
        bar: BarMatch::Number(5),
        spirit: SpiritMatch::Any,
        par: 3,
    },
    ParRule {
        section: SectionMatch::Class(SectionClass::TopBar),
        bar: BarMatch::Number(6),
        spirit: SpiritMatch::Any,
        par: 5,
    },
];

impl ParRule {
    pub fn matches(&self, section: SectionClass, bar: Option<u64>, spirit: &str) -> bool {
        let section_ok = match self.section {
            SectionMatch::Any => true,
            SectionMatch::Class(class) => class == section,
        };
        let bar_ok = match self.bar {
            BarMatch::Any => true,
            BarMatch::Number(n) => bar == Some(n),
        };
        let spirit_ok = match self.spirit {
            SpiritMatch::Any => true,
            SpiritMatch::OneOf(names) => names.contains(&spirit),
            SpiritMatch::AuOr(names) => is_au(spirit) || names.contains(&spirit),
        };

        section_ok && bar_ok && spirit_ok
    }
}

fn bar_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+").expect("static pattern"))
}

/// First run of digits in a backbar label, e.g. `"Backbar 6A"` -> `6`.
pub fn extract_bar_number(backbar_label: &str) -> Option<u64> {
    bar_number_pattern()
        .find(backbar_label)
        .and_then(|m| m.as_str().parse().ok())
}

pub fn is_au(spirit: &str) -> bool {
    spirit.starts_with(AU_PREFIX)
}

/// Target on-hand quantity for a spirit on a backbar.
///
/// Unknown sections and labels without a number never fail, they fall
/// through to [`DEFAULT_PAR`].
pub fn get_par(section: &str, backbar_label: &str, spirit: &str) -> u32 {
    let class = SectionClass::from(section);
    let bar = extract_bar_number(backbar_label);

    PAR_RULES
        .iter()
        .find(|rule| rule.matches(class, bar, spirit))
        .map(|rule| rule.par)
        .unwrap_or(DEFAULT_PAR)
}
