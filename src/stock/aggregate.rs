use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

use crate::constants::CASE_SIZE;

use super::{count::CountEntry, par::get_par};

pub type SpiritNeeds = BTreeMap<String, u32>;
pub type PerBarNeeds = BTreeMap<BarKey, SpiritNeeds>;
pub type PairedDisplay = BTreeMap<PairKey, BTreeMap<String, Quantity>>;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BarKey {
    pub section: String,
    pub bar_number: u64,
}

/// Two adjacent backbars restocked together: 1 & 2, 3 & 4, ...
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    pub section: String,
    pub low: i128,
    pub high: i128,
}

impl PairKey {
    pub fn from_bar(section: &str, bar_number: u64) -> Self {
        let n = i128::from(bar_number);
        let (low, high) = if n % 2 == 1 { (n, n + 1) } else { (n - 1, n) };

        Self {
            section: section.to_string(),
            low,
            high,
        }
    }

    pub fn label(&self) -> String {
        format!("{} & {}", self.low, self.high)
    }
}

impl Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.section, self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quantity {
    pub boxes: u32,
    pub bottles: u32,
}

impl Quantity {
    pub fn from_bottles(total: u32) -> Self {
        Self {
            boxes: total / CASE_SIZE,
            bottles: total % CASE_SIZE,
        }
    }

    pub fn total(&self) -> u32 {
        self.boxes * CASE_SIZE + self.bottles
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let boxes = if self.boxes == 1 { "box" } else { "boxes" };
        let bottles = if self.bottles == 1 { "bottle" } else { "bottles" };
        write!(f, "{} {boxes}, {} {bottles}", self.boxes, self.bottles)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Aggregate {
    pub per_bar: PerBarNeeds,
    pub paired: PairedDisplay,
}

pub fn need(par: u32, on_hand: u32) -> u32 {
    par.saturating_sub(on_hand)
}

pub fn per_bar_needs(entries: &[CountEntry]) -> PerBarNeeds {
    let mut needs = PerBarNeeds::new();

    for entry in entries {
        let key = &entry.key;
        let par = get_par(&key.section, &key.backbar, &key.spirit);

        needs
            .entry(BarKey {
                section: key.section.clone(),
                bar_number: entry.bar_number,
            })
            .or_default()
            .insert(key.spirit.clone(), need(par, entry.on_hand));
    }

    needs
}

pub fn pair_needs(per_bar: &PerBarNeeds) -> BTreeMap<PairKey, SpiritNeeds> {
    let mut paired: BTreeMap<PairKey, SpiritNeeds> = BTreeMap::new();

    for (bar, spirits) in per_bar {
        let bucket = paired
            .entry(PairKey::from_bar(&bar.section, bar.bar_number))
            .or_default();

        for (spirit, need) in spirits {
            *bucket.entry(spirit.clone()).or_insert(0) += need;
        }
    }

    paired
}

pub fn to_display(paired: BTreeMap<PairKey, SpiritNeeds>) -> PairedDisplay {
    paired
        .into_iter()
        .map(|(pair, spirits)| {
            let spirits = spirits
                .into_iter()
                .map(|(spirit, total)| (spirit, Quantity::from_bottles(total)))
                .collect();

            (pair, spirits)
        })
        .collect()
}

/// Per-bar shortfalls for on-screen display, and the same shortfalls
/// summed per backbar pair and converted to boxes for the report.
pub fn aggregate(entries: &[CountEntry]) -> Aggregate {
    let per_bar = per_bar_needs(entries);
    let paired = to_display(pair_needs(&per_bar));

    Aggregate { per_bar, paired }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stock::count::CountKey;

    fn entry(section: &str, backbar: &str, spirit: &str, on_hand: u32) -> CountEntry {
        let key = CountKey::new(section, backbar, spirit);
        let bar_number = key.bar_number().unwrap();

        CountEntry {
            key,
            bar_number,
            on_hand,
        }
    }

    #[test]
    fn need_never_goes_negative() {
        assert_eq!(need(4, 1), 3);
        assert_eq!(need(4, 4), 0);
        assert_eq!(need(4, 9), 0);
    }

    #[test]
    fn odd_bars_start_a_pair() {
        for k in (1..40).step_by(2) {
            let odd = PairKey::from_bar("Top Bar", k);
            let even = PairKey::from_bar("Top Bar", k + 1);
            assert_eq!(odd, even);
            assert_eq!(odd.label(), format!("{} & {}", k, k + 1));
        }

        assert_eq!(PairKey::from_bar("Top Bar", 0).label(), "-1 & 0");
    }

    #[test]
    fn quantity_splits_into_cases() {
        for x in 0..100 {
            let q = Quantity::from_bottles(x);
            assert!(q.bottles < CASE_SIZE);
            assert_eq!(q.boxes * CASE_SIZE + q.bottles, x);
            assert_eq!(q.total(), x);
        }

        assert_eq!(Quantity::from_bottles(8).to_string(), "1 box, 2 bottles");
    }

    #[test]
    fn pair_sums_both_bars() {
        let entries = vec![
            entry("Bottom Bar", "Backbar 3", "Tito's", 1),
            entry("Bottom Bar", "Backbar 4", "Tito's", 0),
            entry("Bottom Bar", "Backbar 4", "Corky's Apple", 1),
            entry("Top Bar", "Backbar 3", "Tito's", 0),
        ];

        let result = aggregate(&entries);
        assert_eq!(result.per_bar.len(), 3);

        let bottom = PairKey::from_bar("Bottom Bar", 3);
        let spirits = &result.paired[&bottom];
        assert_eq!(spirits["Tito's"], Quantity::from_bottles(7));
        assert_eq!(spirits["Corky's Apple"], Quantity::from_bottles(2));

        let top = PairKey::from_bar("Top Bar", 4);
        assert_eq!(result.paired[&top]["Tito's"], Quantity::from_bottles(4));
    }

    #[test]
    fn later_duplicate_overwrites_earlier() {
        let entries = vec![
            entry("Bottom Bar", "Backbar 1", "Tito's", 0),
            entry("Bottom Bar", "Backbar 1", "Tito's", 3),
        ];

        let result = aggregate(&entries);
        let bar = BarKey {
            section: "Bottom Bar".to_string(),
            bar_number: 1,
        };
        assert_eq!(result.per_bar[&bar]["Tito's"], 1);
    }

    #[test]
    fn aggregate_is_repeatable() {
        let entries = vec![
            entry("Top Bar", "Backbar 5", "Captain Morgans Spiced", 2),
            entry("Top Bar", "Backbar 6A", "Malibu", 1),
            entry("Downstairs", "Backbar 2", "Absolut Vanilla", 0),
        ];

        assert_eq!(aggregate(&entries), aggregate(&entries));
    }
}
