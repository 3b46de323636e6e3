use potion::TypeError;

use crate::constants::KEY_SEPARATOR;

use super::par::extract_bar_number;

/*
Count form key

section      backbar      spirit
Bottom Bar__Backbar 3__Tito's
*/

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountKey {
    pub section: String,
    pub backbar: String,
    pub spirit: String,
}

impl CountKey {
    pub fn new(section: &str, backbar: &str, spirit: &str) -> Self {
        Self {
            section: section.to_string(),
            backbar: backbar.to_string(),
            spirit: spirit.to_string(),
        }
    }

    pub fn bar_number(&self) -> Option<u64> {
        extract_bar_number(&self.backbar)
    }
}

impl TryFrom<&str> for CountKey {
    type Error = TypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let parts: Vec<&str> = value.split(KEY_SEPARATOR).collect();

        match parts.as_slice() {
            [section, backbar, spirit] => Ok(Self::new(section, backbar, spirit)),
            _ => Err(TypeError::new("Invalid syntax; Expected section__backbar__spirit")),
        }
    }
}

impl Into<String> for &CountKey {
    fn into(self) -> String {
        [
            self.section.as_str(),
            self.backbar.as_str(),
            self.spirit.as_str(),
        ]
        .join(KEY_SEPARATOR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountEntry {
    pub key: CountKey,
    pub bar_number: u64,
    pub on_hand: u32,
}

/// Blank or non-numeric counts are skipped, not reported.
pub fn parse_on_hand(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    value.parse().ok()
}

/// Keeps the entries of a submitted count form that can be used, in
/// submission order. Entries with a malformed key, a blank or invalid
/// count, or a backbar label without a number are dropped.
pub fn parse_submission(form: &[(String, String)]) -> Vec<CountEntry> {
    let mut entries = vec![];
    let mut skipped = 0;

    for (key, value) in form {
        let entry = parse_on_hand(value).and_then(|on_hand| {
            let key = CountKey::try_from(key.as_str()).ok()?;
            let bar_number = key.bar_number()?;

            Some(CountEntry {
                key,
                bar_number,
                on_hand,
            })
        });

        match entry {
            Some(entry) => entries.push(entry),
            None => skipped += 1,
        }
    }

    log::trace!("> Parsed {} entries, skipped {}", entries.len(), skipped);
    entries
}

/// Form fields as submitted, order kept.
pub type FormData = Vec<(String, String)>;
