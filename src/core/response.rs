//! The four canned responses and how their length is reported.

use super::selector::Choice;
use serde::{Deserialize, Serialize};

/// Storage slot size of the first three responses.
pub const ANSWER_SLOT: usize = 10;

/// Storage slot size of the default response.
pub const NOT_DEFINED_SLOT: usize = 15;

/// How many bytes a read hands back for a response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthMode {
    /// The characters of the response only.
    #[default]
    Logical,

    /// The whole storage slot, zero padded after the characters.
    FixedSlot,
}

/// One immutable response payload.
///
/// The bytes are stored padded to the slot size so both length modes can
/// hand out a borrowed slice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    text: &'static str,
    slot: Box<[u8]>,
}

impl Response {
    /// Build a response stored in a slot of `slot_size` bytes.
    ///
    /// A slot smaller than the text grows to fit it.
    pub fn new(text: &'static str, slot_size: usize) -> Self {
        let mut slot = vec![0u8; slot_size.max(text.len())];
        slot[..text.len()].copy_from_slice(text.as_bytes());
        Self {
            text,
            slot: slot.into_boxed_slice(),
        }
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    pub fn slot_size(&self) -> usize {
        self.slot.len()
    }

    /// Bytes a read copies to the caller under `mode`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use selectdev::core::{LengthMode, Response};
    ///
    /// let response = Response::new("FIRST!", 10);
    /// assert_eq!(response.payload(LengthMode::Logical), b"FIRST!");
    /// assert_eq!(response.payload(LengthMode::FixedSlot), b"FIRST!\0\0\0\0");
    /// ```
    pub fn payload(&self, mode: LengthMode) -> &[u8] {
        match mode {
            LengthMode::Logical => &self.slot[..self.text.len()],
            LengthMode::FixedSlot => &self.slot,
        }
    }
}

/// The four responses of a device instance.
///
/// Built once when the instance is constructed and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseTable {
    first: Response,
    second: Response,
    third: Response,
    not_defined: Response,
}

impl ResponseTable {
    pub fn new() -> Self {
        Self {
            first: Response::new("FIRST!", ANSWER_SLOT),
            second: Response::new("SECOND!", ANSWER_SLOT),
            third: Response::new("THIRD!", ANSWER_SLOT),
            not_defined: Response::new("NOT DEFINED!", NOT_DEFINED_SLOT),
        }
    }

    /// Look up the response for a choice (pure).
    pub fn for_choice(&self, choice: Choice) -> &Response {
        match choice {
            Choice::First => &self.first,
            Choice::Second => &self.second,
            Choice::Third => &self.third,
            Choice::Undefined => &self.not_defined,
        }
    }

    /// All responses, paired with the choice that selects them.
    pub fn entries(&self) -> [(Choice, &Response); 4] {
        [
            (Choice::First, &self.first),
            (Choice::Second, &self.second),
            (Choice::Third, &self.third),
            (Choice::Undefined, &self.not_defined),
        ]
    }
}

impl Default for ResponseTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_holds_the_canned_texts() {
        let table = ResponseTable::new();
        assert_eq!(table.for_choice(Choice::First).text(), "FIRST!");
        assert_eq!(table.for_choice(Choice::Second).text(), "SECOND!");
        assert_eq!(table.for_choice(Choice::Third).text(), "THIRD!");
        assert_eq!(table.for_choice(Choice::Undefined).text(), "NOT DEFINED!");
    }

    #[test]
    fn logical_lengths_are_character_counts() {
        let table = ResponseTable::new();
        let lengths: Vec<usize> = table
            .entries()
            .iter()
            .map(|(_, r)| r.payload(LengthMode::Logical).len())
            .collect();
        assert_eq!(lengths, vec![6, 7, 6, 12]);
    }

    #[test]
    fn fixed_slot_lengths_match_storage_sizes() {
        let table = ResponseTable::new();
        let lengths: Vec<usize> = table
            .entries()
            .iter()
            .map(|(_, r)| r.payload(LengthMode::FixedSlot).len())
            .collect();
        assert_eq!(lengths, vec![10, 10, 10, 15]);
    }

    #[test]
    fn fixed_slot_is_zero_padded() {
        let table = ResponseTable::new();
        let payload = table
            .for_choice(Choice::Undefined)
            .payload(LengthMode::FixedSlot);
        assert_eq!(&payload[..12], b"NOT DEFINED!");
        assert!(payload[12..].iter().all(|&b| b == 0));
    }

    #[test]
    fn slot_grows_to_fit_text() {
        let response = Response::new("LONGER THAN SLOT", 4);
        assert_eq!(response.slot_size(), 16);
        assert_eq!(response.payload(LengthMode::FixedSlot), b"LONGER THAN SLOT");
    }

    #[test]
    fn length_mode_defaults_to_logical() {
        assert_eq!(LengthMode::default(), LengthMode::Logical);
    }
}
