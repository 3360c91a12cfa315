use std::collections::BTreeMap;

/// A single inventory question, associated with exactly one category.
///
/// The item bank is seed data: created once in the data service, never
/// mutated or deleted here. `category` stays raw here and is validated at
/// scoring time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: u64,
    pub text: String,
    pub category: u8,
    pub position: u32,
}

/// Answers collected so far, keyed by item id. Values are ordinal answer
/// positions starting at 1.
pub type ResponseSet = BTreeMap<u64, u8>;

/// The ordinal answer range of the inventory version in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerScale {
    /// 1-4: the original inventory.
    FourPoint,
    /// 1-5: the extended inventory revision.
    FivePoint,
}

impl AnswerScale {
    pub fn from_max(max: u8) -> Option<Self> {
        match max {
            4 => Some(AnswerScale::FourPoint),
            5 => Some(AnswerScale::FivePoint),
            _ => None,
        }
    }

    pub fn max(self) -> u8 {
        match self {
            AnswerScale::FourPoint => 4,
            AnswerScale::FivePoint => 5,
        }
    }

    pub fn contains(self, value: u8) -> bool {
        (1..=self.max()).contains(&value)
    }

    /// Display labels, index 0 = answer value 1.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            AnswerScale::FourPoint => {
                &["Rarely true", "Somewhat true", "Generally true", "Very true"]
            }
            AnswerScale::FivePoint => &[
                "Rarely true",
                "Occasionally true",
                "Somewhat true",
                "Generally true",
                "Very true",
            ],
        }
    }
}
