use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// The seven fixed day slots of a week plan, Monday first.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Position in the week, Monday = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Day::Monday => "Måndag",
            Day::Tuesday => "Tisdag",
            Day::Wednesday => "Onsdag",
            Day::Thursday => "Torsdag",
            Day::Friday => "Fredag",
            Day::Saturday => "Lördag",
            Day::Sunday => "Söndag",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_order() {
        assert_eq!(Day::VARIANTS.len(), 7);
        for (i, day) in Day::VARIANTS.iter().enumerate() {
            assert_eq!(day.index(), i);
        }
    }

    #[test]
    fn test_day_parse() {
        assert_eq!("monday".parse::<Day>().ok(), Some(Day::Monday));
        assert_eq!("SUNDAY".parse::<Day>().ok(), Some(Day::Sunday));
        assert!("someday".parse::<Day>().is_err());
        assert_eq!(Day::Saturday.label(), "Lördag");
    }
}
