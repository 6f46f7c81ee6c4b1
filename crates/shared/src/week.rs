use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// School days, in the order every menu and log row is laid out.
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
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    #[strum(serialize = "lunes")]
    Lunes,
    #[strum(serialize = "martes")]
    Martes,
    #[strum(to_string = "miercoles", serialize = "miércoles")]
    #[serde(alias = "miércoles")]
    Miercoles,
    #[strum(serialize = "jueves")]
    Jueves,
    #[strum(serialize = "viernes")]
    Viernes,
}

impl Weekday {
    pub const COUNT: usize = 5;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::VARIANTS.get(index).copied()
    }

    pub fn all() -> &'static [Weekday] {
        Self::VARIANTS
    }

    /// Label used in report rows.
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Lunes => "Lunes",
            Weekday::Martes => "Martes",
            Weekday::Miercoles => "Miércoles",
            Weekday::Jueves => "Jueves",
            Weekday::Viernes => "Viernes",
        }
    }
}

/// The three recipe slots served each day.
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
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum MealSlot {
    #[strum(serialize = "principal")]
    #[serde(rename = "principal")]
    Principal,
    #[strum(to_string = "acompañamiento", serialize = "acompanamiento")]
    #[serde(rename = "acompañamiento", alias = "acompanamiento")]
    Acompanamiento,
    #[strum(serialize = "postre")]
    #[serde(rename = "postre")]
    Postre,
}

impl MealSlot {
    pub fn all() -> &'static [MealSlot] {
        Self::VARIANTS
    }

    pub fn label(self) -> &'static str {
        match self {
            MealSlot::Principal => "Principal",
            MealSlot::Acompanamiento => "Acompañamiento",
            MealSlot::Postre => "Postre",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown day '{0}', expected 'semana' or a weekday")]
pub struct UnknownDay(pub String);

/// Which days an order covers: the whole week or a single day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayFilter {
    #[default]
    Week,
    Day(Weekday),
}

impl DayFilter {
    pub fn days(&self) -> &[Weekday] {
        match self {
            DayFilter::Week => Weekday::VARIANTS,
            DayFilter::Day(day) => std::slice::from_ref(day),
        }
    }
}

impl FromStr for DayFilter {
    type Err = UnknownDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("semana") {
            return Ok(DayFilter::Week);
        }

        Weekday::from_str(trimmed)
            .map(DayFilter::Day)
            .map_err(|_| UnknownDay(s.to_owned()))
    }
}

impl TryFrom<String> for DayFilter {
    type Error = UnknownDay;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayFilter> for String {
    fn from(value: DayFilter) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::Week => f.write_str("semana"),
            DayFilter::Day(day) => write!(f, "{day}"),
        }
    }
}
