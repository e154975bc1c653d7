//! Catalog records: subjects, their groups, and weekly sessions.
//!
//! These mirror the catalog API's JSON payloads (Spanish field names on the
//! wire) and are immutable once received. Session day and hour fields are kept
//! as raw text; resolution against the weekly grid happens at placement time so
//! that malformed sessions can be skipped instead of failing the whole subject.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Day of the teaching week (Monday to Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    #[serde(rename = "Lunes")]
    Monday,
    #[serde(rename = "Martes")]
    Tuesday,
    #[serde(rename = "Miércoles")]
    Wednesday,
    #[serde(rename = "Jueves")]
    Thursday,
    #[serde(rename = "Viernes")]
    Friday,
    #[serde(rename = "Sábado")]
    Saturday,
}

impl Day {
    /// All days in grid column order.
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Column index (0 = Monday).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Catalog label, as the API sends it.
    pub fn label(self) -> &'static str {
        match self {
            Day::Monday => "Lunes",
            Day::Tuesday => "Martes",
            Day::Wednesday => "Miércoles",
            Day::Thursday => "Jueves",
            Day::Friday => "Viernes",
            Day::Saturday => "Sábado",
        }
    }

    /// Three-letter label for narrow columns.
    pub fn short_label(self) -> &'static str {
        match self {
            Day::Monday => "Lun",
            Day::Tuesday => "Mar",
            Day::Wednesday => "Mié",
            Day::Thursday => "Jue",
            Day::Friday => "Vie",
            Day::Saturday => "Sáb",
        }
    }

    /// Resolve a catalog day label.
    ///
    /// Case and surrounding whitespace are ignored, and the unaccented
    /// spellings "Miercoles" / "Sabado" are accepted. Sunday and anything
    /// else unknown return `None`.
    pub fn resolve(label: &str) -> Option<Day> {
        match label.trim().to_lowercase().as_str() {
            "lunes" => Some(Day::Monday),
            "martes" => Some(Day::Tuesday),
            "miércoles" | "miercoles" => Some(Day::Wednesday),
            "jueves" => Some(Day::Thursday),
            "viernes" => Some(Day::Friday),
            "sábado" | "sabado" => Some(Day::Saturday),
            _ => None,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

static HOUR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2})(?::\d{2}){0,2}(?:\s*([aApP])\.?\s*[mM]\.?)?(?:\D.*)?$")
        .expect("hour pattern is a valid regex")
});

/// Parse the leading hour of `H`, `HH:MM`, `HH:MM:SS`, optionally followed by
/// an AM/PM marker or any other non-digit suffix ("8am", "08:00 PM", "8h").
///
/// Minutes and seconds are discarded. Returns `None` when the text does not
/// start with a one or two digit hour.
pub fn parse_hour(text: &str) -> Option<u32> {
    let caps = HOUR_PATTERN.captures(text)?;
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let meridiem = caps.get(2).map(|m| m.as_str().to_ascii_lowercase());
    Some(match meridiem.as_deref() {
        Some("p") if hour < 12 => hour + 12,
        Some("a") if hour == 12 => 0,
        _ => hour,
    })
}

/// A course offered by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nombre")]
    pub name: String,
    /// The detail endpoint omits credits; absent means 0.
    #[serde(rename = "creditos", default)]
    pub credits: u32,
    #[serde(rename = "docente", default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    /// Empty until the subject's detail has been fetched.
    #[serde(rename = "grupos", default)]
    pub groups: Vec<Group>,
}

impl Subject {
    /// Find a group by its section label.
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Total sessions across all groups.
    pub fn session_count(&self) -> usize {
        self.groups.iter().map(|g| g.sessions.len()).sum()
    }
}

/// A scheduled section of a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "docente", default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(rename = "cupos", default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(rename = "sesiones", default)]
    pub sessions: Vec<Session>,
}

/// One recurring weekly time block of a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "dia", default, deserialize_with = "day_text")]
    pub day: String,
    #[serde(rename = "hora_inicio", default, deserialize_with = "hour_text")]
    pub start: String,
    #[serde(rename = "hora_fin", default, deserialize_with = "hour_text")]
    pub end: String,
    #[serde(rename = "salon", default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl Session {
    pub fn resolved_day(&self) -> Option<Day> {
        Day::resolve(&self.day)
    }

    pub fn start_hour(&self) -> Option<u32> {
        parse_hour(&self.start)
    }

    pub fn end_hour(&self) -> Option<u32> {
        parse_hour(&self.end)
    }
}

/// Hours arrive as `"08:00"` strings or bare numbers. Anything else (null,
/// objects, booleans) becomes empty text, which never parses as an hour.
#[derive(Deserialize)]
#[serde(untagged)]
enum HourRepr {
    Text(String),
    Integer(i64),
    Float(f64),
    Other(IgnoredAny),
}

fn hour_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match HourRepr::deserialize(deserializer)? {
        HourRepr::Text(text) => text,
        HourRepr::Integer(n) => n.to_string(),
        HourRepr::Float(f) if f.is_finite() => (f.trunc() as i64).to_string(),
        HourRepr::Float(_) | HourRepr::Other(_) => String::new(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DayRepr {
    Text(String),
    Other(IgnoredAny),
}

/// Non-string days become empty text, which no day resolves from.
fn day_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match DayRepr::deserialize(deserializer)? {
        DayRepr::Text(text) => text,
        DayRepr::Other(_) => String::new(),
    })
}
