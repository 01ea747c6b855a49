//! Flight metadata extraction from KML annotation documents.
//!
//! The KML exports of the tracking site embed an HTML description balloon.
//! Nothing about it is schema-validated; each field is found by its own
//! pattern anywhere in the document, and the first match wins.
//!
//! Aircraft details come in two layouts:
//!
//! * [`AircraftLayout::Inline`]: `Aircraft: Airbus A321-131 (D-AIRP)`
//! * [`AircraftLayout::Labeled`]: separate `Aircraft<br><span>..</span>` and
//!   `Registration<br><span><a>..</a></span>` blocks
//!
//! Inline is tried first. Whatever it leaves empty is then filled from the
//! labeled layout, field by field.

use crate::models::FlightMetadata;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PATTERNS: Result<MetadataPatterns, regex::Error> = MetadataPatterns::compile();
}

struct MetadataPatterns {
    link: Regex,
    flight_number: Regex,
    airline: Regex,
    inline_aircraft: Regex,
    labeled_model: Regex,
    labeled_registration: Regex,
}

impl MetadataPatterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            link: Regex::new(r#"href="(https?://www\.flightradar24\.com/flight/[^"]+)""#)?,
            flight_number: Regex::new(r"<name>([A-Z0-9]+)/[A-Z0-9]+</name>")?,
            airline: Regex::new(r"<br/>([A-Za-z0-9 ]+)</div>")?,
            inline_aircraft: Regex::new(r"Aircraft:[ \t]*([^()<>\r\n]+?)[ \t]*\(([^()<>\r\n]+)\)")?,
            labeled_model: Regex::new(r"(?is)Aircraft.*?<br>\s*<span[^>]*>(.*?)</span>")?,
            labeled_registration: Regex::new(
                r"(?is)Registration<br>\s*<span[^>]*>\s*<a[^>]*>(.*?)</a>",
            )?,
        })
    }
}

/// The two document layouts carrying aircraft model and registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AircraftLayout {
    /// `Aircraft: <model> (<registration>)` on a single line
    Inline,
    /// Separately labeled model and registration blocks
    Labeled,
}

impl AircraftLayout {
    /// Order in which layouts are consulted.
    pub const PRIORITY: [AircraftLayout; 2] = [AircraftLayout::Inline, AircraftLayout::Labeled];

    fn extract(self, patterns: &MetadataPatterns, document: &str) -> AircraftFields {
        match self {
            AircraftLayout::Inline => match patterns.inline_aircraft.captures(document) {
                Some(caps) => AircraftFields {
                    model: capture(&caps, 1),
                    registration: capture(&caps, 2),
                },
                None => AircraftFields::default(),
            },
            AircraftLayout::Labeled => AircraftFields {
                model: first_capture(&patterns.labeled_model, document),
                registration: first_capture(&patterns.labeled_registration, document),
            },
        }
    }
}

#[derive(Debug, Default)]
struct AircraftFields {
    model: Option<String>,
    registration: Option<String>,
}

/// Extract flight metadata from a KML annotation document.
///
/// Never fails: fields that can't be found are empty strings, and if the
/// extractor itself is unusable the whole result is empty.
pub fn extract_metadata(document: &str) -> FlightMetadata {
    match &*PATTERNS {
        Ok(patterns) => extract_with(patterns, document),
        Err(err) => {
            tracing::warn!("Metadata patterns failed to compile: {}", err);
            FlightMetadata::default()
        }
    }
}

fn extract_with(patterns: &MetadataPatterns, document: &str) -> FlightMetadata {
    let mut model = String::new();
    let mut registration = String::new();

    for layout in AircraftLayout::PRIORITY {
        if !model.is_empty() && !registration.is_empty() {
            break;
        }
        let found = layout.extract(patterns, document);
        if model.is_empty() {
            if let Some(value) = found.model {
                tracing::debug!(?layout, "aircraft model found");
                model = value;
            }
        }
        if registration.is_empty() {
            if let Some(value) = found.registration {
                tracing::debug!(?layout, "registration found");
                registration = value;
            }
        }
    }

    let metadata = FlightMetadata {
        airline: first_capture(&patterns.airline, document).unwrap_or_default(),
        flight_number: first_capture(&patterns.flight_number, document).unwrap_or_default(),
        aircraft_model: model,
        registration,
        external_link_url: first_capture(&patterns.link, document).unwrap_or_default(),
    };

    if metadata.is_empty() {
        tracing::debug!("no metadata found in annotation document");
    }
    metadata
}

fn first_capture(re: &Regex, document: &str) -> Option<String> {
    re.captures(document).and_then(|caps| capture(&caps, 1))
}

/// Trimmed capture group, `None` when missing or blank.
fn capture(caps: &regex::Captures<'_>, group: usize) -> Option<String> {
    caps.get(group)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
