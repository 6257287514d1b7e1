// Extraction configuration: which flight fields are required and how they are read
use crate::error::{ProcessingError, Result};

/// How the text of a flight field is turned into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Timestamp,
}

/// One required child element of a `<Flight>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub tag: &'static str,
    pub kind: ValueKind,
}

pub const SOURCE: &str = "Source";
pub const DEPARTURE_TIMESTAMP: &str = "DepartureTimeStamp";
pub const DESTINATION: &str = "Destination";
pub const ARRIVAL_TIMESTAMP: &str = "ArrivalTimeStamp";
pub const CLASS: &str = "Class";
pub const TICKET_TYPE: &str = "TicketType";
pub const NUMBER_OF_STOPS: &str = "NumberOfStops";

pub const FLIGHT_FIELDS: [FieldSpec; 7] = [
    FieldSpec { tag: SOURCE, kind: ValueKind::Text },
    FieldSpec { tag: DEPARTURE_TIMESTAMP, kind: ValueKind::Timestamp },
    FieldSpec { tag: DESTINATION, kind: ValueKind::Text },
    FieldSpec { tag: ARRIVAL_TIMESTAMP, kind: ValueKind::Timestamp },
    FieldSpec { tag: CLASS, kind: ValueKind::Text },
    FieldSpec { tag: TICKET_TYPE, kind: ValueKind::Text },
    FieldSpec { tag: NUMBER_OF_STOPS, kind: ValueKind::Text },
];

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H%M";
pub const DEFAULT_TOTAL_CHARGE_TYPE: &str = "TotalAmount";

// Sample responses shipped with the crate (the actual files are stored in the samples directory)
pub const SAMPLE_ROUND_TRIP_PATH: &str = "samples/RS_Via-3.xml";
pub const SAMPLE_ONE_WAY_PATH: &str = "samples/RS_ViaOW.xml";
pub const SAMPLE_PATHS: [&str; 2] = [SAMPLE_ROUND_TRIP_PATH, SAMPLE_ONE_WAY_PATH];

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub fields: Vec<FieldSpec>,
    pub timestamp_format: String,
    pub total_charge_type: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            fields: FLIGHT_FIELDS.to_vec(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            total_charge_type: DEFAULT_TOTAL_CHARGE_TYPE.to_string(),
        }
    }
}

impl ExtractorConfig {
    pub fn field(&self, tag: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.tag == tag)
    }

    /// Checks that every flight record field is configured once, with the kind
    /// the record stores it as.
    pub fn validate(&self) -> Result<()> {
        for expected in &FLIGHT_FIELDS {
            match self.fields.iter().filter(|spec| spec.tag == expected.tag).count() {
                0 => {
                    return Err(ProcessingError::InvalidConfig(format!(
                        "<{}> is not configured",
                        expected.tag
                    )))
                }
                1 => {}
                _ => {
                    return Err(ProcessingError::InvalidConfig(format!(
                        "<{}> is configured more than once",
                        expected.tag
                    )))
                }
            }
            if let Some(spec) = self.field(expected.tag) {
                if spec.kind != expected.kind {
                    return Err(ProcessingError::InvalidConfig(format!(
                        "<{}> must be read as {:?}, not {:?}",
                        spec.tag, expected.kind, spec.kind
                    )));
                }
            }
        }
        if self.timestamp_format.is_empty() {
            return Err(ProcessingError::InvalidConfig(
                "timestamp format is empty".to_string(),
            ));
        }
        Ok(())
    }
}
