use crate::config::{self, ExtractorConfig, ValueKind};
use crate::error::{ProcessingError, Result};
use crate::xml_response::XmlFlight;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

// One flight leg, normalized from a <Flight> element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightRecord {
    pub source: String,
    pub departure_timestamp: NaiveDateTime,
    pub destination: String,
    pub arrival_timestamp: NaiveDateTime,
    pub class: String,
    pub ticket_type: String,
    pub number_of_stops: String,
}

#[derive(Debug)]
enum FieldValue {
    Text(String),
    Timestamp(NaiveDateTime),
}

// Values read from one element, keyed by tag
#[derive(Debug, Default)]
struct FieldValues {
    values: HashMap<&'static str, FieldValue>,
}

impl FieldValues {
    fn take_text(&mut self, tag: &'static str) -> Result<String> {
        match self.values.remove(tag) {
            Some(FieldValue::Text(text)) => Ok(text),
            Some(FieldValue::Timestamp(_)) => Err(wrong_kind(tag, ValueKind::Text)),
            None => Err(not_configured(tag)),
        }
    }

    fn take_timestamp(&mut self, tag: &'static str) -> Result<NaiveDateTime> {
        match self.values.remove(tag) {
            Some(FieldValue::Timestamp(ts)) => Ok(ts),
            Some(FieldValue::Text(_)) => Err(wrong_kind(tag, ValueKind::Timestamp)),
            None => Err(not_configured(tag)),
        }
    }
}

fn not_configured(tag: &str) -> ProcessingError {
    ProcessingError::InvalidConfig(format!("<{tag}> is not configured"))
}

fn wrong_kind(tag: &str, expected: ValueKind) -> ProcessingError {
    ProcessingError::InvalidConfig(format!("<{tag}> must be read as {expected:?}"))
}

pub fn parse_timestamp(tag: &'static str, text: &str, format: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, format).map_err(|source| {
        ProcessingError::MalformedTimestamp {
            tag,
            value: text.to_string(),
            source,
        }
    })
}

pub struct FlightRecordExtractor<'a> {
    config: &'a ExtractorConfig,
}

impl<'a> FlightRecordExtractor<'a> {
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn extract(&self, flight: &XmlFlight) -> Result<FlightRecord> {
        let mut values = FieldValues::default();

        for spec in &self.config.fields {
            let text = flight
                .child_text(spec.tag)
                .ok_or(ProcessingError::MissingField { tag: spec.tag })?;
            let value = match spec.kind {
                ValueKind::Text => FieldValue::Text(text.trim().to_string()),
                ValueKind::Timestamp => FieldValue::Timestamp(parse_timestamp(
                    spec.tag,
                    text,
                    &self.config.timestamp_format,
                )?),
            };
            values.values.insert(spec.tag, value);
        }

        Ok(FlightRecord {
            source: values.take_text(config::SOURCE)?,
            departure_timestamp: values.take_timestamp(config::DEPARTURE_TIMESTAMP)?,
            destination: values.take_text(config::DESTINATION)?,
            arrival_timestamp: values.take_timestamp(config::ARRIVAL_TIMESTAMP)?,
            class: values.take_text(config::CLASS)?,
            ticket_type: values.take_text(config::TICKET_TYPE)?,
            number_of_stops: values.take_text(config::NUMBER_OF_STOPS)?,
        })
    }

    pub fn extract_all<'x>(
        &self,
        flights: impl IntoIterator<Item = &'x XmlFlight>,
    ) -> Result<Vec<FlightRecord>> {
        flights.into_iter().map(|flight| self.extract(flight)).collect()
    }
}
