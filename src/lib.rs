// Air fare response summaries: XML search results folded into a key-parameter table

pub mod config;
pub mod error;
pub mod flight;
pub mod itinerary;
pub mod ordered_set;
pub mod processor;
pub mod report;
pub mod summary;
pub mod xml_response;

// Re-export key types for convenience
pub use config::{ExtractorConfig, FieldSpec, ValueKind, FLIGHT_FIELDS};
pub use error::{ProcessingError, Result};
pub use flight::{FlightRecord, FlightRecordExtractor};
pub use itinerary::{Charge, ItineraryExtractor, Payment, RouteRecord};
pub use ordered_set::OrderedSet;
pub use processor::{FareSearchProcessor, FileRoutes, FileSummary};
pub use summary::{SummaryAggregator, SummaryRecord, SummaryValue};
pub use xml_response::XmlFareResponse;
