use crate::config;
use crate::error::ProcessingError;
use serde::Deserialize;

// Structures for XML deserialization of an air fare search response.
// Elements and attributes not listed here are ignored.
#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
#[serde(rename = "AirFareSearchResponse")]
pub struct XmlFareResponse {
    pub priced_itineraries: XmlPricedItineraries,
}

impl XmlFareResponse {
    pub fn parse(xml: &str) -> Result<Self, ProcessingError> {
        quick_xml::de::from_str(xml).map_err(|e| ProcessingError::DocumentParse(e.to_string()))
    }
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlPricedItineraries {
    #[serde(rename = "Flights")]
    pub itineraries: Vec<XmlItinerary>,
}

// Repeated elements are collected as lists: legs of every matching block are
// concatenated in document order, and a repeated flight field reads as its first value.
#[derive(Debug, PartialEq, Default, Deserialize, Clone)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlItinerary {
    #[serde(rename = "OnwardPricedItinerary")]
    pub onward_priced_itinerary: Vec<XmlLegs>,
    #[serde(rename = "ReturnPricedItinerary")]
    pub return_priced_itinerary: Vec<XmlLegs>,
    #[serde(rename = "Pricing")]
    pub pricing: Vec<XmlPricing>,
}

impl XmlItinerary {
    /// `OnwardPricedItinerary/Flights/Flight` elements, in document order.
    pub fn onward_flights(&self) -> Vec<&XmlFlight> {
        collect_flights(&self.onward_priced_itinerary)
    }

    /// `ReturnPricedItinerary/Flights/Flight` elements, in document order.
    pub fn return_flights(&self) -> Vec<&XmlFlight> {
        collect_flights(&self.return_priced_itinerary)
    }
}

fn collect_flights(blocks: &[XmlLegs]) -> Vec<&XmlFlight> {
    blocks
        .iter()
        .flat_map(|legs| legs.flights.iter())
        .flat_map(|flights| flights.flights.iter())
        .collect()
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlLegs {
    #[serde(rename = "Flights")]
    pub flights: Vec<XmlFlights>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlFlights {
    #[serde(rename = "Flight")]
    pub flights: Vec<XmlFlight>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlFlight {
    #[serde(rename = "Source")]
    pub source: Vec<String>,
    #[serde(rename = "DepartureTimeStamp")]
    pub departure_time_stamp: Vec<String>,
    #[serde(rename = "Destination")]
    pub destination: Vec<String>,
    #[serde(rename = "ArrivalTimeStamp")]
    pub arrival_time_stamp: Vec<String>,
    #[serde(rename = "Class")]
    pub class: Vec<String>,
    #[serde(rename = "TicketType")]
    pub ticket_type: Vec<String>,
    #[serde(rename = "NumberOfStops")]
    pub number_of_stops: Vec<String>,
}

impl XmlFlight {
    /// Text of the first child element named `tag`, if any was present.
    pub fn child_text(&self, tag: &str) -> Option<&str> {
        let values = match tag {
            config::SOURCE => &self.source,
            config::DEPARTURE_TIMESTAMP => &self.departure_time_stamp,
            config::DESTINATION => &self.destination,
            config::ARRIVAL_TIMESTAMP => &self.arrival_time_stamp,
            config::CLASS => &self.class,
            config::TICKET_TYPE => &self.ticket_type,
            config::NUMBER_OF_STOPS => &self.number_of_stops,
            _ => return None,
        };
        values.first().map(String::as_str)
    }
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlPricing {
    #[serde(rename = "@currency")]
    pub currency: String,
    #[serde(rename = "ServiceCharges")]
    pub service_charges: Vec<XmlServiceCharge>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlServiceCharge {
    #[serde(rename = "@type")]
    pub label: String,
    #[serde(rename = "@ChargeType")]
    pub charge_type: String,
    #[serde(rename = "$value")]
    pub amount: String,
}
