use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::flight::{FlightRecord, FlightRecordExtractor};
use crate::xml_response::{XmlFareResponse, XmlItinerary, XmlPricing};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Charge {
    pub amount: String,
    pub currency: String,
}

/// Fare category label (e.g. `SingleAdult`) to its total charge.
pub type Payment = BTreeMap<String, Charge>;

// One priced itinerary option
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RouteRecord {
    pub onward_flights: Vec<FlightRecord>,
    pub return_flights: Vec<FlightRecord>,
    pub payment: Payment,
}

impl RouteRecord {
    pub fn is_round_trip(&self) -> bool {
        !self.return_flights.is_empty()
    }
}

pub struct ItineraryExtractor<'a> {
    config: &'a ExtractorConfig,
    flights: FlightRecordExtractor<'a>,
}

impl<'a> ItineraryExtractor<'a> {
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self {
            config,
            flights: FlightRecordExtractor::new(config),
        }
    }

    pub fn extract(&self, response: &XmlFareResponse) -> Result<Vec<RouteRecord>> {
        let itineraries = &response.priced_itineraries.itineraries;
        let mut routes = Vec::with_capacity(itineraries.len());

        for (index, itinerary) in itineraries.iter().enumerate() {
            let route = self.extract_itinerary(itinerary)?;
            debug!(
                itinerary = index,
                onward_legs = route.onward_flights.len(),
                return_legs = route.return_flights.len(),
                charges = route.payment.len(),
                "extracted itinerary"
            );
            routes.push(route);
        }

        Ok(routes)
    }

    pub fn extract_itinerary(&self, itinerary: &XmlItinerary) -> Result<RouteRecord> {
        let onward_flights = self.flights.extract_all(itinerary.onward_flights())?;
        let return_flights = self.flights.extract_all(itinerary.return_flights())?;

        let mut payment = Payment::new();
        for pricing in &itinerary.pricing {
            // a later block overwrites labels set by an earlier one
            payment.extend(self.pricing_totals(pricing));
        }

        Ok(RouteRecord {
            onward_flights,
            return_flights,
            payment,
        })
    }

    // Total charges of one pricing block; the first line per label wins
    fn pricing_totals(&self, pricing: &XmlPricing) -> Payment {
        let mut totals = Payment::new();
        for charge in &pricing.service_charges {
            if charge.charge_type != self.config.total_charge_type {
                continue;
            }
            totals.entry(charge.label.clone()).or_insert_with(|| Charge {
                amount: charge.amount.clone(),
                currency: pricing.currency.clone(),
            });
        }
        totals
    }
}
