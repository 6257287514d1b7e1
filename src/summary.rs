use crate::error::{ProcessingError, Result};
use crate::itinerary::RouteRecord;
use crate::ordered_set::OrderedSet;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

pub const SUMMARY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

// Aggregated view over all routes of one response file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SummaryRecord {
    pub route: OrderedSet<String>,
    pub leaving_onward_from: Option<NaiveDateTime>,
    /// Latest first-leg onward departure seen (a maximum despite the name).
    pub leaving_onward_to: Option<NaiveDateTime>,
    pub onward_class: OrderedSet<String>,
    pub onward_ticket_type: OrderedSet<String>,
    /// Earliest departure of the last return leg.
    pub arriving_return_from: Option<NaiveDateTime>,
    pub arriving_return_to: Option<NaiveDateTime>,
    pub return_class: OrderedSet<String>,
    pub return_ticket_type: OrderedSet<String>,
}

/// A summary value as handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SummaryValue<'a> {
    Timestamp(Option<NaiveDateTime>),
    Set(&'a OrderedSet<String>),
}

impl fmt::Display for SummaryValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryValue::Timestamp(Some(ts)) => write!(f, "{}", ts.format(SUMMARY_TIMESTAMP_FORMAT)),
            SummaryValue::Timestamp(None) => Ok(()),
            SummaryValue::Set(set) => write!(f, "{}", set),
        }
    }
}

fn earliest(current: Option<NaiveDateTime>, candidate: NaiveDateTime) -> Option<NaiveDateTime> {
    Some(current.map_or(candidate, |ts| ts.min(candidate)))
}

fn latest(current: Option<NaiveDateTime>, candidate: NaiveDateTime) -> Option<NaiveDateTime> {
    Some(current.map_or(candidate, |ts| ts.max(candidate)))
}

impl SummaryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// One step of the aggregation fold: the summary of every route seen so
    /// far plus `route`.
    pub fn fold(mut self, route: &RouteRecord) -> Result<Self> {
        let (first, last) = match (route.onward_flights.first(), route.onward_flights.last()) {
            (Some(first), Some(last)) => (first, last),
            // position is filled in by `SummaryAggregator::aggregate`
            _ => return Err(ProcessingError::EmptyOnwardLegs { itinerary: 0 }),
        };

        self.route
            .insert(format!("{} - {}", first.source, last.destination));
        self.leaving_onward_from = earliest(self.leaving_onward_from, first.departure_timestamp);
        self.leaving_onward_to = latest(self.leaving_onward_to, first.departure_timestamp);
        self.onward_class.insert(first.class.clone());
        self.onward_ticket_type.insert(first.ticket_type.clone());

        if let (Some(first), Some(last)) = (route.return_flights.first(), route.return_flights.last()) {
            // last return leg's departure, not its arrival
            self.arriving_return_from = earliest(self.arriving_return_from, last.departure_timestamp);
            self.arriving_return_to = latest(self.arriving_return_to, last.departure_timestamp);
            self.return_class.insert(first.class.clone());
            self.return_ticket_type.insert(first.ticket_type.clone());
        }

        Ok(self)
    }

    pub fn has_return(&self) -> bool {
        self.arriving_return_from.is_some()
    }

    /// Ordered `KEY_PARAMETERS -> VALUE` mapping in field order.
    pub fn entries(&self) -> Vec<(&'static str, SummaryValue<'_>)> {
        vec![
            ("route", SummaryValue::Set(&self.route)),
            ("leaving_onward_from", SummaryValue::Timestamp(self.leaving_onward_from)),
            ("leaving_onward_to", SummaryValue::Timestamp(self.leaving_onward_to)),
            ("onward_class", SummaryValue::Set(&self.onward_class)),
            ("onward_ticket_type", SummaryValue::Set(&self.onward_ticket_type)),
            ("arriving_return_from", SummaryValue::Timestamp(self.arriving_return_from)),
            ("arriving_return_to", SummaryValue::Timestamp(self.arriving_return_to)),
            ("return_class", SummaryValue::Set(&self.return_class)),
            ("return_ticket_type", SummaryValue::Set(&self.return_ticket_type)),
        ]
    }
}

pub struct SummaryAggregator;

impl SummaryAggregator {
    /// Folds `routes` left to right, starting from an empty summary.
    pub fn aggregate<'r, I>(routes: I) -> Result<SummaryRecord>
    where
        I: IntoIterator<Item = &'r RouteRecord>,
    {
        routes
            .into_iter()
            .enumerate()
            .try_fold(SummaryRecord::new(), |summary, (index, route)| {
                summary.fold(route).map_err(|err| match err {
                    ProcessingError::EmptyOnwardLegs { .. } => {
                        ProcessingError::EmptyOnwardLegs { itinerary: index }
                    }
                    other => other,
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::FlightRecord;
    use chrono::NaiveDate;

    fn ts(text: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H%M").unwrap()
    }

    fn leg(source: &str, destination: &str, departure: &str, class: &str, ticket: &str) -> FlightRecord {
        FlightRecord {
            source: source.to_string(),
            departure_timestamp: ts(departure),
            destination: destination.to_string(),
            arrival_timestamp: ts(departure),
            class: class.to_string(),
            ticket_type: ticket.to_string(),
            number_of_stops: "0".to_string(),
        }
    }

    fn one_way(legs: Vec<FlightRecord>) -> RouteRecord {
        RouteRecord {
            onward_flights: legs,
            ..RouteRecord::default()
        }
    }

    fn assert_no_return(summary: &SummaryRecord) {
        assert_eq!(summary.arriving_return_from, None);
        assert_eq!(summary.arriving_return_to, None);
        assert!(summary.return_class.is_empty());
        assert!(summary.return_ticket_type.is_empty());
        assert!(!summary.has_return());
    }

    #[test]
    fn test_single_onward_route() {
        let routes = vec![one_way(vec![leg("LON", "PAR", "2023-06-01T0930", "M", "XLV")])];
        let summary = SummaryAggregator::aggregate(&routes).unwrap();

        let expected = NaiveDate::from_ymd_opt(2023, 6, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(summary.route.as_slice(), &["LON - PAR".to_string()]);
        assert_eq!(summary.leaving_onward_from, Some(expected));
        assert_eq!(summary.leaving_onward_to, Some(expected));
        assert_eq!(summary.onward_class.as_slice(), &["M".to_string()]);
        assert_eq!(summary.onward_ticket_type.as_slice(), &["XLV".to_string()]);
        assert_no_return(&summary);
    }

    #[test]
    fn test_onward_departure_extrema() {
        let routes = vec![
            one_way(vec![leg("LON", "PAR", "2023-06-01T0930", "M", "E")]),
            one_way(vec![leg("LON", "PAR", "2023-06-02T0800", "M", "E")]),
        ];
        let summary = SummaryAggregator::aggregate(&routes).unwrap();
        assert_eq!(summary.leaving_onward_from, Some(ts("2023-06-01T0930")));
        assert_eq!(summary.leaving_onward_to, Some(ts("2023-06-02T0800")));
        assert_eq!(summary.route.len(), 1);
    }

    #[test]
    fn test_extrema_bound_every_route() {
        let departures = [
            "2023-06-03T1200",
            "2023-06-01T0600",
            "2023-06-05T2355",
            "2023-06-02T0000",
        ];
        let routes: Vec<RouteRecord> = departures
            .iter()
            .map(|d| one_way(vec![leg("LON", "PAR", d, "M", "E")]))
            .collect();
        let summary = SummaryAggregator::aggregate(&routes).unwrap();

        let from = summary.leaving_onward_from.unwrap();
        let to = summary.leaving_onward_to.unwrap();
        for route in &routes {
            let departure = route.onward_flights[0].departure_timestamp;
            assert!(from <= departure && departure <= to);
        }
        assert_eq!(from, ts("2023-06-01T0600"));
        assert_eq!(to, ts("2023-06-05T2355"));
    }

    #[test]
    fn test_route_uses_first_source_and_last_destination() {
        let routes = vec![
            one_way(vec![
                leg("DXB", "DEL", "2018-10-22T0005", "G", "E"),
                leg("DEL", "BKK", "2018-10-22T1350", "Y", "P"),
            ]),
            one_way(vec![leg("SHJ", "BKK", "2018-10-22T2040", "K", "E")]),
            one_way(vec![leg("DXB", "BKK", "2018-10-22T0235", "U", "E")]),
        ];
        let summary = SummaryAggregator::aggregate(&routes).unwrap();
        assert_eq!(
            summary.route.as_slice(),
            &["DXB - BKK".to_string(), "SHJ - BKK".to_string()]
        );
        // classes and ticket types come from the first onward leg only
        assert_eq!(
            summary.onward_class.as_slice(),
            &["G".to_string(), "K".to_string(), "U".to_string()]
        );
        assert_eq!(summary.onward_ticket_type.as_slice(), &["E".to_string()]);
    }

    #[test]
    fn test_shared_class_is_listed_once() {
        let routes: Vec<RouteRecord> = (0..25)
            .map(|i| {
                let departure = format!("2023-06-{:02}T0930", 1 + i % 28);
                one_way(vec![leg("LON", "PAR", &departure, "M", "E")])
            })
            .collect();
        let summary = SummaryAggregator::aggregate(&routes).unwrap();
        assert_eq!(summary.onward_class.as_slice(), &["M".to_string()]);
    }

    #[test]
    fn test_return_uses_last_leg_departure() {
        let route = RouteRecord {
            onward_flights: vec![leg("DXB", "BKK", "2018-10-27T0130", "U", "E")],
            return_flights: vec![
                leg("BKK", "DEL", "2023-06-10T0900", "G", "E"),
                leg("DEL", "DXB", "2023-06-10T1500", "Q", "P"),
            ],
            ..RouteRecord::default()
        };
        let summary = SummaryAggregator::aggregate(&[route]).unwrap();
        assert_eq!(summary.arriving_return_from, Some(ts("2023-06-10T1500")));
        assert_eq!(summary.arriving_return_to, Some(ts("2023-06-10T1500")));
        assert_eq!(summary.return_class.as_slice(), &["G".to_string()]);
        assert_eq!(summary.return_ticket_type.as_slice(), &["E".to_string()]);
        assert!(summary.has_return());
    }

    #[test]
    fn test_one_way_routes_leave_return_fields_empty() {
        let routes = vec![
            one_way(vec![leg("LON", "PAR", "2023-06-01T0930", "M", "E")]),
            one_way(vec![leg("LON", "NCE", "2023-06-01T1130", "Y", "E")]),
        ];
        let summary = SummaryAggregator::aggregate(&routes).unwrap();
        assert_no_return(&summary);
    }

    #[test]
    fn test_empty_input_gives_empty_summary() {
        let summary = SummaryAggregator::aggregate(&Vec::new()).unwrap();
        assert_eq!(summary, SummaryRecord::new());
        assert_eq!(summary.leaving_onward_from, None);
    }

    #[test]
    fn test_empty_onward_legs_reports_itinerary() {
        let routes = vec![
            one_way(vec![leg("LON", "PAR", "2023-06-01T0930", "M", "E")]),
            RouteRecord::default(),
        ];
        let err = SummaryAggregator::aggregate(&routes).unwrap_err();
        assert!(matches!(err, ProcessingError::EmptyOnwardLegs { itinerary: 1 }));
        assert_eq!(err.kind(), "EmptyOnwardLegsError");
    }

    #[test]
    fn test_fold_does_not_touch_prior_summary() {
        let prior = SummaryAggregator::aggregate(&[one_way(vec![leg(
            "LON",
            "PAR",
            "2023-06-01T0930",
            "M",
            "E",
        )])])
        .unwrap();
        let next = prior
            .clone()
            .fold(&one_way(vec![leg("MAN", "PAR", "2023-05-30T0700", "Y", "E")]))
            .unwrap();

        assert_eq!(prior.route.len(), 1);
        assert_eq!(next.route.len(), 2);
        assert_eq!(next.leaving_onward_from, Some(ts("2023-05-30T0700")));
        assert_eq!(next.leaving_onward_to, Some(ts("2023-06-01T0930")));
    }

    #[test]
    fn test_entries_follow_field_order() {
        let routes = vec![one_way(vec![leg("LON", "PAR", "2023-06-01T0930", "M", "XLV")])];
        let summary = SummaryAggregator::aggregate(&routes).unwrap();
        let rendered: Vec<(&str, String)> = summary
            .entries()
            .into_iter()
            .map(|(key, value)| (key, value.to_string()))
            .collect();

        assert_eq!(
            rendered,
            vec![
                ("route", "LON - PAR".to_string()),
                ("leaving_onward_from", "2023-06-01 09:30".to_string()),
                ("leaving_onward_to", "2023-06-01 09:30".to_string()),
                ("onward_class", "M".to_string()),
                ("onward_ticket_type", "XLV".to_string()),
                ("arriving_return_from", String::new()),
                ("arriving_return_to", String::new()),
                ("return_class", String::new()),
                ("return_ticket_type", String::new()),
            ]
        );
    }
}
