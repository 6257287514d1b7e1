// Fare search processing: XML response in, route records or summary out
use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::itinerary::{ItineraryExtractor, RouteRecord};
use crate::summary::{SummaryAggregator, SummaryRecord};
use crate::xml_response::XmlFareResponse;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Summary of one response file, titled by its file name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSummary {
    pub title: String,
    pub summary: SummaryRecord,
}

/// Route records of one response file, titled by its file name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileRoutes {
    pub title: String,
    pub routes: Vec<RouteRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct FareSearchProcessor {
    config: ExtractorConfig,
}

impl FareSearchProcessor {
    // Create a processor with the default field table
    pub fn new() -> Self {
        Self::default()
    }

    // Create a processor with a custom field table, rejected up front if incomplete
    pub fn with_config(config: ExtractorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    // Parse an XML response and extract one route record per priced itinerary
    pub fn extract_routes(&self, xml: &str) -> Result<Vec<RouteRecord>> {
        let response = XmlFareResponse::parse(xml)?;
        ItineraryExtractor::new(&self.config).extract(&response)
    }

    // Parse an XML response and fold its routes into a summary
    pub fn summarize(&self, xml: &str) -> Result<SummaryRecord> {
        let routes = self.extract_routes(xml)?;
        debug!(routes = routes.len(), "aggregating routes");
        SummaryAggregator::aggregate(&routes)
    }

    pub fn load_response(&self, path: impl AsRef<Path>) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<FileSummary> {
        let path = path.as_ref();
        let summary = self
            .load_response(path)
            .and_then(|xml| self.summarize(&xml))
            .map_err(|e| e.in_file(path))?;

        info!(
            file = %path.display(),
            routes = summary.route.len(),
            round_trip = summary.has_return(),
            "summarized response"
        );
        Ok(FileSummary {
            title: file_title(path),
            summary,
        })
    }

    pub fn routes_file(&self, path: impl AsRef<Path>) -> Result<FileRoutes> {
        let path = path.as_ref();
        let routes = self
            .load_response(path)
            .and_then(|xml| self.extract_routes(&xml))
            .map_err(|e| e.in_file(path))?;

        info!(file = %path.display(), routes = routes.len(), "extracted routes");
        Ok(FileRoutes {
            title: file_title(path),
            routes,
        })
    }
}

fn file_title(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
