//! Barcode lookup against the Open Food Facts product database.
//!
//! A [`ProductSource`] fetches raw product records; [`lookup_barcode`] runs
//! the fetched record through the classifier. "Not found" is `Ok(None)`,
//! transport failures are [`Error::Lookup`].

use crate::classifier::{classify, Product};
use crate::config::LookupConfig;
use crate::{Error, Result, ScannedProduct};
use serde::Deserialize;

/// Source of product records keyed by barcode
pub trait ProductSource {
    fn fetch(&self, barcode: &str) -> Result<Option<Product>>;
}

/// Response envelope of the product endpoint
#[derive(Debug, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub product: Option<Product>,
}

impl LookupResponse {
    /// The product, if the database reported it as found
    pub fn into_found(self) -> Option<Product> {
        match self.status {
            Some(1) => self.product,
            _ => None,
        }
    }
}

/// Blocking HTTP client for the public product API
pub struct OpenFoodFacts {
    agent: ureq::Agent,
    base_url: String,
}

impl OpenFoodFacts {
    pub fn new(config: &LookupConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(&config.user_agent)
            .build();
        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn product_url(&self, barcode: &str) -> String {
        format!("{}/{}.json", self.base_url, barcode)
    }
}

impl ProductSource for OpenFoodFacts {
    fn fetch(&self, barcode: &str) -> Result<Option<Product>> {
        let url = self.product_url(barcode);
        tracing::debug!("GET {}", url);

        let response = match self.agent.get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                tracing::info!("Product lookup for {} returned HTTP {}", barcode, code);
                return Ok(None);
            }
            Err(e) => return Err(Error::Lookup(e.to_string())),
        };

        let body: LookupResponse = response
            .into_json()
            .map_err(|e| Error::Lookup(format!("Unreadable response for {}: {}", barcode, e)))?;

        Ok(body.into_found())
    }
}

/// Check a manually entered or scanned barcode and normalize it
pub fn normalize_barcode(barcode: &str) -> Result<String> {
    let barcode = barcode.trim();
    if barcode.is_empty() {
        return Err(Error::Validation("Barcode is empty".into()));
    }
    if !barcode.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::Validation(format!(
            "Barcode {:?} may only contain letters and digits",
            barcode
        )));
    }
    Ok(barcode.to_string())
}

/// Fetch and classify the product behind `barcode`
pub fn lookup_barcode<P: ProductSource + ?Sized>(
    source: &P,
    barcode: &str,
) -> Result<Option<ScannedProduct>> {
    let barcode = normalize_barcode(barcode)?;
    let scanned = source
        .fetch(&barcode)?
        .and_then(|product| classify(&product, &barcode));

    match &scanned {
        Some(product) => tracing::info!("Found {} for barcode {}", product.name, barcode),
        None => tracing::info!("No product found for barcode {}", barcode),
    }
    Ok(scanned)
}
