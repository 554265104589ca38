//! Service listing models

use serde::Deserialize;
use serde_json::Value;

use crate::repositories::{Document, Filter};

/// Stored field names of a service listing
pub mod fields {
    pub const NAME: &str = "serviceName";
    pub const IMAGE: &str = "serviceImage";
    pub const PRICE: &str = "price";
    pub const AREA: &str = "serviceArea";
    pub const DESCRIPTION: &str = "serviceDescription";
    pub const PROVIDER_EMAIL: &str = "serviceProviderEmail";
    pub const PROVIDER_NAME: &str = "serviceProviderName";
}

/// Query parameters for service listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceQuery {
    /// Exact service name
    pub service_name: Option<String>,
    /// Exact provider email
    pub service_provider_email: Option<String>,
}

impl ServiceQuery {
    pub fn to_filter(&self) -> Filter {
        Filter::new()
            .eq_opt(fields::NAME, self.service_name.as_deref())
            .eq_opt(fields::PROVIDER_EMAIL, self.service_provider_email.as_deref())
    }
}

/// Body of `PUT /services/:id`
///
/// An update always writes all seven listing fields; a key missing from the
/// body is stored as `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    pub update_service_name: Option<Value>,
    pub update_service_image: Option<Value>,
    pub update_service_price: Option<Value>,
    pub update_service_area: Option<Value>,
    pub update_service_description: Option<Value>,
    pub update_service_provider_email: Option<Value>,
    pub update_service_provider_name: Option<Value>,
}

impl UpdateServiceRequest {
    /// Map the request onto stored field names
    pub fn into_fields(self) -> Document {
        let pairs = [
            (fields::NAME, self.update_service_name),
            (fields::IMAGE, self.update_service_image),
            (fields::PRICE, self.update_service_price),
            (fields::AREA, self.update_service_area),
            (fields::DESCRIPTION, self.update_service_description),
            (fields::PROVIDER_EMAIL, self.update_service_provider_email),
            (fields::PROVIDER_NAME, self.update_service_provider_name),
        ];

        pairs
            .into_iter()
            .map(|(field, value)| (field.to_string(), value.unwrap_or(Value::Null)))
            .collect()
    }
}
