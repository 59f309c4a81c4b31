//! Record types held by the store.
//!
//! A [`Hit`] is one recorded request: when it happened, which host and
//! resource were asked for, and who asked ([`Requester`]).

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded event.
///
/// Equality is field-wise; [`Store::update`](crate::Store::update) relies on it
/// to tell a real edit from a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    /// When the request was received.
    pub time: DateTime<Utc>,
    /// Requested host name.
    pub host: String,
    /// Requested path or resource identifier.
    pub resource: String,
    /// Where the request came from.
    pub client: Requester,
}

impl Hit {
    /// Creates a hit with an anonymous client.
    pub fn new(time: DateTime<Utc>, host: impl Into<String>, resource: impl Into<String>) -> Self {
        Hit {
            time,
            host: host.into(),
            resource: resource.into(),
            client: Requester::default(),
        }
    }

    /// Replaces the client information.
    pub fn with_client(mut self, client: Requester) -> Self {
        self.client = client;
        self
    }
}

/// The origin of a hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    /// Client address, if known.
    pub address: Option<IpAddr>,
    /// Country name resolved for the address.
    pub country: String,
    /// City name resolved for the address.
    pub city: String,
}

impl Requester {
    /// Creates a requester from its parts.
    pub fn new(
        address: Option<IpAddr>,
        country: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Requester {
            address,
            country: country.into(),
            city: city.into(),
        }
    }
}
