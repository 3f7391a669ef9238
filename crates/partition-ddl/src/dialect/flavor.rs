//! Server vendor and version descriptor.
//!
//! Every rendering branch in this crate is a pure function of a [`Flavor`]
//! value. The type is `Copy` and carries no mutable state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PartitionError, Result};

/// Database server vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    #[default]
    Unknown,
    MySQL,
    Percona,
    MariaDB,
}

impl Vendor {
    /// Lowercase vendor name used in flavor strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::Unknown => "unknown",
            Vendor::MySQL => "mysql",
            Vendor::Percona => "percona",
            Vendor::MariaDB => "mariadb",
        }
    }
}

impl FromStr for Vendor {
    type Err = PartitionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mysql" => Ok(Vendor::MySQL),
            "percona" => Ok(Vendor::Percona),
            "mariadb" => Ok(Vendor::MariaDB),
            "unknown" => Ok(Vendor::Unknown),
            other => Err(PartitionError::InvalidFlavor(format!(
                "unknown vendor '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A server vendor plus version triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flavor {
    pub vendor: Vendor,
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl Flavor {
    pub const fn new(vendor: Vendor, major: u16, minor: u16, patch: u16) -> Self {
        Self {
            vendor,
            major,
            minor,
            patch,
        }
    }

    /// Returns true if the version is at least `major.minor`, regardless of vendor.
    pub fn min_version(&self, major: u16, minor: u16) -> bool {
        (self.major, self.minor) >= (major, minor)
    }

    /// Returns true if this flavor is `vendor` at version `major.minor` or later.
    pub fn vendor_min_version(&self, vendor: Vendor, major: u16, minor: u16) -> bool {
        self.vendor == vendor && self.min_version(major, minor)
    }

    /// MariaDB 10.2 dropped version-gated comments around partitioning
    /// clauses and started quoting identifiers inside them.
    pub fn is_mariadb_10_2_plus(&self) -> bool {
        self.vendor_min_version(Vendor::MariaDB, 10, 2)
    }
}

impl FromStr for Flavor {
    type Err = PartitionError;

    /// Parse `vendor:major.minor[.patch]`, e.g. `mariadb:10.6` or `mysql:8.0.36`.
    fn from_str(s: &str) -> Result<Self> {
        let (vendor, version) = s
            .split_once(':')
            .ok_or_else(|| PartitionError::InvalidFlavor(s.to_string()))?;
        let vendor: Vendor = vendor.parse()?;

        let parts = version
            .trim()
            .split('.')
            .map(|p| p.parse::<u16>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| PartitionError::InvalidFlavor(s.to_string()))?;

        match parts.as_slice() {
            [major, minor] => Ok(Flavor::new(vendor, *major, *minor, 0)),
            [major, minor, patch] => Ok(Flavor::new(vendor, *major, *minor, *patch)),
            _ => Err(PartitionError::InvalidFlavor(s.to_string())),
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}.{}.{}",
            self.vendor, self.major, self.minor, self.patch
        )
    }
}
