//! Network spec validation.
//!
//! Checks run in a fixed order and the first failure is returned, so a given
//! spec always yields the same error.

use crate::model::{Annotations, Driver, IpamConfiguration, IpamOptions, NetworkSpec};
use ipnet::{IpNet, Ipv4Net};
use std::net::IpAddr;
use thiserror::Error;

/// Validation errors.
///
/// Every variant is a client error; the validator never reports internal
/// failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("spec required")]
    SpecRequired,

    #[error("meta: name must be provided")]
    NameRequired,

    #[error(
        "meta: invalid name {0:?}, must start and end with a letter or digit and contain only letters, digits, '-' and '_'"
    )]
    InvalidName(String),

    #[error("driver name: if driver is specified name is required")]
    DriverNameRequired,

    #[error("ipam configuration: invalid subnet {0}")]
    InvalidSubnet(String),

    #[error("ipam configuration: invalid range {0}")]
    InvalidRange(String),

    #[error("ipam configuration: subnet {subnet} does not contain range {range}")]
    RangeNotInSubnet { subnet: String, range: String },

    #[error("ipam configuration: invalid gateway {0}")]
    InvalidGateway(String),

    #[error("ipam configuration: subnet {subnet} does not contain gateway {gateway}")]
    GatewayNotInSubnet { subnet: String, gateway: String },
}

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Validate a network spec.
///
/// Order: presence, annotations, network driver, IPAM driver, then each IPAM
/// configuration in sequence.
pub fn validate_network_spec(spec: Option<&NetworkSpec>) -> Result<()> {
    let spec = spec.ok_or(ValidationError::SpecRequired)?;

    validate_annotations(&spec.annotations)?;
    validate_driver(spec.driver_configuration.as_ref())?;
    validate_ipam(spec.ipam.as_ref())
}

/// Validate resource annotations.
pub fn validate_annotations(annotations: &Annotations) -> Result<()> {
    if annotations.name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if !is_valid_name(&annotations.name) {
        return Err(ValidationError::InvalidName(annotations.name.clone()));
    }
    Ok(())
}

/// Validate a driver section. An absent section is valid.
pub fn validate_driver(driver: Option<&Driver>) -> Result<()> {
    match driver {
        Some(driver) if driver.name.is_empty() => Err(ValidationError::DriverNameRequired),
        _ => Ok(()),
    }
}

/// Validate IPAM options. Absent options are valid: defaults get chosen later.
pub fn validate_ipam(ipam: Option<&IpamOptions>) -> Result<()> {
    let Some(ipam) = ipam else {
        return Ok(());
    };

    validate_driver(ipam.driver.as_ref())?;

    ipam.configurations
        .iter()
        .try_for_each(validate_ipam_configuration)
}

/// Validate a single IPAM configuration.
pub fn validate_ipam_configuration(conf: &IpamConfiguration) -> Result<()> {
    let subnet: IpNet = conf
        .subnet
        .parse()
        .map_err(|_| ValidationError::InvalidSubnet(conf.subnet.clone()))?;

    if !conf.range.is_empty() {
        let range: IpNet = conf
            .range
            .parse()
            .map_err(|_| ValidationError::InvalidRange(conf.range.clone()))?;

        // Only the range's own address has to fall inside the subnet.
        if !subnet_contains(&subnet, range.addr()) {
            return Err(ValidationError::RangeNotInSubnet {
                subnet: conf.subnet.clone(),
                range: conf.range.clone(),
            });
        }
    }

    if !conf.gateway.is_empty() {
        let gateway: IpAddr = conf
            .gateway
            .parse()
            .map_err(|_| ValidationError::InvalidGateway(conf.gateway.clone()))?;

        if !subnet_contains(&subnet, gateway) {
            return Err(ValidationError::GatewayNotInSubnet {
                subnet: conf.subnet.clone(),
                gateway: conf.gateway.clone(),
            });
        }
    }

    Ok(())
}

/// Check whether `addr` lies within `subnet`.
///
/// An address is contained iff masking it with the subnet's prefix yields the
/// subnet's network address. IPv4-mapped IPv6 forms compare as IPv4 on both
/// sides; addresses of different families are never contained.
pub fn subnet_contains(subnet: &IpNet, addr: IpAddr) -> bool {
    canonical_net(*subnet).contains(&addr.to_canonical())
}

/// Rewrite `::ffff:a.b.c.d/n` (n >= 96) as the equivalent IPv4 block.
fn canonical_net(net: IpNet) -> IpNet {
    match net {
        IpNet::V6(v6) if v6.prefix_len() >= 96 => match v6.addr().to_ipv4_mapped() {
            Some(v4) => Ipv4Net::new(v4, v6.prefix_len() - 96)
                .map(IpNet::V4)
                .unwrap_or(net),
            None => net,
        },
        _ => net,
    }
}

/// Names start and end with an ASCII letter or digit; `-` and `_` may appear
/// in between.
fn is_valid_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            first.is_ascii_alphanumeric()
                && last.is_ascii_alphanumeric()
                && bytes
                    .iter()
                    .all(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_')
        }
        _ => false,
    }
}
