//! Fixed server pool with positional round-robin assignment
//!
//! Item `i` always goes to `pool[i mod N]`, whatever order the requests
//! finish in. There is no health checking and no weighting.

use crate::error::{Error, Result};
use crate::models::Address;

/// Ordered, non-empty list of synthesis servers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerPool {
    servers: Vec<Address>,
}

impl ServerPool {
    /// Create a pool from an ordered address list
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if `servers` is empty
    pub fn new(servers: Vec<Address>) -> Result<Self> {
        if servers.is_empty() {
            return Err(Error::config("server pool must contain at least one address"));
        }
        Ok(Self { servers })
    }

    /// `count` consecutive ports on one host, starting at `port_start`
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the range is empty or runs past port 65535
    pub fn from_port_range(host: &str, port_start: u16, count: u16) -> Result<Self> {
        let servers = (0..count)
            .map(|offset| {
                port_start
                    .checked_add(offset)
                    .map(|port| Address::new(format!("{host}:{port}")))
                    .ok_or_else(|| Error::config("server port range exceeds 65535"))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(servers)
    }

    /// Server for the item at `index` in the original input order
    pub fn assign(&self, index: usize) -> &Address {
        &self.servers[index % self.servers.len()]
    }

    /// First server; the retry pass runs everything here
    pub fn primary(&self) -> &Address {
        &self.servers[0]
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    /// Whether the pool has no servers
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.servers.iter()
    }
}
