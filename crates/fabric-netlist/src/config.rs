//! Keyspace layout configuration
//!
//! The default fabric keyspace is a 32-bit routing key split into fields.
//! The layout fixes how many bits each field gets.

use crate::error::{NetlistError, Result};
use serde::{Deserialize, Serialize};

/// Width of the routing key in bits
pub const KEY_BITS: u32 = 32;

/// Field widths of the default fabric keyspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyspaceLayout {
    /// Bits for the scheme selector; 0 selects the default scheme
    pub user_bits: u32,
    /// Bits for the object index
    pub object_bits: u32,
    /// Bits for the cluster index
    pub cluster_bits: u32,
    /// Bits for the outgoing connection index
    pub connection_bits: u32,
    /// Bits for the dimension index
    pub index_bits: u32,
}

impl Default for KeyspaceLayout {
    fn default() -> Self {
        Self {
            user_bits: 1,
            object_bits: 11,
            cluster_bits: 6,
            connection_bits: 6,
            index_bits: 8,
        }
    }
}

impl KeyspaceLayout {
    /// Parse a layout from TOML, filling unspecified fields with defaults
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let layout: Self = toml::from_str(s)?;
        layout.validate()?;
        Ok(layout)
    }

    fn fields(&self) -> [(&'static str, u32); 5] {
        [
            ("user", self.user_bits),
            ("object", self.object_bits),
            ("cluster", self.cluster_bits),
            ("connection", self.connection_bits),
            ("index", self.index_bits),
        ]
    }

    /// Total bits used by all fields
    pub fn total_bits(&self) -> u64 {
        self.fields().iter().map(|&(_, bits)| u64::from(bits)).sum()
    }

    /// Check that every field is between 1 and 32 bits wide and the key fits in 32 bits
    pub fn validate(&self) -> Result<()> {
        for (name, bits) in self.fields() {
            if bits == 0 {
                return Err(NetlistError::InvalidLayout(format!(
                    "field '{}' has zero width",
                    name
                )));
            }
            if bits > KEY_BITS {
                return Err(NetlistError::InvalidLayout(format!(
                    "field '{}' is {} bits wide, key is {} bits",
                    name, bits, KEY_BITS
                )));
            }
        }
        if self.total_bits() > u64::from(KEY_BITS) {
            return Err(NetlistError::InvalidLayout(format!(
                "{} bits requested, key is {} bits",
                self.total_bits(),
                KEY_BITS
            )));
        }
        Ok(())
    }
}
