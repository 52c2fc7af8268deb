//! Routing keyspaces
//!
//! The resolver only needs to know whether a keyspace uses the fabric's
//! default scheme and how to derive a cluster-qualified copy of it. Both
//! are expressed by the [`Keyspace`] trait; [`FabricKeyspace`] is the
//! built-in scheme.

use crate::config::KeyspaceLayout;
use crate::error::{NetlistError, Result};
use crate::vertex::ClusterId;
use serde::{Deserialize, Serialize};

/// Keyspace capability used during net keyspace resolution
pub trait Keyspace: Clone {
    /// Whether this keyspace uses the default scheme and so needs a cluster
    fn is_default_scheme(&self) -> bool;

    /// Derive a keyspace with the cluster field set
    fn with_cluster(&self, cluster: ClusterId) -> Result<Self>;
}

/// Field-structured routing keyspace
///
/// A `user` value of 0 marks the default scheme. Other user values belong to
/// externally managed schemes and are routed as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FabricKeyspace {
    layout: KeyspaceLayout,
    user: u32,
    object: Option<u32>,
    cluster: Option<u32>,
    connection: Option<u32>,
    index: Option<u32>,
}

impl Default for FabricKeyspace {
    fn default() -> Self {
        Self::empty(KeyspaceLayout::default())
    }
}

impl FabricKeyspace {
    /// Create an empty default-scheme keyspace with the given layout
    pub fn new(layout: KeyspaceLayout) -> Result<Self> {
        layout.validate()?;
        Ok(Self::empty(layout))
    }

    fn empty(layout: KeyspaceLayout) -> Self {
        Self {
            layout,
            user: 0,
            object: None,
            cluster: None,
            connection: None,
            index: None,
        }
    }

    pub fn layout(&self) -> &KeyspaceLayout {
        &self.layout
    }

    pub fn user(&self) -> u32 {
        self.user
    }

    pub fn object(&self) -> Option<u32> {
        self.object
    }

    pub fn cluster(&self) -> Option<u32> {
        self.cluster
    }

    pub fn connection(&self) -> Option<u32> {
        self.connection
    }

    pub fn index(&self) -> Option<u32> {
        self.index
    }

    /// Set the scheme selector
    pub fn with_user(mut self, user: u32) -> Result<Self> {
        self.user = check_field("user", user, self.layout.user_bits)?;
        Ok(self)
    }

    pub fn with_object(mut self, object: u32) -> Result<Self> {
        self.object = Some(check_field("object", object, self.layout.object_bits)?);
        Ok(self)
    }

    pub fn with_connection(mut self, connection: u32) -> Result<Self> {
        self.connection = Some(check_field(
            "connection",
            connection,
            self.layout.connection_bits,
        )?);
        Ok(self)
    }

    pub fn with_index(mut self, index: u32) -> Result<Self> {
        self.index = Some(check_field("index", index, self.layout.index_bits)?);
        Ok(self)
    }
}

impl Keyspace for FabricKeyspace {
    fn is_default_scheme(&self) -> bool {
        self.user == 0
    }

    fn with_cluster(&self, cluster: ClusterId) -> Result<Self> {
        let mut derived = *self;
        derived.cluster = Some(check_field("cluster", cluster, self.layout.cluster_bits)?);
        Ok(derived)
    }
}

fn check_field(field: &'static str, value: u32, bits: u32) -> Result<u32> {
    let fits = 1u64
        .checked_shl(bits)
        .map_or(true, |limit| u64::from(value) < limit);
    if fits {
        Ok(value)
    } else {
        Err(NetlistError::KeyspaceFieldOverflow { field, value, bits })
    }
}
