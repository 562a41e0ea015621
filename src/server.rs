//! Foreign server configuration.

use std::num::NonZeroU32;

use tracing::debug;

use crate::error::ValidationError;
use crate::options::{OptionDescriptor, OptionSchema, RawOption};
use crate::types::VARHDRSZ;
use crate::value::OptionKind;

/// Length of node IDs in bytes, before hex encoding.
pub const NODE_ID_LEN: &str = "node_id_len";

/// Options accepted by `CREATE SERVER`.
pub const SERVER_OPTIONS: OptionSchema =
    OptionSchema::new(&[OptionDescriptor::required(NODE_ID_LEN, OptionKind::PositiveInt)]);

/// Resolved server configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    node_id_len: NonZeroU32,
}

impl ServerConfig {
    pub fn new(node_id_len: NonZeroU32) -> Self {
        Self { node_id_len }
    }

    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// The length of node IDs in bytes.
    pub fn node_id_len(&self) -> u32 {
        self.node_id_len.get()
    }

    /// Characters needed to hex-encode one node ID.
    pub fn encoded_id_len(&self) -> u64 {
        u64::from(self.node_id_len.get()) * 2
    }

    /// Type modifier an identifier column must be declared with.
    pub fn identifier_typmod(&self) -> u64 {
        self.encoded_id_len() + u64::from(VARHDRSZ)
    }
}

/// Collects server fields; builds only once every required field is set.
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    node_id_len: Option<u32>,
}

impl ServerConfigBuilder {
    #[must_use]
    pub fn node_id_len(mut self, len: u32) -> Self {
        self.node_id_len = Some(len);
        self
    }

    pub fn build(self) -> Result<ServerConfig, ValidationError> {
        let len = self.node_id_len.ok_or_else(|| ValidationError::MissingRequiredOption {
            option: NODE_ID_LEN.to_string(),
        })?;
        let node_id_len = NonZeroU32::new(len).ok_or_else(|| ValidationError::InvalidOptionValue {
            option: NODE_ID_LEN.to_string(),
            value: len.to_string(),
        })?;
        Ok(ServerConfig { node_id_len })
    }
}

/// Resolve a server's configuration from its options.
pub fn resolve_server(raws: &[RawOption]) -> Result<ServerConfig, ValidationError> {
    let parsed = SERVER_OPTIONS.apply(raws)?;

    let mut builder = ServerConfig::builder();
    if let Some(len) = parsed.positive_int(NODE_ID_LEN) {
        builder = builder.node_id_len(len);
    }
    let server = builder.build()?;

    debug!(node_id_len = server.node_id_len(), "resolved server options");
    Ok(server)
}
