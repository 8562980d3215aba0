//! DigitalOcean droplet metadata.
//!
//! Field annotations under the `json` tag key match the keys of the metadata
//! service's v1 JSON document, so a mounted `Droplet` serves the same paths as
//! `http://169.254.169.254/metadata/v1/`.

use serde::{Deserialize, Serialize};
use tagfs_record::record;

use crate::Error;

/// Tag key used by every DigitalOcean record.
pub const TAG: &str = "json";

/// Where the provider serves the v1 document.
pub const PREFIX: &str = "/metadata/v1";

record! {
    /// The full service tree, rooted above `metadata/v1`.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct DigitalOceanMetadata {
        pub metadata: MetadataRoot => { json: "metadata" },
    }
}

record! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct MetadataRoot {
        pub v1: Droplet => { json: "v1" },
    }
}

record! {
    /// The v1 metadata document of one droplet.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Droplet {
        pub droplet_id: i64 => { json: "droplet_id" },
        pub hostname: String => { json: "hostname" },
        pub vendor_data: String => { json: "vendor_data" },
        pub public_keys: Vec<String> => { json: "public_keys" },
        pub region: String => { json: "region" },
        pub interfaces: Interfaces => { json: "interfaces" },
        pub floating_ip: FloatingIp => { json: "floating_ip" },
        pub dns: Dns => { json: "dns" },
    }
}

record! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Interfaces {
        pub private: Vec<PrivateInterface> => { json: "private" },
        pub public: Vec<PublicInterface> => { json: "public" },
    }
}

record! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct PrivateInterface {
        // Deserialized but not exposed as a path.
        pub ipv4: Ipv4,
        pub mac: String => { json: "mac" },
        #[serde(rename = "type")]
        pub kind: String => { json: "type" },
    }
}

record! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct PublicInterface {
        pub ipv4: Ipv4 => { json: "ipv4" },
        pub ipv6: Ipv6 => { json: "ipv6" },
        pub mac: String => { json: "mac" },
        #[serde(rename = "type")]
        pub kind: String => { json: "type" },
    }
}

record! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Ipv4 {
        #[serde(rename = "ip_address")]
        pub address: String => { json: "ip_address" },
        pub netmask: String => { json: "netmask" },
        pub gateway: String => { json: "gateway" },
    }
}

record! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Ipv6 {
        #[serde(rename = "ip_address")]
        pub address: String => { json: "ip_address" },
        pub cidr: i32 => { json: "cidr" },
        pub gateway: String => { json: "gateway" },
    }
}

record! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct FloatingIp {
        pub ipv4: FloatingIpv4 => { json: "ipv4" },
    }
}

record! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct FloatingIpv4 {
        pub active: bool => { json: "active" },
    }
}

record! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Dns {
        pub nameservers: Vec<String> => { json: "nameservers" },
    }
}

impl Droplet {
    /// Parse a v1 metadata document.
    pub fn from_json(json: &[u8]) -> Result<Self, Error> {
        Ok(serde_json::from_slice(json)?)
    }
}

impl DigitalOceanMetadata {
    /// Place a droplet document under `metadata/v1`.
    pub fn new(droplet: Droplet) -> Self {
        Self {
            metadata: MetadataRoot { v1: droplet },
        }
    }

    pub fn droplet(&self) -> &Droplet {
        &self.metadata.v1
    }
}

impl From<Droplet> for DigitalOceanMetadata {
    fn from(droplet: Droplet) -> Self {
        Self::new(droplet)
    }
}
