//! ComputerSystemCollection (`/redfish/v1/Systems/`) decoding and expansion

use crate::computer_system::ComputerSystem;
use crate::decode::{null_as_default, parse_json, Decode};
use crate::error::Result;
use crate::fetch::ResourceFetcher;
use crate::odata::ODataAnnotation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ComputerSystemCollectionResponse {
    #[serde(flatten)]
    odata: ODataAnnotation,
    name: Option<String>,
    description: Option<String>,
    #[serde(rename = "Members@odata.count")]
    members_count: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    members: Vec<ODataAnnotation>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComputerSystemCollectionCounters {
    /// `Members@odata.count` as reported by the server.
    pub computer_systems: u64,
}

/// The list of computer systems behind a Redfish endpoint.
///
/// `computer_systems` is empty after decoding and filled by
/// [`resolve_computer_systems`](Self::resolve_computer_systems).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComputerSystemCollection {
    pub odata: ODataAnnotation,
    pub name: String,
    pub description: String,
    pub counters: ComputerSystemCollectionCounters,
    pub members: Vec<ODataAnnotation>,
    pub computer_systems: Vec<ComputerSystem>,
}

impl Decode for ComputerSystemCollection {
    fn decode(bytes: &[u8]) -> Result<Self> {
        let response: ComputerSystemCollectionResponse = parse_json(bytes)?;

        Ok(ComputerSystemCollection {
            odata: response.odata,
            name: response.name.unwrap_or_default(),
            description: response.description.unwrap_or_default(),
            counters: ComputerSystemCollectionCounters {
                computer_systems: response.members_count.unwrap_or_default(),
            },
            members: response.members,
            computer_systems: Vec::new(),
        })
    }
}

impl ComputerSystemCollection {
    /// Fetch and decode every member, in member order.
    ///
    /// Runs at most once per collection: if the systems are already
    /// resolved nothing is fetched. The first failing member aborts the
    /// expansion and nothing is stored.
    pub async fn resolve_computer_systems<F>(&mut self, fetcher: &F) -> Result<()>
    where
        F: ResourceFetcher + ?Sized,
    {
        if !self.computer_systems.is_empty() {
            return Ok(());
        }

        let mut computer_systems = Vec::with_capacity(self.members.len());
        for member in &self.members {
            let body = fetcher.fetch(&member.resource_path()).await?;
            computer_systems.push(ComputerSystem::decode(&body)?);
        }

        self.computer_systems = computer_systems;
        Ok(())
    }
}
