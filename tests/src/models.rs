//! Fixture models for a slice of the OVN northbound and southbound schemas.

use ovsdb_orm::Model;

use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default, Clone, PartialEq, Model)]
#[table = "Logical_Switch"]
pub struct LogicalSwitch {
    #[ovsdb("_uuid")]
    pub uuid: String,

    #[ovsdb("name,index")]
    pub name: String,

    #[ovsdb("ports,ref")]
    pub ports: Vec<String>,

    #[ovsdb("external_ids")]
    pub external_ids: HashMap<String, String>,

    #[ovsdb("other_config")]
    pub other_config: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Default, Clone, PartialEq, Model)]
#[table = "Logical_Switch_Port"]
pub struct LogicalSwitchPort {
    #[ovsdb("_uuid")]
    pub uuid: String,

    #[ovsdb("name,index")]
    pub name: String,

    #[ovsdb("type")]
    pub kind: String,

    #[ovsdb("addresses")]
    pub addresses: Vec<String>,

    #[ovsdb("enabled")]
    pub enabled: Option<bool>,

    #[ovsdb("tag_request")]
    pub tag_request: Option<u16>,

    #[ovsdb("external_ids")]
    pub external_ids: HashMap<String, String>,

    /// Not part of the row
    pub scratch: String,
}

#[derive(Debug, Default, Clone, PartialEq, Model)]
#[table = "Datapath_Binding"]
pub struct DatapathBinding {
    #[ovsdb("_uuid")]
    pub uuid: String,

    #[ovsdb("tunnel_key,index")]
    pub tunnel_key: i64,

    #[ovsdb("external_ids")]
    pub external_ids: HashMap<String, String>,
}

#[derive(Debug, Default, Clone, PartialEq, Model)]
#[table = "Logical_Router"]
pub struct LogicalRouter {
    #[ovsdb("_uuid")]
    pub uuid: String,

    #[ovsdb("name,index")]
    pub name: String,

    #[ovsdb("enabled")]
    pub enabled: Option<bool>,

    #[ovsdb("load_balancer,ref")]
    pub load_balancer: Vec<String>,

    #[ovsdb("copp,ref")]
    pub copp: Option<String>,
}
