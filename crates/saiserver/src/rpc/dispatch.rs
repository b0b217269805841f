//! Method-name dispatch for the JSON transport.
//!
//! A request names one handler and carries its arguments as a JSON object.
//! Object handles travel as signed 64-bit integers. The response status is
//! the raw `sai_status_t`; failures carry `{"error": "..."}` as result.

use super::objects::{self, Verb};
use super::{stats_object_type, SaiRpc, DEFAULT_LIST_CAPACITY};
use crate::codec::wire::{WireAttribute, WireFdbEntry, WireNeighborEntry, WireRouteEntry};
use crate::codec::{fdb_entry_key, neighbor_entry_key, route_entry_key};
use log::{debug, warn};
use sai_native::{AttrId, EntryKey, ObjectId, ObjectKey, ObjectType, SaiError, SaiStatus, StatId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl Request {
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Request {
            method: method.into(),
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: i32,
    pub result: Value,
}

impl Response {
    pub fn ok(result: Value) -> Self {
        Response {
            status: SaiStatus::SUCCESS.as_raw(),
            result,
        }
    }

    pub fn error(error: &DispatchError) -> Self {
        Response {
            status: error.status().as_raw(),
            result: json!({ "error": error.to_string() }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SaiStatus::SUCCESS.as_raw()
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown method {0}")]
    UnknownMethod(String),

    #[error("invalid params for {method}: {reason}")]
    InvalidParams { method: String, reason: String },

    #[error(transparent)]
    Sai(#[from] SaiError),
}

impl DispatchError {
    pub fn status(&self) -> SaiStatus {
        match self {
            DispatchError::UnknownMethod(_) => SaiStatus::NOT_IMPLEMENTED,
            DispatchError::InvalidParams { .. } => SaiStatus::INVALID_PARAMETER,
            DispatchError::Sai(e) => e.status(),
        }
    }
}

type DispatchResult<T> = Result<T, DispatchError>;

#[derive(Debug, Deserialize)]
struct CreateParams {
    #[serde(default)]
    entry: Option<Value>,
    #[serde(default)]
    attributes: Vec<WireAttribute>,
}

#[derive(Debug, Deserialize)]
struct KeyParams {
    #[serde(default)]
    oid: Option<i64>,
    #[serde(default)]
    entry: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct SetParams {
    #[serde(flatten)]
    key: KeyParams,
    attribute: WireAttribute,
}

#[derive(Debug, Deserialize)]
struct GetRequest {
    id: AttrId,
    #[serde(default = "default_count")]
    count: usize,
}

fn default_count() -> usize {
    DEFAULT_LIST_CAPACITY
}

#[derive(Debug, Deserialize)]
struct GetParams {
    #[serde(flatten)]
    key: KeyParams,
    attributes: Vec<GetRequest>,
}

#[derive(Debug, Deserialize)]
struct OidParams {
    oid: i64,
}

#[derive(Debug, Deserialize)]
struct StpStateParams {
    oid: i64,
    state: i32,
}

#[derive(Debug, Deserialize)]
struct StatsParams {
    oid: i64,
    counter_ids: Vec<StatId>,
}

#[derive(Debug, Deserialize)]
struct FrontPortParams {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SystemPortIdParams {
    port_id: i32,
}

#[derive(Debug, Deserialize)]
struct FlushParams {
    #[serde(default)]
    attributes: Vec<WireAttribute>,
}

/// Runs one request against the handler surface.
pub fn dispatch(rpc: &SaiRpc, request: &Request) -> Response {
    debug!("dispatch {}", request.method);
    match call(rpc, request) {
        Ok(response) => response,
        Err(e) => {
            warn!("{} failed: {}", request.method, e);
            Response::error(&e)
        }
    }
}

fn call(rpc: &SaiRpc, request: &Request) -> DispatchResult<Response> {
    let method = request.method.as_str();
    let params = &request.params;

    let result = match method {
        "get_bridge_port_list" => {
            let p: OidParams = parse(method, params)?;
            return list_response(rpc.get_bridge_port_list(ObjectId::from_wire(p.oid)));
        }
        "get_port_attribute" => {
            let p: OidParams = parse(method, params)?;
            return list_response(rpc.get_port_attribute(ObjectId::from_wire(p.oid)));
        }
        "get_system_port_attribute" => {
            let p: OidParams = parse(method, params)?;
            return list_response(rpc.get_system_port_attribute(ObjectId::from_wire(p.oid)));
        }
        "get_vlan_id" => {
            let p: OidParams = parse(method, params)?;
            json!(rpc.get_vlan_id(ObjectId::from_wire(p.oid))?)
        }
        "get_stp_port_state" => {
            let p: OidParams = parse(method, params)?;
            json!(rpc.get_stp_port_state(ObjectId::from_wire(p.oid))?)
        }
        "set_stp_port_state" => {
            let p: StpStateParams = parse(method, params)?;
            rpc.set_stp_port_state(ObjectId::from_wire(p.oid), p.state)?;
            Value::Null
        }
        "get_cpu_port_id" => oid_value(rpc.get_cpu_port_id()?),
        "get_default_router_id" => oid_value(rpc.get_default_router_id()?),
        "get_default_1q_bridge_id" => oid_value(rpc.get_default_1q_bridge_id()?),
        "get_default_vlan_id" => oid_value(rpc.get_default_vlan_id()?),
        "get_default_trap_group" => oid_value(rpc.get_default_trap_group()?),
        "get_port_list" => oid_list_value(&rpc.get_port_list()?),
        "get_port_id_by_front_port" => {
            let p: FrontPortParams = parse(method, params)?;
            oid_value(rpc.get_port_id_by_front_port(&p.name)?)
        }
        "get_port_list_by_front_port" => oid_list_value(&rpc.get_port_list_by_front_port()?),
        "get_sys_port_obj_id_by_port_id" => {
            let p: SystemPortIdParams = parse(method, params)?;
            oid_value(rpc.get_sys_port_obj_id_by_port_id(p.port_id))
        }
        "get_switch_stats_by_oid" => {
            let p: OidParams = parse(method, params)?;
            json!(rpc.get_switch_stats_by_oid(ObjectId::from_wire(p.oid)))
        }
        "clear_port_all_stats" => {
            let p: OidParams = parse(method, params)?;
            rpc.clear_port_all_stats(ObjectId::from_wire(p.oid))?;
            Value::Null
        }
        "get_fdb_entries" => json!(rpc.get_fdb_entries()),
        "flush_fdb_entries" => {
            let p: FlushParams = parse(method, params)?;
            rpc.flush_fdb_entries(&p.attributes)?;
            Value::Null
        }
        _ => {
            if let Some(value) = call_stats(rpc, method, params)? {
                value
            } else if let Some((verb, object_type)) = objects::resolve(method) {
                return call_object(rpc, method, verb, object_type, params);
            } else {
                return Err(DispatchError::UnknownMethod(method.to_string()));
            }
        }
    };
    Ok(Response::ok(result))
}

/// `get_<name>_stats` and `clear_<name>_stats`.
fn call_stats(rpc: &SaiRpc, method: &str, params: &Value) -> DispatchResult<Option<Value>> {
    let (clear, name) = if let Some(rest) = method.strip_prefix("get_") {
        (false, rest)
    } else if let Some(rest) = method.strip_prefix("clear_") {
        (true, rest)
    } else {
        return Ok(None);
    };
    let Some(object_type) = name.strip_suffix("_stats").and_then(stats_object_type) else {
        return Ok(None);
    };

    let p: StatsParams = parse(method, params)?;
    let oid = ObjectId::from_wire(p.oid);
    if clear {
        rpc.clear_stats(object_type, oid, &p.counter_ids)?;
        Ok(Some(Value::Null))
    } else {
        Ok(Some(json!(rpc.get_stats(object_type, oid, &p.counter_ids)?)))
    }
}

fn call_object(
    rpc: &SaiRpc,
    method: &str,
    verb: Verb,
    object_type: ObjectType,
    params: &Value,
) -> DispatchResult<Response> {
    match verb {
        Verb::Create => {
            let p: CreateParams = parse(method, params)?;
            if objects::is_entry(object_type) {
                let entry = p.entry.ok_or_else(|| missing(method, "entry"))?;
                let key = entry_key(rpc, method, object_type, entry)?;
                rpc.create_entry(&key, &p.attributes)?;
                Ok(Response::ok(Value::Null))
            } else {
                let oid = rpc.create_object(object_type, &p.attributes)?;
                Ok(Response::ok(oid_value(oid)))
            }
        }
        Verb::Remove => {
            let p: KeyParams = parse(method, params)?;
            match object_key(rpc, method, object_type, p)? {
                ObjectKey::Oid(oid) => rpc.remove_object(object_type, oid)?,
                ObjectKey::Entry(key) => rpc.remove_entry(&key)?,
            }
            Ok(Response::ok(Value::Null))
        }
        Verb::Set => {
            let p: SetParams = parse(method, params)?;
            let key = object_key(rpc, method, object_type, p.key)?;
            rpc.set_attribute(object_type, &key, &p.attribute)?;
            Ok(Response::ok(Value::Null))
        }
        Verb::Get => {
            let p: GetParams = parse(method, params)?;
            let key = object_key(rpc, method, object_type, p.key)?;
            let requests: Vec<(AttrId, usize)> =
                p.attributes.iter().map(|r| (r.id, r.count)).collect();
            list_response(rpc.get_attributes(object_type, &key, &requests))
        }
    }
}

/// Object key of a remove/set/get. The switch may be addressed without an
/// oid.
fn object_key(
    rpc: &SaiRpc,
    method: &str,
    object_type: ObjectType,
    params: KeyParams,
) -> DispatchResult<ObjectKey> {
    if objects::is_entry(object_type) {
        let entry = params.entry.ok_or_else(|| missing(method, "entry"))?;
        return Ok(ObjectKey::Entry(entry_key(rpc, method, object_type, entry)?));
    }
    match params.oid {
        Some(oid) => Ok(ObjectKey::Oid(ObjectId::from_wire(oid))),
        None if object_type == ObjectType::Switch => {
            Ok(ObjectKey::Oid(rpc.context().switch_id()))
        }
        None => Err(missing(method, "oid")),
    }
}

fn entry_key(
    rpc: &SaiRpc,
    method: &str,
    object_type: ObjectType,
    entry: Value,
) -> DispatchResult<EntryKey> {
    let switch_id = rpc.context().switch_id();
    let key = match object_type {
        ObjectType::FdbEntry => fdb_entry_key(switch_id, &parse::<WireFdbEntry>(method, &entry)?)?,
        ObjectType::RouteEntry => {
            route_entry_key(switch_id, &parse::<WireRouteEntry>(method, &entry)?)?
        }
        ObjectType::NeighborEntry => {
            neighbor_entry_key(switch_id, &parse::<WireNeighborEntry>(method, &entry)?)?
        }
        other => {
            return Err(DispatchError::InvalidParams {
                method: method.to_string(),
                reason: format!("{} is not addressed by an entry", other),
            })
        }
    };
    Ok(key)
}

fn parse<T: DeserializeOwned>(method: &str, params: &Value) -> DispatchResult<T> {
    let params = if params.is_null() {
        json!({})
    } else {
        params.clone()
    };
    serde_json::from_value(params).map_err(|e| DispatchError::InvalidParams {
        method: method.to_string(),
        reason: e.to_string(),
    })
}

fn missing(method: &str, field: &str) -> DispatchError {
    DispatchError::InvalidParams {
        method: method.to_string(),
        reason: format!("missing field `{}`", field),
    }
}

fn oid_value(oid: ObjectId) -> Value {
    json!(oid.to_wire())
}

fn oid_list_value(oids: &[ObjectId]) -> Value {
    json!(oids.iter().map(|oid| oid.to_wire()).collect::<Vec<i64>>())
}

fn list_response(result: super::AttributeListResult) -> DispatchResult<Response> {
    let status = result.status.as_raw();
    let result = serde_json::to_value(&result).map_err(|e| DispatchError::InvalidParams {
        method: "get".to_string(),
        reason: e.to_string(),
    })?;
    Ok(Response { status, result })
}
