//! Lenient parsing of archive entries.
//!
//! Archive shards are hand-curated JSON; individual entries may miss
//! optional keys or carry extra ones. Each entry is parsed on its own and
//! dropped if it is not a usable fragment of the requested kind.

use alloy_json_abi::{Error, Event, EventParam, Function, Param, StateMutability};
use serde::Deserialize;
use serde_json::Value;
use txlens_core::{FragmentKind, SchemaFragment};

#[derive(Debug, Deserialize)]
struct WireEntry {
    /// Omitted `type` means `function`, as in solc output.
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    inputs: Vec<WireParam>,
    #[serde(default)]
    outputs: Vec<WireParam>,
    #[serde(default)]
    anonymous: bool,
    #[serde(rename = "stateMutability", default)]
    state_mutability: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireParam {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    indexed: bool,
    #[serde(default)]
    components: Vec<WireParam>,
}

impl WireParam {
    fn into_param(self) -> Param {
        Param {
            ty: self.ty,
            name: self.name,
            components: self.components.into_iter().map(WireParam::into_param).collect(),
            internal_type: None,
        }
    }

    fn into_event_param(self) -> EventParam {
        EventParam {
            ty: self.ty,
            name: self.name,
            indexed: self.indexed,
            components: self.components.into_iter().map(WireParam::into_param).collect(),
            internal_type: None,
        }
    }
}

fn state_mutability(s: Option<&str>) -> StateMutability {
    match s {
        Some("pure") => StateMutability::Pure,
        Some("view") => StateMutability::View,
        Some("payable") => StateMutability::Payable,
        _ => StateMutability::NonPayable,
    }
}

/// Parse one raw entry; `None` if malformed or of another kind.
pub(crate) fn parse_entry(kind: FragmentKind, raw: &Value) -> Option<SchemaFragment> {
    let entry = WireEntry::deserialize(raw).ok()?;
    let entry_kind = entry.kind.as_deref().unwrap_or("function");
    if entry_kind != kind.as_str() {
        return None;
    }
    let name = entry.name.filter(|n| !n.is_empty())?;
    if entry.inputs.iter().any(|p| p.ty.is_empty()) {
        return None;
    }

    let fragment = match kind {
        FragmentKind::Function => SchemaFragment::Function(Function {
            name,
            inputs: entry.inputs.into_iter().map(WireParam::into_param).collect(),
            outputs: entry.outputs.into_iter().map(WireParam::into_param).collect(),
            state_mutability: state_mutability(entry.state_mutability.as_deref()),
        }),
        FragmentKind::Event => SchemaFragment::Event(Event {
            name,
            inputs: entry
                .inputs
                .into_iter()
                .map(WireParam::into_event_param)
                .collect(),
            anonymous: entry.anonymous,
        }),
        FragmentKind::Error => SchemaFragment::Error(Error {
            name,
            inputs: entry.inputs.into_iter().map(WireParam::into_param).collect(),
        }),
    };
    Some(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn function_entry_parses_with_signature() {
        let raw = json!({
            "type": "function",
            "name": "transfer",
            "inputs": [
                {"name": "to", "type": "address"},
                {"name": "amount", "type": "uint256"}
            ],
            "outputs": [{"name": "", "type": "bool"}],
            "stateMutability": "nonpayable"
        });
        let f = parse_entry(FragmentKind::Function, &raw).unwrap();
        assert_eq!(f.signature(), "transfer(address,uint256)");
    }

    #[test]
    fn missing_type_defaults_to_function() {
        let raw = json!({"name": "approve", "inputs": [{"type": "address"}, {"type": "uint256"}]});
        assert!(parse_entry(FragmentKind::Function, &raw).is_some());
        assert!(parse_entry(FragmentKind::Event, &raw).is_none());
    }

    #[test]
    fn event_keeps_indexed_flags_and_anonymity() {
        let raw = json!({
            "type": "event",
            "name": "Transfer",
            "anonymous": false,
            "inputs": [
                {"indexed": true, "name": "from", "type": "address"},
                {"indexed": true, "name": "to", "type": "address"},
                {"indexed": false, "name": "value", "type": "uint256"}
            ]
        });
        let SchemaFragment::Event(ev) = parse_entry(FragmentKind::Event, &raw).unwrap() else {
            panic!("expected event");
        };
        assert_eq!(ev.inputs.iter().filter(|p| p.indexed).count(), 2);
        assert!(!ev.anonymous);
    }

    #[test]
    fn tuple_components_are_kept() {
        let raw = json!({
            "type": "function",
            "name": "submit",
            "inputs": [{
                "name": "order",
                "type": "tuple",
                "components": [
                    {"name": "maker", "type": "address"},
                    {"name": "amount", "type": "uint256"}
                ]
            }]
        });
        let f = parse_entry(FragmentKind::Function, &raw).unwrap();
        assert_eq!(f.signature(), "submit((address,uint256))");
    }

    #[test]
    fn malformed_entries_are_skipped() {
        assert!(parse_entry(FragmentKind::Function, &json!("transfer(address,uint256)")).is_none());
        assert!(parse_entry(FragmentKind::Function, &json!({"type": "function"})).is_none());
        assert!(parse_entry(
            FragmentKind::Function,
            &json!({"type": "function", "name": "f", "inputs": [{"name": "x"}]})
        )
        .is_none());
        assert!(parse_entry(FragmentKind::Error, &json!({"type": "constructor", "inputs": []})).is_none());
    }
}
