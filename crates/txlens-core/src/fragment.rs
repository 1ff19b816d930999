//! Interface fragments supplied by the signature archive.
//!
//! The archive is queried per kind, so a lookup only ever yields fragments
//! of the requested kind. Each variant carries alloy's strongly typed ABI
//! item rather than a loosely typed record.

use alloy_json_abi::{Error, Event, Function};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which archive directory a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    Function,
    Event,
    Error,
}

impl FragmentKind {
    /// Directory segment used by the archive layout.
    pub fn as_str(&self) -> &'static str {
        match self {
            FragmentKind::Function => "function",
            FragmentKind::Event => "event",
            FragmentKind::Error => "error",
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One interface description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "item", rename_all = "lowercase")]
pub enum SchemaFragment {
    Function(Function),
    Event(Event),
    Error(Error),
}

impl SchemaFragment {
    pub fn kind(&self) -> FragmentKind {
        match self {
            SchemaFragment::Function(_) => FragmentKind::Function,
            SchemaFragment::Event(_) => FragmentKind::Event,
            SchemaFragment::Error(_) => FragmentKind::Error,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SchemaFragment::Function(f) => &f.name,
            SchemaFragment::Event(e) => &e.name,
            SchemaFragment::Error(e) => &e.name,
        }
    }

    /// Canonical signature text, e.g. `transfer(address,uint256)`.
    pub fn signature(&self) -> String {
        match self {
            SchemaFragment::Function(f) => f.signature(),
            SchemaFragment::Event(e) => e.signature(),
            SchemaFragment::Error(e) => e.signature(),
        }
    }
}

/// All fragments the archive returned for one shard key, in archive order,
/// together with the URL they were fetched from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentSet {
    pub kind: FragmentKind,
    pub fragments: Vec<SchemaFragment>,
    pub provenance_url: String,
}

impl FragmentSet {
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Function candidates, archive order preserved.
    pub fn functions(&self) -> impl Iterator<Item = &Function> + Clone + '_ {
        self.fragments.iter().filter_map(|f| match f {
            SchemaFragment::Function(func) => Some(func),
            _ => None,
        })
    }

    /// Event candidates, archive order preserved.
    pub fn events(&self) -> impl Iterator<Item = &Event> + Clone + '_ {
        self.fragments.iter().filter_map(|f| match f {
            SchemaFragment::Event(ev) => Some(ev),
            _ => None,
        })
    }

    /// Error candidates, archive order preserved.
    pub fn errors(&self) -> impl Iterator<Item = &Error> + Clone + '_ {
        self.fragments.iter().filter_map(|f| match f {
            SchemaFragment::Error(err) => Some(err),
            _ => None,
        })
    }
}
