use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use util::HashMap;

use crate::SignalId;

/// A named data artifact (usually a file) exchanged between processes.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Signal {
    pub name: String,
    /// Size in bytes, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Placeholder payload; workflow inputs carry a single empty entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Value>>,
    /// Any other keys present in the document, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Signal {
    pub fn new(name: impl Into<String>, size: Option<u64>) -> Self {
        Self {
            name: name.into(),
            size,
            ..Default::default()
        }
    }
}

/// Reference to a signal from a process's `ins` or `outs`.
///
/// Documents normally use indices into the `signals` array,
/// but signal names are accepted as well.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum SignalRef {
    Index(usize),
    Name(String),
}

impl SignalRef {
    /// Resolve to a signal id, using `names` for name references.
    /// Returns `None` if the index is out of range or the name is unknown.
    pub fn resolve(
        &self,
        names: &HashMap<String, SignalId>,
        num_signals: usize,
    ) -> Option<SignalId> {
        match self {
            SignalRef::Index(idx) if *idx < num_signals => Some((*idx).into()),
            SignalRef::Index(_) => None,
            SignalRef::Name(name) => names.get(name).copied(),
        }
    }
}

impl From<SignalId> for SignalRef {
    fn from(id: SignalId) -> Self {
        SignalRef::Index(id.into())
    }
}

impl std::fmt::Display for SignalRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalRef::Index(idx) => write!(f, "{idx}"),
            SignalRef::Name(name) => write!(f, "\"{name}\""),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use util::Hasher;

    #[test]
    fn test_resolve_index_and_name() {
        let mut names = HashMap::with_capacity_and_hasher(1, Hasher::default());
        names.insert("b.dat".to_owned(), SignalId::from(1usize));

        assert_eq!(Some(SignalId::from(0usize)), SignalRef::Index(0).resolve(&names, 2));
        assert_eq!(None, SignalRef::Index(2).resolve(&names, 2));
        assert_eq!(
            Some(SignalId::from(1usize)),
            SignalRef::Name("b.dat".to_owned()).resolve(&names, 2)
        );
        assert_eq!(None, SignalRef::Name("c.dat".to_owned()).resolve(&names, 2));
    }

    #[test]
    fn test_signal_keeps_unknown_keys() -> anyhow::Result<()> {
        let sig: Signal = serde_json::from_str(r#"{"name":"a","size":3,"md5":"abc"}"#)?;
        assert_eq!(Some(3), sig.size);
        assert_eq!(Some(&Value::from("abc")), sig.extra.get("md5"));
        let out = serde_json::to_value(&sig)?;
        assert_eq!("abc", out["md5"]);
        assert!(out.get("data").is_none());
        Ok(())
    }
}
