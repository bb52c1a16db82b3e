use std::collections::HashMap;

use crate::backend::{Backend, HdlInterface, HdlShape};
use crate::error::{PackagerError, Result};
use crate::model::PortMap;

/// Logical naming of an interface: one name for a signal, or a nested map
/// keyed by sub-interface name for a composite
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMap {
    Leaf(String),
    Group(HashMap<String, NameMap>),
}

impl NameMap {
    pub fn leaf(name: &str) -> Self {
        NameMap::Leaf(name.to_string())
    }

    pub fn group<'a>(entries: impl IntoIterator<Item = (&'a str, NameMap)>) -> Self {
        NameMap::Group(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    /// Group of signals: `(sub-interface name, logical name)` pairs
    pub fn signals(pairs: &[(&str, &str)]) -> Self {
        Self::group(pairs.iter().map(|(k, v)| (*k, NameMap::leaf(v))))
    }

    /// Same map with every logical name lower-cased
    pub fn lowercase(&self) -> Self {
        match self {
            NameMap::Leaf(name) => NameMap::Leaf(name.to_lowercase()),
            NameMap::Group(entries) => NameMap::Group(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.lowercase()))
                    .collect(),
            ),
        }
    }
}

/// Walk `intf` together with both name maps and emit one port map per
/// physical signal, in declaration order.
///
/// Every sub-interface must have an entry in both maps; entries without a
/// matching sub-interface (optional signals) are ignored.
pub fn collect_port_maps(
    backend: &dyn Backend,
    bus_name: &str,
    intf: &HdlInterface,
    map: &NameMap,
    quartus_map: &NameMap,
) -> Result<Vec<PortMap>> {
    let mut port_maps = Vec::new();
    walk(backend, bus_name, intf, "", map, quartus_map, &mut port_maps)?;
    Ok(port_maps)
}

fn walk(
    backend: &dyn Backend,
    bus_name: &str,
    intf: &HdlInterface,
    path: &str,
    map: &NameMap,
    quartus_map: &NameMap,
    out: &mut Vec<PortMap>,
) -> Result<()> {
    match (&intf.shape, map, quartus_map) {
        (HdlShape::Signal(dtype), NameMap::Leaf(logical), NameMap::Leaf(quartus_logical)) => {
            let width = backend.type_width(dtype)?;
            out.push(PortMap {
                physical: intf.physical_name.clone(),
                logical: logical.clone(),
                quartus_logical: quartus_logical.clone(),
                direction: intf.direction,
                width: width.evaluated,
            });
            Ok(())
        }
        (HdlShape::Composite(children), NameMap::Group(entries), NameMap::Group(quartus_entries)) => {
            for child in children {
                let child_path = if path.is_empty() {
                    child.name.clone()
                } else {
                    format!("{}.{}", path, child.name)
                };
                let (Some(m), Some(q)) = (entries.get(&child.name), quartus_entries.get(&child.name))
                else {
                    return Err(PackagerError::lookup_failure(bus_name, child_path));
                };
                walk(backend, bus_name, child, &child_path, m, q, out)?;
            }
            Ok(())
        }
        _ => {
            let path = if path.is_empty() { intf.name.as_str() } else { path };
            Err(PackagerError::lookup_failure(bus_name, path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{HdlType, SnapshotBackend};
    use crate::model::Direction;

    fn handshake() -> HdlInterface {
        HdlInterface::composite(
            "m",
            Direction::Out,
            vec![
                HdlInterface::signal("data", "m_data", Direction::Out, HdlType::bits(16)),
                HdlInterface::signal("ready", "m_ready", Direction::In, HdlType::Bit),
            ],
        )
    }

    #[test]
    fn test_port_maps_follow_interface_order() {
        let map = NameMap::signals(&[("ready", "RDY"), ("data", "DATA"), ("last", "LAST")]);
        let maps =
            collect_port_maps(&SnapshotBackend::default(), "m", &handshake(), &map, &map.lowercase())
                .unwrap();

        assert_eq!(maps.len(), 2);
        assert_eq!(maps[0].physical, "m_data");
        assert_eq!(maps[0].logical, "DATA");
        assert_eq!(maps[0].quartus_logical, "data");
        assert_eq!(maps[0].width, "16");
        assert_eq!(maps[1].direction, Direction::In);
    }

    #[test]
    fn test_missing_entry_is_lookup_failure() {
        let map = NameMap::signals(&[("data", "DATA")]);
        let err = collect_port_maps(&SnapshotBackend::default(), "m", &handshake(), &map, &map)
            .unwrap_err();
        match err {
            PackagerError::LookupFailure { interface, path } => {
                assert_eq!(interface, "m");
                assert_eq!(path, "ready");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_nested_groups() {
        let intf = HdlInterface::composite(
            "bus",
            Direction::Out,
            vec![HdlInterface::composite(
                "aw",
                Direction::Out,
                vec![HdlInterface::signal("addr", "bus_awaddr", Direction::Out, HdlType::bits(4))],
            )],
        );
        let map = NameMap::group([("aw", NameMap::signals(&[("addr", "AWADDR")]))]);
        let maps = collect_port_maps(&SnapshotBackend::default(), "bus", &intf, &map, &map).unwrap();
        assert_eq!(maps[0].logical, "AWADDR");

        let leaf_only = NameMap::group([("aw", NameMap::leaf("AW"))]);
        let err = collect_port_maps(&SnapshotBackend::default(), "bus", &intf, &leaf_only, &leaf_only)
            .unwrap_err();
        assert!(matches!(err, PackagerError::LookupFailure { ref path, .. } if path == "aw"));
    }
}
