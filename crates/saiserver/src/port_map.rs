//! Front-panel port map.
//!
//! Lines look like `Ethernet0  1,2,3,4 [more columns]`; only the name and
//! the lane list are read. Switch ports are matched to front-panel names by
//! hardware lanes: a port belongs to a name when every one of its lanes is
//! in that name's lane set.

use crate::error::{Result, ServerError};
use log::debug;
use sai_native::ObjectId;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortMap {
    /// Front-panel name to its lanes, in file order.
    ports: Vec<(String, BTreeSet<u32>)>,
}

impl PortMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ServerError::file_read(path, e))?;
        let map = Self::parse(&content)?;
        debug!("Loaded {} front ports from {}", map.len(), path.display());
        Ok(map)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut ports = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut columns = line.split_whitespace();
            let (Some(name), Some(lanes)) = (columns.next(), columns.next()) else {
                return Err(ServerError::PortMap {
                    line: index + 1,
                    reason: "expected '<name> <lanes>'".to_string(),
                });
            };
            let lanes = lanes
                .split(',')
                .map(|lane| lane.trim().parse::<u32>())
                .collect::<std::result::Result<BTreeSet<_>, _>>()
                .map_err(|e| ServerError::PortMap {
                    line: index + 1,
                    reason: format!("bad lane list '{}': {}", lanes, e),
                })?;
            ports.push((name.to_string(), lanes));
        }
        Ok(Self { ports })
    }

    pub fn insert(&mut self, name: impl Into<String>, lanes: impl IntoIterator<Item = u32>) {
        self.ports.push((name.into(), lanes.into_iter().collect()));
    }

    pub fn lanes(&self, name: &str) -> Option<&BTreeSet<u32>> {
        self.ports
            .iter()
            .find(|(alias, _)| alias == name)
            .map(|(_, lanes)| lanes)
    }

    /// The front-panel name whose lane set holds all of `lanes`.
    pub fn alias_for_lanes(&self, lanes: &[u32]) -> Option<&str> {
        self.ports
            .iter()
            .find(|(_, set)| lanes.iter().all(|lane| set.contains(lane)))
            .map(|(alias, _)| alias.as_str())
    }

    /// The first switch port whose lanes all belong to `name`, or NULL.
    pub fn port_id_by_front_port<'a>(
        &self,
        name: &str,
        switch_ports: impl IntoIterator<Item = (ObjectId, &'a [u32])>,
    ) -> ObjectId {
        let Some(set) = self.lanes(name) else {
            return ObjectId::NULL;
        };
        switch_ports
            .into_iter()
            .find(|(_, lanes)| lanes.iter().all(|lane| set.contains(lane)))
            .map(|(oid, _)| oid)
            .unwrap_or(ObjectId::NULL)
    }

    /// Switch ports ordered by the number in their front-panel name.
    ///
    /// Ports without a matching name are left out. When two names carry the
    /// same number the later port wins.
    pub fn port_list_by_front_port<'a>(
        &self,
        switch_ports: impl IntoIterator<Item = (ObjectId, &'a [u32])>,
    ) -> Vec<ObjectId> {
        let mut ordered = BTreeMap::new();
        for (oid, lanes) in switch_ports {
            let Some(alias) = self.alias_for_lanes(lanes) else {
                continue;
            };
            let digits: String = alias.chars().filter(char::is_ascii_digit).collect();
            let number = digits.parse::<u64>().unwrap_or(0);
            ordered.insert(number, oid);
        }
        ordered.into_values().collect()
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PORT_CONFIG: &str = "\
# name        lanes        alias
Ethernet0     1,2,3,4      fortyGigE0/0
Ethernet4     5,6,7,8      fortyGigE0/4
Ethernet12    13,14,15,16  fortyGigE0/12
Ethernet8     9,10,11,12   fortyGigE0/8
";

    fn oid(raw: u64) -> ObjectId {
        ObjectId::from_raw(raw)
    }

    #[test]
    fn test_parse() {
        let map = PortMap::parse(PORT_CONFIG).unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(
            map.lanes("Ethernet4").unwrap().iter().copied().collect::<Vec<_>>(),
            vec![5, 6, 7, 8]
        );
        assert!(map.lanes("Ethernet100").is_none());
    }

    #[test]
    fn test_parse_errors_name_the_line() {
        let err = PortMap::parse("Ethernet0 1,2\nEthernet4\n").unwrap_err();
        assert!(matches!(err, ServerError::PortMap { line: 2, .. }));

        let err = PortMap::parse("Ethernet0 1,x\n").unwrap_err();
        assert!(matches!(err, ServerError::PortMap { line: 1, .. }));
    }

    #[test]
    fn test_port_id_by_front_port() {
        let map = PortMap::parse(PORT_CONFIG).unwrap();
        let lanes_a = [1, 2, 3, 4];
        let lanes_b = [5, 6];
        let ports = [(oid(0x10), &lanes_a[..]), (oid(0x11), &lanes_b[..])];

        assert_eq!(map.port_id_by_front_port("Ethernet0", ports), oid(0x10));
        // Breakout port using a subset of the lanes.
        assert_eq!(map.port_id_by_front_port("Ethernet4", ports), oid(0x11));
        assert_eq!(map.port_id_by_front_port("Ethernet8", ports), ObjectId::NULL);
        assert_eq!(map.port_id_by_front_port("Ethernet99", ports), ObjectId::NULL);
    }

    #[test]
    fn test_port_list_sorted_by_alias_number() {
        let map = PortMap::parse(PORT_CONFIG).unwrap();
        let lanes = [[13, 14, 15, 16], [1, 2, 3, 4], [9, 10, 11, 12], [5, 6, 7, 8]];
        let unmapped = [99];
        let ports = [
            (oid(0x13), &lanes[0][..]),
            (oid(0x10), &lanes[1][..]),
            (oid(0x12), &lanes[2][..]),
            (oid(0x99), &unmapped[..]),
            (oid(0x11), &lanes[3][..]),
        ];
        assert_eq!(
            map.port_list_by_front_port(ports),
            vec![oid(0x10), oid(0x11), oid(0x12), oid(0x13)]
        );
    }

    #[test]
    fn test_load_from_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), PORT_CONFIG).unwrap();
        assert_eq!(PortMap::load(file.path()).unwrap().len(), 4);
        assert!(PortMap::load("/nonexistent/port_config.ini").is_err());
    }
}
