use crate::model::{Direction, IntfDirection, Parameter};

/// Vendor/library/name/version identifier of a bus definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vlnv {
    pub vendor: String,
    pub library: String,
    pub name: String,
    pub version: String,
}

impl Vlnv {
    pub fn new(vendor: &str, library: &str, name: &str, version: &str) -> Self {
        Self {
            vendor: vendor.to_string(),
            library: library.to_string(),
            name: name.to_string(),
            version: version.to_string(),
        }
    }

    /// Abstraction type matching this bus type (`<name>_rtl`)
    pub fn rtl_abstraction(&self) -> Self {
        Self {
            name: format!("{}_rtl", self.name),
            ..self.clone()
        }
    }
}

/// One physical signal of a bus interface with its logical names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMap {
    pub physical: String,
    /// Logical name in component.xml
    pub logical: String,
    /// Logical name in component_hw.tcl
    pub quartus_logical: String,
    pub direction: Direction,
    /// Statically evaluated bit width
    pub width: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusInterface {
    pub name: String,
    pub bus_type: Vlnv,
    pub abstraction_type: Vlnv,
    /// Interface type of component_hw.tcl, e.g. `axi4stream`
    pub quartus_type: String,
    pub direction: IntfDirection,
    pub port_maps: Vec<PortMap>,
    pub parameters: Vec<Parameter>,
    pub associated_clk: Option<String>,
    pub associated_rst: Option<String>,
}

impl BusInterface {
    pub fn new(name: &str, bus_type: Vlnv, quartus_type: &str, direction: IntfDirection) -> Self {
        Self {
            name: name.to_string(),
            abstraction_type: bus_type.rtl_abstraction(),
            bus_type,
            quartus_type: quartus_type.to_string(),
            direction,
            port_maps: Vec::new(),
            parameters: Vec::new(),
            associated_clk: None,
            associated_rst: None,
        }
    }

    pub fn port_map(&self, logical: &str) -> Option<&PortMap> {
        self.port_maps.iter().find(|p| p.logical == logical)
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}
