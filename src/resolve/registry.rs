use std::collections::HashMap;

use crate::backend::{Backend, HdlInterface};
use crate::error::Result;
use crate::model::{BusInterface, Component, Parameter, Vlnv};
use crate::resolve::abstractions::{AxiLite, AxiStream, Clock, Reset};
use crate::resolve::name_map::{collect_port_maps, NameMap};

/// Static description of a bus abstraction
#[derive(Debug, Clone)]
pub struct BusAbstraction {
    pub bus_type: Vlnv,
    /// Interface type of component_hw.tcl
    pub quartus_type: String,
    pub map: NameMap,
    /// Logical names for component_hw.tcl, `map` when unset
    pub quartus_map: Option<NameMap>,
}

impl BusAbstraction {
    pub fn quartus_map(&self) -> &NameMap {
        self.quartus_map.as_ref().unwrap_or(&self.map)
    }

    /// BusInterface of `intf` with its port maps and no parameters
    pub fn bind_ports(&self, intf: &HdlInterface, backend: &dyn Backend) -> Result<BusInterface> {
        let mut bi = BusInterface::new(
            &intf.name,
            self.bus_type.clone(),
            &self.quartus_type,
            intf.intf_direction(),
        );
        bi.port_maps = collect_port_maps(backend, &intf.name, intf, &self.map, self.quartus_map())?;
        bi.associated_clk = intf.associated_clk.clone();
        bi.associated_rst = intf.associated_rst.clone();
        Ok(bi)
    }
}

/// Read-only view handed to the second resolution phase
pub struct PostProcessContext<'a> {
    /// Component with every bus interface bound and all design parameters
    pub component: &'a Component,
    pub bus_interface: &'a BusInterface,
    pub source: &'a HdlInterface,
    pub backend: &'a dyn Backend,
}

/// Parameters contributed by the second resolution phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Additions {
    pub interface_parameters: Vec<Parameter>,
    pub component_parameters: Vec<Parameter>,
}

pub trait BusResolver: Send + Sync {
    fn abstraction(&self) -> &BusAbstraction;

    /// Phase 1: ports and immediate parameters of one interface
    fn bind(&self, intf: &HdlInterface, backend: &dyn Backend) -> Result<BusInterface> {
        self.abstraction().bind_ports(intf, backend)
    }

    /// Phase 2: runs once the whole component is assembled
    fn post_process(&self, _ctx: &PostProcessContext<'_>) -> Result<Additions> {
        Ok(Additions::default())
    }
}

/// Bus-abstraction resolvers keyed by interface class tag
pub struct ResolverRegistry {
    resolvers: HashMap<String, Box<dyn BusResolver>>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self {
            resolvers: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("axis", Box::new(AxiStream::new()));
        registry.register("axi_lite", Box::new(AxiLite::new()));
        registry.register("clock", Box::new(Clock::new()));
        registry.register("reset", Box::new(Reset::new(false)));
        registry.register("reset_n", Box::new(Reset::new(true)));
        registry
    }

    pub fn register(&mut self, tag: &str, resolver: Box<dyn BusResolver>) {
        self.resolvers.insert(tag.to_string(), resolver);
    }

    pub fn get(&self, tag: &str) -> Option<&dyn BusResolver> {
        self.resolvers.get(tag).map(|r| r.as_ref())
    }

    /// Resolver for the class tag of `intf`, `None` for plain ports
    pub fn lookup(&self, intf: &HdlInterface) -> Option<&dyn BusResolver> {
        intf.class_tag.as_deref().and_then(|tag| self.get(tag))
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HdlType;
    use crate::model::Direction;

    #[test]
    fn test_default_registry() {
        let registry = ResolverRegistry::with_defaults();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get("axis").unwrap().abstraction().quartus_type, "axi4stream");
        assert!(registry.get("wishbone").is_none());
        assert!(ResolverRegistry::new().is_empty());
    }

    #[test]
    fn test_lookup_by_class_tag() {
        let registry = ResolverRegistry::default();
        let clk = HdlInterface::signal("clk", "clk", Direction::In, HdlType::Bit);
        assert!(registry.lookup(&clk).is_none());
        assert!(registry.lookup(&clk.clone().with_class_tag("clock")).is_some());
        assert!(registry.lookup(&clk.with_class_tag("unknown")).is_none());
    }
}
