//! Turns a design snapshot into a `Component`: ports, bus interfaces and
//! parameters.
//!
//! Resolution runs in two phases. `bind` maps every recognized interface on
//! its own; `post_process` then sees the whole assembled component and may
//! only return additions, which are applied once all resolvers ran.

pub mod abstractions;
pub mod name_map;
pub mod registry;
pub mod values;

pub use name_map::NameMap;
pub use registry::{Additions, BusAbstraction, BusResolver, PostProcessContext, ResolverRegistry};

use crate::backend::{Backend, DesignSnapshot, HdlInterface, HdlShape};
use crate::config::PackagerConfig;
use crate::constants::{COMPONENT_NAME_PARAM, MODELPARAM_VALUE_PREFIX, PARAM_VALUE_PREFIX};
use crate::error::Result;
use crate::model::{Component, ModelParameter, Parameter, Port, Resolution, Value};

pub struct InterfaceResolver<'a> {
    backend: &'a dyn Backend,
    registry: &'a ResolverRegistry,
    config: &'a PackagerConfig,
}

impl<'a> InterfaceResolver<'a> {
    pub fn new(
        backend: &'a dyn Backend,
        registry: &'a ResolverRegistry,
        config: &'a PackagerConfig,
    ) -> Self {
        Self {
            backend,
            registry,
            config,
        }
    }

    /// Component of `design` without vendor, library, description or files
    pub fn resolve(&self, design: &DesignSnapshot) -> Result<Component> {
        let mut component = Component::new(&design.name, self.config);

        for param in &design.params {
            let value = values::param_value(
                self.backend,
                MODELPARAM_VALUE_PREFIX,
                param,
                Resolution::Generated,
            )?;
            let data_type = self.backend.serialize_type(&param.dtype).to_lowercase();
            component.model.model_parameters.push(ModelParameter {
                name: param.name.clone(),
                display_name: param.name.replace('_', " "),
                data_type,
                value,
            });
        }

        for intf in &design.interfaces {
            self.register_ports(&mut component.model.ports, intf, None, None);
        }
        tracing::debug!("{}: {} ports", design.name, component.model.ports.len());

        // Phase 1
        let mut bound = Vec::new();
        for intf in &design.interfaces {
            match self.registry.lookup(intf) {
                Some(resolver) => {
                    let bi = resolver.bind(intf, self.backend)?;
                    tracing::debug!(
                        "{}: bound as {} ({} port maps)",
                        intf.name,
                        bi.bus_type.name,
                        bi.port_maps.len()
                    );
                    bound.push((bi, intf, resolver));
                }
                None => match &intf.class_tag {
                    Some(tag) => tracing::debug!("{}: no resolver for {}", intf.name, tag),
                    None => tracing::debug!("{}: plain ports", intf.name),
                },
            }
        }
        bound.sort_by(|a, b| a.0.name.cmp(&b.0.name));
        component.bus_interfaces = bound.iter().map(|(bi, _, _)| bi.clone()).collect();

        component.parameters.push(Parameter::new(
            COMPONENT_NAME_PARAM,
            Value::new(&design.name, Resolution::User)
                .with_id(format!("{}{}", PARAM_VALUE_PREFIX, COMPONENT_NAME_PARAM)),
        ));
        for param in &design.params {
            let value = values::param_value(self.backend, PARAM_VALUE_PREFIX, param, Resolution::User)?;
            component.parameters.push(Parameter::new(&param.name, value));
        }

        // Phase 2
        let mut additions = Vec::with_capacity(bound.len());
        for (i, (_, source, resolver)) in bound.iter().enumerate() {
            let ctx = PostProcessContext {
                component: &component,
                bus_interface: &component.bus_interfaces[i],
                source,
                backend: self.backend,
            };
            additions.push(resolver.post_process(&ctx)?);
        }
        for (bi, add) in component.bus_interfaces.iter_mut().zip(additions) {
            bi.parameters.extend(add.interface_parameters);
            component.parameters.extend(add.component_parameters);
        }

        tracing::info!(
            "Resolved {}: {} ports, {} bus interfaces, {} parameters",
            component.name,
            component.model.ports.len(),
            component.bus_interfaces.len(),
            component.parameters.len()
        );
        Ok(component)
    }

    /// Flatten `intf` into ports in declaration order; sub-interfaces inherit
    /// the clock and reset association of their parent
    fn register_ports(
        &self,
        ports: &mut Vec<Port>,
        intf: &HdlInterface,
        clk: Option<&str>,
        rst: Option<&str>,
    ) {
        let clk = intf.associated_clk.as_deref().or(clk);
        let rst = intf.associated_rst.as_deref().or(rst);
        match &intf.shape {
            HdlShape::Signal(dtype) => {
                ports.push(values::port_from_signal(self.backend, intf, dtype, clk, rst));
            }
            HdlShape::Composite(children) => {
                for child in children {
                    self.register_ports(ports, child, clk, rst);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Expr, HdlParam, HdlType, SnapshotBackend};
    use crate::error::PackagerError;
    use crate::model::{Direction, IntfDirection};

    fn stream(name: &str, dir: Direction) -> HdlInterface {
        let signal = |s: &str, d: Direction, t: HdlType| {
            HdlInterface::signal(s, &format!("{}_{}", name, s), d, t)
        };
        HdlInterface::composite(
            name,
            dir,
            vec![
                signal("data", dir, HdlType::bits_expr(Expr::param("DATA_WIDTH", Expr::Int(8)))),
                signal("valid", dir, HdlType::Bit),
                signal("ready", dir.opposite(), HdlType::Bit),
            ],
        )
        .with_class_tag("axis")
        .with_associated_clk("clk")
    }

    fn design() -> DesignSnapshot {
        let mut d = DesignSnapshot::new("fifo");
        d.add_param(HdlParam::new("DATA_WIDTH", HdlType::Integer, Expr::Int(8)));
        d.add_interface(
            HdlInterface::signal("clk", "clk", Direction::In, HdlType::Bit)
                .with_class_tag("clock")
                .with_associated_rst("rst_n"),
        );
        d.add_interface(
            HdlInterface::signal("rst_n", "rst_n", Direction::In, HdlType::Bit)
                .with_class_tag("reset_n")
                .with_associated_clk("clk"),
        );
        d.add_interface(stream("s_axis", Direction::In));
        d.add_interface(stream("m_axis", Direction::Out));
        d.add_interface(HdlInterface::signal("count", "count", Direction::Out, HdlType::bits(4)));
        d
    }

    fn resolve(design: &DesignSnapshot) -> Result<Component> {
        let backend = SnapshotBackend::default();
        let registry = ResolverRegistry::with_defaults();
        let config = PackagerConfig::default();
        InterfaceResolver::new(&backend, &registry, &config).resolve(design)
    }

    #[test]
    fn test_resolve_fifo() {
        let c = resolve(&design()).unwrap();

        let ports: Vec<&str> = c.model.ports.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            ports,
            vec![
                "clk", "rst_n", "s_axis_data", "s_axis_valid", "s_axis_ready",
                "m_axis_data", "m_axis_valid", "m_axis_ready", "count"
            ]
        );
        assert_eq!(c.model.ports[2].associated_clk.as_deref(), Some("clk"));

        let names: Vec<&str> = c.bus_interfaces.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["clk", "m_axis", "rst_n", "s_axis"]);
        assert_eq!(c.bus_interface("m_axis").unwrap().direction, IntfDirection::Master);
        assert_eq!(c.bus_interface("s_axis").unwrap().direction, IntfDirection::Slave);

        let clk = c.bus_interface("clk").unwrap();
        assert_eq!(clk.parameter("ASSOCIATED_BUSIF").unwrap().value.text, "m_axis:s_axis");
        assert_eq!(clk.parameter("ASSOCIATED_RESET").unwrap().value.text, "rst_n");

        assert_eq!(c.parameters[0].name, COMPONENT_NAME_PARAM);
        assert_eq!(c.parameters[0].value.text, "fifo");
        assert_eq!(c.parameters[1].value.id.as_deref(), Some("PARAM_VALUE.DATA_WIDTH"));

        let mp = &c.model.model_parameters[0];
        assert_eq!(mp.display_name, "DATA WIDTH");
        assert_eq!(mp.data_type, "integer");
        assert_eq!(mp.value.resolution, Resolution::Generated);
    }

    #[test]
    fn test_unrecognized_interfaces_only_add_ports() {
        let mut d = DesignSnapshot::new("plain");
        d.add_interface(HdlInterface::signal("a", "a", Direction::In, HdlType::bits(8)));
        d.add_interface(
            HdlInterface::signal("b", "b", Direction::Out, HdlType::Bit).with_class_tag("spi"),
        );
        let c = resolve(&d).unwrap();
        assert!(c.bus_interfaces.is_empty());
        assert_eq!(c.model.ports.len(), 2);
        assert_eq!(c.parameters.len(), 1);
    }

    #[test]
    fn test_lookup_failure_propagates() {
        let mut d = DesignSnapshot::new("bad");
        d.add_interface(
            HdlInterface::composite(
                "m_axis",
                Direction::Out,
                vec![HdlInterface::signal("bogus", "m_axis_bogus", Direction::Out, HdlType::Bit)],
            )
            .with_class_tag("axis"),
        );
        match resolve(&d) {
            Err(PackagerError::LookupFailure { interface, path }) => {
                assert_eq!(interface, "m_axis");
                assert_eq!(path, "bogus");
            }
            other => panic!("unexpected result: {:?}", other.map(|c| c.name)),
        }
    }
}
