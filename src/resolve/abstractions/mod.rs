//! Built-in bus abstractions

pub mod axi_lite;
pub mod axis;
pub mod clock;
pub mod reset;

pub use axi_lite::AxiLite;
pub use axis::AxiStream;
pub use clock::Clock;
pub use reset::Reset;

use crate::resolve::registry::PostProcessContext;

/// Warn when the associated clock of a bus interface is neither a clock
/// interface nor a port of the component
pub(crate) fn check_associated_clock(ctx: &PostProcessContext<'_>) -> bool {
    let Some(clk) = ctx.bus_interface.associated_clk.as_deref() else {
        return true;
    };
    let component = ctx.component;
    let found = component.bus_interfaces.iter().any(|bi| bi.name == clk)
        || component.model.ports.iter().any(|p| p.name == clk);
    if !found {
        tracing::warn!(
            "{}: associated clock {} is not an interface of {}",
            ctx.bus_interface.name,
            clk,
            component.name
        );
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{HdlInterface, HdlType, SnapshotBackend};
    use crate::config::PackagerConfig;
    use crate::model::{BusInterface, Component, Direction, IntfDirection};
    use crate::resolve::registry::BusResolver;

    fn bus(name: &str, resolver: &dyn BusResolver, clk: Option<&str>) -> BusInterface {
        let mut bi = BusInterface::new(
            name,
            resolver.abstraction().bus_type.clone(),
            &resolver.abstraction().quartus_type,
            IntfDirection::Slave,
        );
        bi.associated_clk = clk.map(|s| s.to_string());
        bi
    }

    #[test]
    fn test_reset_polarity() {
        let backend = SnapshotBackend::default();
        let rst_n = HdlInterface::signal("rst_n", "rst_n", Direction::In, HdlType::Bit);
        let bi = Reset::new(true).bind(&rst_n, &backend).unwrap();
        assert_eq!(bi.parameter("POLARITY").unwrap().value.text, "ACTIVE_LOW");
        assert_eq!(bi.port_maps[0].logical, "RST");
        assert_eq!(bi.port_maps[0].quartus_logical, "reset_n");
        assert_eq!(bi.direction, IntfDirection::Slave);

        let rst = HdlInterface::signal("rst", "rst", Direction::In, HdlType::Bit);
        let bi = Reset::new(false).bind(&rst, &backend).unwrap();
        assert_eq!(bi.parameter("POLARITY").unwrap().value.text, "ACTIVE_HIGH");
        assert_eq!(bi.port_maps[0].quartus_logical, "reset");
    }

    #[test]
    fn test_clock_collects_associated_interfaces() {
        let backend = SnapshotBackend::default();
        let clock = Clock::new();
        let axis = AxiStream::new();
        let reset = Reset::new(true);

        let mut component = Component::new("top", &PackagerConfig::default());
        component.bus_interfaces = vec![
            bus("clk", &clock, None),
            bus("m_axis", &axis, Some("clk")),
            bus("rst_n", &reset, Some("clk")),
            bus("s_axis", &axis, Some("clk")),
            bus("other", &axis, Some("clk2")),
        ];
        let source = HdlInterface::signal("clk", "clk", Direction::In, HdlType::Bit)
            .with_class_tag("clock")
            .with_associated_rst("rst_n");

        let ctx = PostProcessContext {
            component: &component,
            bus_interface: &component.bus_interfaces[0],
            source: &source,
            backend: &backend,
        };
        let additions = clock.post_process(&ctx).unwrap();

        assert!(additions.component_parameters.is_empty());
        let params = &additions.interface_parameters;
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "ASSOCIATED_BUSIF");
        assert_eq!(params[0].value.text, "m_axis:s_axis");
        assert_eq!(params[0].value.id.as_deref(), Some("BUSIFPARAM_VALUE.CLK.ASSOCIATED_BUSIF"));
        assert_eq!(params[1].name, "ASSOCIATED_RESET");
        assert_eq!(params[1].value.text, "rst_n");
    }

    #[test]
    fn test_unclocked_clock_adds_nothing() {
        let backend = SnapshotBackend::default();
        let clock = Clock::new();
        let mut component = Component::new("top", &PackagerConfig::default());
        component.bus_interfaces = vec![bus("clk", &clock, None)];
        let source = HdlInterface::signal("clk", "clk", Direction::In, HdlType::Bit);
        let ctx = PostProcessContext {
            component: &component,
            bus_interface: &component.bus_interfaces[0],
            source: &source,
            backend: &backend,
        };
        assert!(clock.post_process(&ctx).unwrap().interface_parameters.is_empty());
    }

    #[test]
    fn test_associated_clock_found_by_interface_name() {
        let backend = SnapshotBackend::default();
        let mut component = Component::new("top", &PackagerConfig::default());
        component.bus_interfaces = vec![
            bus("sys_clk", &Clock::new(), None),
            bus("m_axis", &AxiStream::new(), Some("sys_clk")),
            bus("s_axis", &AxiStream::new(), Some("aux_clk")),
        ];
        let source = HdlInterface::signal("sys_clk", "clk_i", Direction::In, HdlType::Bit);

        let ctx = PostProcessContext {
            component: &component,
            bus_interface: &component.bus_interfaces[1],
            source: &source,
            backend: &backend,
        };
        assert!(check_associated_clock(&ctx));

        let ctx = PostProcessContext {
            bus_interface: &component.bus_interfaces[2],
            ..ctx
        };
        assert!(!check_associated_clock(&ctx));
    }
}
