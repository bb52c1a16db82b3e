use crate::backend::{Backend, HdlInterface};
use crate::error::Result;
use crate::model::{BusInterface, Parameter, Vlnv};
use crate::resolve::abstractions::check_associated_clock;
use crate::resolve::name_map::NameMap;
use crate::resolve::registry::{Additions, BusAbstraction, BusResolver, PostProcessContext};
use crate::resolve::values::signal_width;

/// AXI4-Stream
pub struct AxiStream {
    abstraction: BusAbstraction,
}

impl AxiStream {
    pub fn new() -> Self {
        let map = NameMap::signals(&[
            ("id", "TID"),
            ("data", "TDATA"),
            ("keep", "TKEEP"),
            ("strb", "TSTRB"),
            ("user", "TUSER"),
            ("dest", "TDEST"),
            ("last", "TLAST"),
            ("valid", "TVALID"),
            ("ready", "TREADY"),
        ]);
        Self {
            abstraction: BusAbstraction {
                bus_type: Vlnv::new("xilinx.com", "interface", "axis", "1.0"),
                quartus_type: "axi4stream".to_string(),
                quartus_map: Some(map.lowercase()),
                map,
            },
        }
    }
}

impl Default for AxiStream {
    fn default() -> Self {
        Self::new()
    }
}

fn has(intf: &HdlInterface, name: &str) -> &'static str {
    if intf.child(name).is_some() {
        "1"
    } else {
        "0"
    }
}

/// Number of whole bytes needed for `width` bits
fn byte_count(width: i64) -> i64 {
    width / 8 + i64::from(width % 8 > 0)
}

impl BusResolver for AxiStream {
    fn abstraction(&self) -> &BusAbstraction {
        &self.abstraction
    }

    fn bind(&self, intf: &HdlInterface, backend: &dyn Backend) -> Result<BusInterface> {
        let mut bi = self.abstraction.bind_ports(intf, backend)?;
        let name = intf.name.as_str();

        let data_width = signal_width(backend, intf, "data")?.unwrap_or(0);
        let mut param = |p: &str, v: String| {
            bi.parameters.push(Parameter::immediate_bus_param(name, p, &v));
        };
        param("TDATA_NUM_BYTES", byte_count(data_width).to_string());
        param("HAS_TREADY", has(intf, "ready").to_string());
        param("HAS_TSTRB", has(intf, "strb").to_string());
        param("HAS_TKEEP", has(intf, "keep").to_string());
        param("HAS_TLAST", has(intf, "last").to_string());
        for (p, signal) in [("TID_WIDTH", "id"), ("TDEST_WIDTH", "dest"), ("TUSER_WIDTH", "user")] {
            let width = signal_width(backend, intf, signal)?.unwrap_or(0);
            param(p, width.to_string());
        }

        Ok(bi)
    }

    fn post_process(&self, ctx: &PostProcessContext<'_>) -> Result<Additions> {
        check_associated_clock(ctx);

        let name = &ctx.bus_interface.name;
        let Some(data_width) = signal_width(ctx.backend, ctx.source, "data")? else {
            return Ok(Additions::default());
        };
        let bytes = byte_count(data_width);
        for signal in ["keep", "strb"] {
            if let Some(width) = signal_width(ctx.backend, ctx.source, signal)? {
                if width != bytes {
                    tracing::warn!(
                        "{}: {} is {} bits wide, expected {} for {} data bits",
                        name,
                        signal,
                        width,
                        bytes,
                        data_width
                    );
                }
            }
        }

        Ok(Additions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{HdlType, SnapshotBackend};
    use crate::model::{Direction, IntfDirection};

    fn m_axis() -> HdlInterface {
        HdlInterface::composite(
            "m_axis",
            Direction::Out,
            vec![
                HdlInterface::signal("data", "m_axis_data", Direction::Out, HdlType::bits(8)),
                HdlInterface::signal("last", "m_axis_last", Direction::Out, HdlType::Bit),
                HdlInterface::signal("valid", "m_axis_valid", Direction::Out, HdlType::Bit),
                HdlInterface::signal("ready", "m_axis_ready", Direction::In, HdlType::Bit),
            ],
        )
        .with_class_tag("axis")
    }

    #[test]
    fn test_bind() {
        let bi = AxiStream::new().bind(&m_axis(), &SnapshotBackend::default()).unwrap();

        assert_eq!(bi.direction, IntfDirection::Master);
        assert_eq!(bi.port_maps.len(), 4);
        assert_eq!(bi.port_map("TDATA").unwrap().quartus_logical, "tdata");
        assert_eq!(bi.port_map("TREADY").unwrap().direction, Direction::In);

        let value = |n: &str| bi.parameter(n).unwrap().value.text.clone();
        assert_eq!(value("TDATA_NUM_BYTES"), "1");
        assert_eq!(value("HAS_TLAST"), "1");
        assert_eq!(value("HAS_TKEEP"), "0");
        assert_eq!(value("TUSER_WIDTH"), "0");
        assert_eq!(
            bi.parameter("HAS_TREADY").unwrap().value.id.as_deref(),
            Some("BUSIFPARAM_VALUE.M_AXIS.HAS_TREADY")
        );
    }

    #[test]
    fn test_unknown_signal_fails() {
        let mut intf = m_axis();
        if let crate::backend::HdlShape::Composite(children) = &mut intf.shape {
            children.push(HdlInterface::signal("err", "m_axis_err", Direction::Out, HdlType::Bit));
        }
        assert!(AxiStream::new().bind(&intf, &SnapshotBackend::default()).is_err());
    }

    #[test]
    fn test_byte_count() {
        assert_eq!(byte_count(0), 0);
        assert_eq!(byte_count(1), 1);
        assert_eq!(byte_count(8), 1);
        assert_eq!(byte_count(9), 2);
        assert_eq!(byte_count(i64::MAX), i64::MAX / 8 + 1);
    }

    #[test]
    fn test_huge_data_width_does_not_overflow() {
        let intf = HdlInterface::composite(
            "m_axis",
            Direction::Out,
            vec![
                HdlInterface::signal("data", "m_axis_data", Direction::Out, HdlType::bits(i64::MAX)),
                HdlInterface::signal("valid", "m_axis_valid", Direction::Out, HdlType::Bit),
            ],
        )
        .with_class_tag("axis");
        let bi = AxiStream::new().bind(&intf, &SnapshotBackend::default()).unwrap();
        assert_eq!(
            bi.parameter("TDATA_NUM_BYTES").unwrap().value.text,
            (i64::MAX / 8 + 1).to_string()
        );
    }
}
