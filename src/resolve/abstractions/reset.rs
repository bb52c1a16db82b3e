use crate::backend::{Backend, HdlInterface};
use crate::error::Result;
use crate::model::{BusInterface, Parameter, Vlnv};
use crate::resolve::name_map::NameMap;
use crate::resolve::registry::{BusAbstraction, BusResolver};

/// Synchronous reset, active high or active low
pub struct Reset {
    abstraction: BusAbstraction,
    active_low: bool,
}

impl Reset {
    pub fn new(active_low: bool) -> Self {
        let quartus_logical = if active_low { "reset_n" } else { "reset" };
        Self {
            abstraction: BusAbstraction {
                bus_type: Vlnv::new("xilinx.com", "signal", "reset", "1.0"),
                quartus_type: "reset".to_string(),
                map: NameMap::leaf("RST"),
                quartus_map: Some(NameMap::leaf(quartus_logical)),
            },
            active_low,
        }
    }

    pub fn polarity(&self) -> &'static str {
        if self.active_low {
            "ACTIVE_LOW"
        } else {
            "ACTIVE_HIGH"
        }
    }
}

impl BusResolver for Reset {
    fn abstraction(&self) -> &BusAbstraction {
        &self.abstraction
    }

    fn bind(&self, intf: &HdlInterface, backend: &dyn Backend) -> Result<BusInterface> {
        let mut bi = self.abstraction.bind_ports(intf, backend)?;
        bi.parameters
            .push(Parameter::immediate_bus_param(&intf.name, "POLARITY", self.polarity()));
        Ok(bi)
    }
}
