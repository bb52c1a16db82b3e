use crate::error::Result;
use crate::model::{Parameter, Vlnv};
use crate::resolve::name_map::NameMap;
use crate::resolve::registry::{Additions, BusAbstraction, BusResolver, PostProcessContext};

/// Clock signal; collects the interfaces clocked by it
pub struct Clock {
    abstraction: BusAbstraction,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            abstraction: BusAbstraction {
                bus_type: Vlnv::new("xilinx.com", "signal", "clock", "1.0"),
                quartus_type: "clock".to_string(),
                map: NameMap::leaf("CLK"),
                quartus_map: Some(NameMap::leaf("clk")),
            },
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl BusResolver for Clock {
    fn abstraction(&self) -> &BusAbstraction {
        &self.abstraction
    }

    fn post_process(&self, ctx: &PostProcessContext<'_>) -> Result<Additions> {
        let clk = ctx.bus_interface.name.as_str();
        let mut busif = Vec::new();
        let mut resets = Vec::new();
        for bi in &ctx.component.bus_interfaces {
            if bi.name == clk || bi.associated_clk.as_deref() != Some(clk) {
                continue;
            }
            if bi.bus_type.name == "reset" {
                resets.push(bi.name.clone());
            } else {
                busif.push(bi.name.clone());
            }
        }
        if let Some(rst) = &ctx.source.associated_rst {
            if !resets.contains(rst) {
                resets.push(rst.clone());
            }
        }

        let mut additions = Additions::default();
        for (name, members) in [("ASSOCIATED_BUSIF", busif), ("ASSOCIATED_RESET", resets)] {
            if !members.is_empty() {
                additions
                    .interface_parameters
                    .push(Parameter::immediate_bus_param(clk, name, &members.join(":")));
            }
        }
        tracing::debug!("{}: {} clock parameters", clk, additions.interface_parameters.len());
        Ok(additions)
    }
}
