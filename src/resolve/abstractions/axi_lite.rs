use crate::backend::{Backend, HdlInterface};
use crate::error::Result;
use crate::model::{BusInterface, Parameter, Vlnv};
use crate::resolve::abstractions::check_associated_clock;
use crate::resolve::name_map::NameMap;
use crate::resolve::registry::{Additions, BusAbstraction, BusResolver, PostProcessContext};
use crate::resolve::values::{signal_width, width_param};

/// AXI4-Lite memory mapped interface
pub struct AxiLite {
    abstraction: BusAbstraction,
}

impl AxiLite {
    pub fn new() -> Self {
        let map = NameMap::group([
            (
                "aw",
                NameMap::signals(&[
                    ("addr", "AWADDR"),
                    ("prot", "AWPROT"),
                    ("valid", "AWVALID"),
                    ("ready", "AWREADY"),
                ]),
            ),
            (
                "w",
                NameMap::signals(&[
                    ("data", "WDATA"),
                    ("strb", "WSTRB"),
                    ("valid", "WVALID"),
                    ("ready", "WREADY"),
                ]),
            ),
            (
                "b",
                NameMap::signals(&[("resp", "BRESP"), ("valid", "BVALID"), ("ready", "BREADY")]),
            ),
            (
                "ar",
                NameMap::signals(&[
                    ("addr", "ARADDR"),
                    ("prot", "ARPROT"),
                    ("valid", "ARVALID"),
                    ("ready", "ARREADY"),
                ]),
            ),
            (
                "r",
                NameMap::signals(&[
                    ("data", "RDATA"),
                    ("resp", "RRESP"),
                    ("valid", "RVALID"),
                    ("ready", "RREADY"),
                ]),
            ),
        ]);
        Self {
            abstraction: BusAbstraction {
                bus_type: Vlnv::new("xilinx.com", "interface", "aximm", "1.0"),
                quartus_type: "axi4lite".to_string(),
                quartus_map: Some(map.lowercase()),
                map,
            },
        }
    }
}

impl Default for AxiLite {
    fn default() -> Self {
        Self::new()
    }
}

fn channel_signal<'a>(intf: &'a HdlInterface, channel: &str, signal: &str) -> Option<&'a HdlInterface> {
    intf.child(channel).and_then(|c| c.child(signal))
}

impl BusResolver for AxiLite {
    fn abstraction(&self) -> &BusAbstraction {
        &self.abstraction
    }

    fn bind(&self, intf: &HdlInterface, backend: &dyn Backend) -> Result<BusInterface> {
        let mut bi = self.abstraction.bind_ports(intf, backend)?;
        let name = intf.name.as_str();

        bi.parameters
            .push(Parameter::immediate_bus_param(name, "PROTOCOL", "AXI4LITE"));
        let addr = channel_signal(intf, "ar", "addr").or_else(|| channel_signal(intf, "aw", "addr"));
        if let Some(dtype) = addr.and_then(|s| s.signal_type()) {
            bi.parameters
                .push(width_param(backend, name, "ADDR_WIDTH", dtype)?);
        }
        let data = channel_signal(intf, "r", "data").or_else(|| channel_signal(intf, "w", "data"));
        if let Some(dtype) = data.and_then(|s| s.signal_type()) {
            bi.parameters
                .push(width_param(backend, name, "DATA_WIDTH", dtype)?);
        }

        Ok(bi)
    }

    fn post_process(&self, ctx: &PostProcessContext<'_>) -> Result<Additions> {
        check_associated_clock(ctx);

        for (read, write) in [("ar.addr", "aw.addr"), ("r.data", "w.data")] {
            let r = signal_width(ctx.backend, ctx.source, read)?;
            let w = signal_width(ctx.backend, ctx.source, write)?;
            if let (Some(r), Some(w)) = (r, w) {
                if r != w {
                    tracing::warn!(
                        "{}: {} is {} bits wide but {} is {}",
                        ctx.bus_interface.name,
                        read,
                        r,
                        write,
                        w
                    );
                }
            }
        }

        Ok(Additions::default())
    }
}
