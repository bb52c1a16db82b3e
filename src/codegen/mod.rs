pub mod gui_gen;
pub mod ipxact_gen;
pub mod quartus_gen;

pub use gui_gen::GuiTclGenerator;
pub use ipxact_gen::IpXactGenerator;
pub use quartus_gen::QuartusTclGenerator;
