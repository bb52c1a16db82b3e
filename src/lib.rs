pub mod backend;
pub mod codegen;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod packager;
pub mod resolve;
pub mod utils;

// Re-export commonly used types
pub use backend::{Backend, DesignSnapshot, HdlInterface, HdlParam, HdlType, SnapshotBackend};
pub use codegen::{GuiTclGenerator, IpXactGenerator, QuartusTclGenerator};
pub use config::PackagerConfig;
pub use error::{PackagerError, Result};
pub use model::Component;
pub use packager::IpCorePackager;
pub use resolve::{BusResolver, InterfaceResolver, ResolverRegistry};
pub use utils::{Clock, FixedClock, SystemClock};
