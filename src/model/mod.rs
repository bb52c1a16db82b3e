pub mod bus_interface;
pub mod component;
pub mod direction;
pub mod file;
pub mod port;
pub mod value;

pub use bus_interface::{BusInterface, PortMap, Vlnv};
pub use component::{Component, Model, ModelParameter, VendorExtensions, View};
pub use direction::{Direction, IntfDirection};
pub use file::{File, FileKind, FileSet};
pub use port::{Port, Vector, WireType};
pub use value::{Parameter, Resolution, Value, ValueFormat};
