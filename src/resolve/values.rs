use crate::backend::{Backend, Expr, HdlInterface, HdlParam, HdlType};
use crate::error::Result;
use crate::model::{Parameter, Port, Resolution, Value, ValueFormat, Vector, WireType};

/// Value of a generic with id `<prefix><name>`
pub fn param_value(
    backend: &dyn Backend,
    id_prefix: &str,
    param: &HdlParam,
    resolution: Resolution,
) -> Result<Value> {
    let format = ValueFormat::for_type(&param.dtype)?;
    let serialized = backend.serialize_value(&param.value);
    let text = match format {
        ValueFormat::Bool => serialized.evaluated.to_lowercase(),
        _ => serialized.evaluated,
    };
    Ok(Value::new(&text, resolution)
        .with_id(format!("{}{}", id_prefix, param.name))
        .with_format(format))
}

/// Vector boundary: `immediate` when constant, `dependent` otherwise
pub fn boundary_value(backend: &dyn Backend, expr: &Expr) -> Value {
    Value::from_serialized(&backend.serialize_value(expr), Resolution::Immediate)
        .with_format(ValueFormat::Long)
}

/// Bus interface parameter holding the width of a signal type; integrators
/// may change it when the width is a plain constant
pub fn width_param(
    backend: &dyn Backend,
    interface_name: &str,
    name: &str,
    dtype: &HdlType,
) -> Result<Parameter> {
    let width = backend.type_width(dtype)?;
    Ok(Parameter::bus_param(
        interface_name,
        name,
        Value::from_serialized(&width, Resolution::User),
    ))
}

/// Evaluated bit width of sub-signal `path` (`.` separated) of `intf`
pub fn signal_width(backend: &dyn Backend, intf: &HdlInterface, path: &str) -> Result<Option<i64>> {
    let mut current = intf;
    for name in path.split('.') {
        match current.child(name) {
            Some(child) => current = child,
            None => return Ok(None),
        }
    }
    let Some(dtype) = current.signal_type() else {
        return Ok(None);
    };
    let width = backend.type_width(dtype)?;
    Ok(width.evaluated.parse::<i64>().ok())
}

pub fn port_from_signal(
    backend: &dyn Backend,
    signal: &HdlInterface,
    dtype: &HdlType,
    associated_clk: Option<&str>,
    associated_rst: Option<&str>,
) -> Port {
    let type_name = WireType::display_name(&backend.serialize_type(dtype));
    let vector = backend.vector_of(dtype).map(|(left, right)| Vector {
        left: boundary_value(backend, &left),
        right: boundary_value(backend, &right),
    });

    let mut port = Port::new(&signal.physical_name, signal.direction, WireType { type_name, vector });
    port.associated_clk = associated_clk.map(|s| s.to_string());
    port.associated_rst = associated_rst.map(|s| s.to_string());
    port
}
