//! Reference type and expression serialization used by the default
//! `Backend` methods. Types render VHDL-style, expressions TCL-style.

use crate::backend::design::{BinOp, Expr, HdlType};
use crate::error::{PackagerError, Result};

/// Serialized form of a value: expression text, statically evaluated text
/// and whether the expression depends on any generic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedValue {
    pub text: String,
    pub evaluated: String,
    pub is_constant: bool,
}

impl SerializedValue {
    pub fn constant(text: &str) -> Self {
        Self {
            text: text.to_string(),
            evaluated: text.to_string(),
            is_constant: true,
        }
    }
}

pub fn serialize_expr(expr: &Expr) -> String {
    match expr {
        Expr::Int(v) => v.to_string(),
        Expr::Bool(b) => b.to_string(),
        Expr::Str(s) => s.clone(),
        Expr::Param { name, .. } => name.clone(),
        Expr::Binary { op, lhs, rhs } => {
            format!("{} {} {}", serialize_operand(lhs), op.symbol(), serialize_operand(rhs))
        }
    }
}

fn serialize_operand(expr: &Expr) -> String {
    match expr {
        Expr::Binary { .. } => format!("({})", serialize_expr(expr)),
        _ => serialize_expr(expr),
    }
}

pub fn serialize_value(expr: &Expr) -> SerializedValue {
    SerializedValue {
        text: serialize_expr(expr),
        evaluated: serialize_expr(&expr.static_eval()),
        is_constant: expr.is_constant(),
    }
}

/// `(msb, lsb)` of a vector type, `None` for scalars
pub fn vector_of(dtype: &HdlType) -> Option<(Expr, Expr)> {
    match dtype {
        HdlType::Bits { width, .. } => {
            let msb = match width {
                Expr::Int(w) => match w.checked_sub(1) {
                    Some(msb) => Expr::Int(msb),
                    None => Expr::binary(BinOp::Sub, width.clone(), Expr::Int(1)),
                },
                w => Expr::binary(BinOp::Sub, w.clone(), Expr::Int(1)),
            };
            Some((msb, Expr::Int(0)))
        }
        _ => None,
    }
}

pub fn serialize_type(dtype: &HdlType) -> String {
    match dtype {
        HdlType::Bit => "std_logic".to_string(),
        HdlType::Bits { signed, .. } => {
            let name = match signed {
                None => "std_logic_vector",
                Some(true) => "signed",
                Some(false) => "unsigned",
            };
            match vector_of(dtype) {
                Some((msb, lsb)) => format!(
                    "{}({} DOWNTO {})",
                    name,
                    serialize_expr(&msb),
                    serialize_expr(&lsb)
                ),
                None => name.to_string(),
            }
        }
        HdlType::Bool => "BOOLEAN".to_string(),
        HdlType::Integer => "INTEGER".to_string(),
        HdlType::Str => "STRING".to_string(),
    }
}

pub fn type_width(dtype: &HdlType) -> Result<SerializedValue> {
    match dtype {
        HdlType::Bit | HdlType::Bool => Ok(SerializedValue::constant("1")),
        HdlType::Integer => Ok(SerializedValue::constant("32")),
        HdlType::Bits { width, .. } => Ok(serialize_value(width)),
        HdlType::Str => Err(PackagerError::unsupported_format(
            "STRING signal has no bit width",
        )),
    }
}
