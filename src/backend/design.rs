use serde::{Deserialize, Serialize};

use crate::model::{Direction, IntfDirection};

/// Binary operators understood by the expression serializer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn symbol(&self) -> &str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }

    fn apply(&self, lhs: i64, rhs: i64) -> Option<i64> {
        match self {
            BinOp::Add => lhs.checked_add(rhs),
            BinOp::Sub => lhs.checked_sub(rhs),
            BinOp::Mul => lhs.checked_mul(rhs),
            BinOp::Div => lhs.checked_div(rhs),
        }
    }
}

/// Value expression as supplied by the frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Int(i64),
    Bool(bool),
    Str(String),
    /// Reference to a generic together with its current value
    Param { name: String, value: Box<Expr> },
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn param(name: &str, value: Expr) -> Self {
        Expr::Param {
            name: name.to_string(),
            value: Box::new(value),
        }
    }

    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// True when the expression references no generic
    pub fn is_constant(&self) -> bool {
        match self {
            Expr::Int(_) | Expr::Bool(_) | Expr::Str(_) => true,
            Expr::Param { .. } => false,
            Expr::Binary { lhs, rhs, .. } => lhs.is_constant() && rhs.is_constant(),
        }
    }

    /// Replace generic references by their values and fold integer arithmetic.
    /// Operations that cannot be folded (overflow, division by zero, non-integer
    /// operands) are kept with evaluated operands.
    pub fn static_eval(&self) -> Expr {
        match self {
            Expr::Param { value, .. } => value.static_eval(),
            Expr::Binary { op, lhs, rhs } => {
                let lhs = lhs.static_eval();
                let rhs = rhs.static_eval();
                if let (Expr::Int(l), Expr::Int(r)) = (&lhs, &rhs) {
                    if let Some(v) = op.apply(*l, *r) {
                        return Expr::Int(v);
                    }
                }
                Expr::binary(*op, lhs, rhs)
            }
            other => other.clone(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.static_eval() {
            Expr::Int(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for Expr {
    fn from(v: i64) -> Self {
        Expr::Int(v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HdlType {
    /// Single bit signal
    Bit,
    /// Bit vector, optionally signed/unsigned
    Bits {
        width: Expr,
        #[serde(default)]
        signed: Option<bool>,
    },
    Bool,
    Integer,
    Str,
}

impl HdlType {
    pub fn bits(width: i64) -> Self {
        Self::bits_expr(Expr::Int(width))
    }

    pub fn bits_expr(width: Expr) -> Self {
        HdlType::Bits {
            width,
            signed: None,
        }
    }
}

/// Generic parameter of the design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HdlParam {
    pub name: String,
    pub dtype: HdlType,
    pub value: Expr,
}

impl HdlParam {
    pub fn new(name: &str, dtype: HdlType, value: Expr) -> Self {
        Self {
            name: name.to_string(),
            dtype,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HdlShape {
    Signal(HdlType),
    Composite(Vec<HdlInterface>),
}

/// Interface of the design, either one physical signal or a composite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HdlInterface {
    /// Logical name, relative to the parent interface
    pub name: String,
    /// Name of the physical wire (for composites, the name prefix)
    pub physical_name: String,
    pub direction: Direction,
    pub shape: HdlShape,
    /// Tag used to look up a bus-abstraction resolver
    #[serde(default)]
    pub class_tag: Option<String>,
    #[serde(default)]
    pub associated_clk: Option<String>,
    #[serde(default)]
    pub associated_rst: Option<String>,
}

impl HdlInterface {
    pub fn signal(name: &str, physical_name: &str, direction: Direction, dtype: HdlType) -> Self {
        Self {
            name: name.to_string(),
            physical_name: physical_name.to_string(),
            direction,
            shape: HdlShape::Signal(dtype),
            class_tag: None,
            associated_clk: None,
            associated_rst: None,
        }
    }

    pub fn composite(name: &str, direction: Direction, children: Vec<HdlInterface>) -> Self {
        Self {
            name: name.to_string(),
            physical_name: name.to_string(),
            direction,
            shape: HdlShape::Composite(children),
            class_tag: None,
            associated_clk: None,
            associated_rst: None,
        }
    }

    pub fn with_class_tag(mut self, tag: &str) -> Self {
        self.class_tag = Some(tag.to_string());
        self
    }

    pub fn with_associated_clk(mut self, clk: &str) -> Self {
        self.associated_clk = Some(clk.to_string());
        self
    }

    pub fn with_associated_rst(mut self, rst: &str) -> Self {
        self.associated_rst = Some(rst.to_string());
        self
    }

    pub fn intf_direction(&self) -> IntfDirection {
        self.direction.as_intf_direction()
    }

    pub fn children(&self) -> &[HdlInterface] {
        match &self.shape {
            HdlShape::Signal(_) => &[],
            HdlShape::Composite(children) => children,
        }
    }

    pub fn child(&self, name: &str) -> Option<&HdlInterface> {
        self.children().iter().find(|c| c.name == name)
    }

    pub fn signal_type(&self) -> Option<&HdlType> {
        match &self.shape {
            HdlShape::Signal(t) => Some(t),
            HdlShape::Composite(_) => None,
        }
    }

    /// Physical signals in declaration order, depth first
    pub fn leaves(&self) -> Vec<&HdlInterface> {
        match &self.shape {
            HdlShape::Signal(_) => vec![self],
            HdlShape::Composite(children) => children.iter().flat_map(|c| c.leaves()).collect(),
        }
    }

    /// Same interface seen from the other side: every direction flipped
    pub fn mirrored(&self) -> Self {
        let shape = match &self.shape {
            HdlShape::Signal(t) => HdlShape::Signal(t.clone()),
            HdlShape::Composite(children) => {
                HdlShape::Composite(children.iter().map(|c| c.mirrored()).collect())
            }
        };
        Self {
            direction: self.direction.opposite(),
            shape,
            ..self.clone()
        }
    }
}

/// Complete input of one packaging run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSnapshot {
    pub name: String,
    #[serde(default)]
    pub params: Vec<HdlParam>,
    #[serde(default)]
    pub interfaces: Vec<HdlInterface>,
}

impl DesignSnapshot {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            params: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    pub fn add_param(&mut self, param: HdlParam) {
        self.params.push(param);
    }

    pub fn add_interface(&mut self, intf: HdlInterface) {
        self.interfaces.push(intf);
    }
}
