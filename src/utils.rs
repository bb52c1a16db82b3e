use chrono::{DateTime, Utc};

/// Source of the revision timestamp embedded in generated packages
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant, for reproducible output
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Quote a string for TCL
pub fn tcl_quote(s: &str) -> String {
    format!("\"{}\"", s)
}

pub fn tcl_bool(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}
