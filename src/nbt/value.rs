use crate::nbt::TagCompound;
use serde::{Deserialize, Serialize};

/// A single node of the tagged-value tree used for durable records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Tag {
    Byte(i8),
    Int(i32),
    Long(i64),
    Double(f64),
    String(String),
    List(Vec<Tag>),
    Compound(TagCompound),
}

impl Tag {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Byte(_) => "BYTE",
            Self::Int(_) => "INT",
            Self::Long(_) => "LONG",
            Self::Double(_) => "DOUBLE",
            Self::String(_) => "STRING",
            Self::List(_) => "LIST",
            Self::Compound(_) => "COMPOUND",
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Long(v) => Some(*v),
            Self::Int(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&TagCompound> {
        match self {
            Self::Compound(c) => Some(c),
            _ => None,
        }
    }
}
