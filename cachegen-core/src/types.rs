//! Type families understood by the compiler.
//!
//! The set of families is closed. Everything the rest of the pipeline needs
//! to know about a family (its parameter list, which categories its type
//! references must satisfy, the header that defines it and how an instance
//! is addressed when wired) is answered by an exhaustive `match` here, so a
//! new family cannot be added without filling in every table.
//!
//! The tables mirror the class hierarchy of the simulation template library
//! and must be kept in step with it.

use std::fmt;

/// One of the template families a `type` statement may instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Data64B,
    MetadataMSI,
    CacheArrayNorm,
    CacheSkewed,
    CacheNorm,
    OuterPortMSIUncached,
    OuterPortMSI,
    InnerPortMSIUncached,
    InnerPortMSIBroadcast,
    CoreInterfaceMSI,
    CoherentCacheNorm,
    CoherentL1CacheNorm,
    SimpleMemoryModel,
    IndexNorm,
    IndexSkewed,
    IndexRandom,
    ReplaceFIFO,
    ReplaceLRU,
    DelayL1,
    DelayCoherentCache,
    DelayMemory,
}

/// A set of families that are interchangeable in one type-reference slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    MetadataContainer,
    DataContainer,
    MetadataMSI,
    Cache,
    OuterPort,
    InnerPort,
    CoreInterface,
    IndexFunction,
    ReplaceFunction,
    Delay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Int,
    Bool,
    Type { category: Category, optional: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
}

const fn int(name: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        kind: ParamKind::Int,
    }
}

const fn boolean(name: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        kind: ParamKind::Bool,
    }
}

const fn required(name: &'static str, category: Category) -> ParamSpec {
    ParamSpec {
        name,
        kind: ParamKind::Type {
            category,
            optional: false,
        },
    }
}

const fn optional(name: &'static str, category: Category) -> ParamSpec {
    ParamSpec {
        name,
        kind: ParamKind::Type {
            category,
            optional: true,
        },
    }
}

use Category as C;

const CACHE_ARRAY_NORM: &[ParamSpec] = &[
    int("IW"),
    int("NW"),
    required("MT", C::MetadataContainer),
    optional("DT", C::DataContainer),
];

const CACHE_SKEWED: &[ParamSpec] = &[
    int("IW"),
    int("NW"),
    int("P"),
    required("MT", C::MetadataContainer),
    optional("DT", C::DataContainer),
    required("IDX", C::IndexFunction),
    required("RPC", C::ReplaceFunction),
    optional("DLY", C::Delay),
    boolean("EnMon"),
];

const CACHE_NORM: &[ParamSpec] = &[
    int("IW"),
    int("NW"),
    required("MT", C::MetadataContainer),
    optional("DT", C::DataContainer),
    required("IDX", C::IndexFunction),
    required("RPC", C::ReplaceFunction),
    optional("DLY", C::Delay),
    boolean("EnMon"),
];

const OUTER_PORT: &[ParamSpec] = &[
    required("MT", C::MetadataMSI),
    optional("DT", C::DataContainer),
];

const INNER_PORT: &[ParamSpec] = &[
    required("MT", C::MetadataMSI),
    optional("DT", C::DataContainer),
    boolean("isLLC"),
];

const CORE_INTERFACE: &[ParamSpec] = &[
    required("MT", C::MetadataMSI),
    optional("DT", C::DataContainer),
    boolean("enableDelay"),
    boolean("isLLC"),
];

const COHERENT_CACHE: &[ParamSpec] = &[
    required("CacheT", C::Cache),
    required("OuterT", C::OuterPort),
    required("InnerT", C::InnerPort),
];

const COHERENT_L1_CACHE: &[ParamSpec] = &[
    required("CacheT", C::Cache),
    required("OuterT", C::OuterPort),
    required("CoreT", C::CoreInterface),
];

const MEMORY: &[ParamSpec] = &[optional("DT", C::DataContainer), optional("DLY", C::Delay)];

const INDEX: &[ParamSpec] = &[int("IW"), int("IOfst")];
const INDEX_SKEWED: &[ParamSpec] = &[int("IW"), int("IOfst"), int("P")];
const REPLACE: &[ParamSpec] = &[int("IW"), int("NW")];
const METADATA_MSI: &[ParamSpec] = &[int("AW"), int("IW"), int("TOfst")];
const DELAY_L1: &[ParamSpec] = &[int("dhit"), int("dreplay"), int("dtran")];
const DELAY_COHERENT: &[ParamSpec] = &[int("dhit"), int("dtranUp"), int("dtranDown")];
const DELAY_MEMORY: &[ParamSpec] = &[int("dtran")];

impl Family {
    pub const ALL: [Family; 21] = [
        Family::Data64B,
        Family::MetadataMSI,
        Family::CacheArrayNorm,
        Family::CacheSkewed,
        Family::CacheNorm,
        Family::OuterPortMSIUncached,
        Family::OuterPortMSI,
        Family::InnerPortMSIUncached,
        Family::InnerPortMSIBroadcast,
        Family::CoreInterfaceMSI,
        Family::CoherentCacheNorm,
        Family::CoherentL1CacheNorm,
        Family::SimpleMemoryModel,
        Family::IndexNorm,
        Family::IndexSkewed,
        Family::IndexRandom,
        Family::ReplaceFIFO,
        Family::ReplaceLRU,
        Family::DelayL1,
        Family::DelayCoherentCache,
        Family::DelayMemory,
    ];

    /// The template name, which is also the spelling used in `type` statements.
    pub fn name(self) -> &'static str {
        match self {
            Family::Data64B => "Data64B",
            Family::MetadataMSI => "MetadataMSI",
            Family::CacheArrayNorm => "CacheArrayNorm",
            Family::CacheSkewed => "CacheSkewed",
            Family::CacheNorm => "CacheNorm",
            Family::OuterPortMSIUncached => "OuterPortMSIUncached",
            Family::OuterPortMSI => "OuterPortMSI",
            Family::InnerPortMSIUncached => "InnerPortMSIUncached",
            Family::InnerPortMSIBroadcast => "InnerPortMSIBroadcast",
            Family::CoreInterfaceMSI => "CoreInterfaceMSI",
            Family::CoherentCacheNorm => "CoherentCacheNorm",
            Family::CoherentL1CacheNorm => "CoherentL1CacheNorm",
            Family::SimpleMemoryModel => "SimpleMemoryModel",
            Family::IndexNorm => "IndexNorm",
            Family::IndexSkewed => "IndexSkewed",
            Family::IndexRandom => "IndexRandom",
            Family::ReplaceFIFO => "ReplaceFIFO",
            Family::ReplaceLRU => "ReplaceLRU",
            Family::DelayL1 => "DelayL1",
            Family::DelayCoherentCache => "DelayCoherentCache",
            Family::DelayMemory => "DelayMemory",
        }
    }

    pub fn from_name(name: &str) -> Option<Family> {
        Family::ALL.into_iter().find(|family| family.name() == name)
    }

    pub fn params(self) -> &'static [ParamSpec] {
        match self {
            Family::Data64B => &[],
            Family::MetadataMSI => METADATA_MSI,
            Family::CacheArrayNorm => CACHE_ARRAY_NORM,
            Family::CacheSkewed => CACHE_SKEWED,
            Family::CacheNorm => CACHE_NORM,
            Family::OuterPortMSIUncached | Family::OuterPortMSI => OUTER_PORT,
            Family::InnerPortMSIUncached | Family::InnerPortMSIBroadcast => INNER_PORT,
            Family::CoreInterfaceMSI => CORE_INTERFACE,
            Family::CoherentCacheNorm => COHERENT_CACHE,
            Family::CoherentL1CacheNorm => COHERENT_L1_CACHE,
            Family::SimpleMemoryModel => MEMORY,
            Family::IndexNorm | Family::IndexRandom => INDEX,
            Family::IndexSkewed => INDEX_SKEWED,
            Family::ReplaceFIFO | Family::ReplaceLRU => REPLACE,
            Family::DelayL1 => DELAY_L1,
            Family::DelayCoherentCache => DELAY_COHERENT,
            Family::DelayMemory => DELAY_MEMORY,
        }
    }

    /// Header of the template library that defines this family.
    pub fn header(self) -> &'static str {
        match self {
            Family::Data64B
            | Family::CacheArrayNorm
            | Family::CacheSkewed
            | Family::CacheNorm => "cache/cache.hpp",
            Family::MetadataMSI
            | Family::OuterPortMSIUncached
            | Family::OuterPortMSI
            | Family::InnerPortMSIUncached
            | Family::InnerPortMSIBroadcast
            | Family::CoreInterfaceMSI => "cache/msi.hpp",
            Family::CoherentCacheNorm | Family::CoherentL1CacheNorm => "cache/coherence.hpp",
            Family::SimpleMemoryModel => "cache/memory.hpp",
            Family::IndexNorm | Family::IndexSkewed | Family::IndexRandom => "cache/index.hpp",
            Family::ReplaceFIFO | Family::ReplaceLRU => "cache/replace.hpp",
            Family::DelayL1 | Family::DelayCoherentCache | Family::DelayMemory => {
                "cache/delay.hpp"
            }
        }
    }

    /// Accessor suffix for the side facing a manager. Families without a
    /// separate port object are addressed directly.
    pub fn outer_facet(self) -> &'static str {
        match self {
            Family::CoherentCacheNorm | Family::CoherentL1CacheNorm => "->outer",
            _ => "",
        }
    }

    /// Accessor suffix for the side facing clients.
    pub fn inner_facet(self) -> &'static str {
        match self {
            Family::CoherentCacheNorm | Family::CoherentL1CacheNorm => "->inner",
            _ => "",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Category {
    /// Base class name in the template library.
    pub fn name(self) -> &'static str {
        match self {
            Category::MetadataContainer => "CMMetadataBase",
            Category::DataContainer => "CMDataBase",
            Category::MetadataMSI => "MetadataMSIBase",
            Category::Cache => "CacheBase",
            Category::OuterPort => "OuterCohPortBase",
            Category::InnerPort => "InnerCohPortBase",
            Category::CoreInterface => "CoreInterfaceBase",
            Category::IndexFunction => "IndexFuncBase",
            Category::ReplaceFunction => "ReplaceFuncBase",
            Category::Delay => "DelayBase",
        }
    }

    pub fn admits(self, family: Family) -> bool {
        use Family as F;
        match self {
            Category::MetadataContainer | Category::MetadataMSI => family == F::MetadataMSI,
            Category::DataContainer => family == F::Data64B,
            Category::Cache => matches!(family, F::CacheSkewed | F::CacheNorm),
            Category::OuterPort => matches!(family, F::OuterPortMSIUncached | F::OuterPortMSI),
            Category::InnerPort => {
                matches!(family, F::InnerPortMSIUncached | F::InnerPortMSIBroadcast)
            }
            Category::CoreInterface => family == F::CoreInterfaceMSI,
            Category::IndexFunction => {
                matches!(family, F::IndexNorm | F::IndexSkewed | F::IndexRandom)
            }
            Category::ReplaceFunction => matches!(family, F::ReplaceFIFO | F::ReplaceLRU),
            Category::Delay => {
                matches!(family, F::DelayL1 | F::DelayCoherentCache | F::DelayMemory)
            }
        }
    }
}

/// A resolved parameter bound into a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Int(i64),
    Bool(bool),
    /// `None` is an absent optional facility.
    TypeRef(Option<String>),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(value) => write!(f, "{value}"),
            ParamValue::Bool(value) => write!(f, "{value}"),
            ParamValue::TypeRef(Some(name)) => f.write_str(name),
            ParamValue::TypeRef(None) => f.write_str("void"),
        }
    }
}

/// A validated `type` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: String,
    pub family: Family,
    pub params: Vec<ParamValue>,
    /// Predefined types can be referenced but are never emitted.
    pub builtin: bool,
}

impl TypeDescriptor {
    pub fn builtin(name: &str, family: Family) -> Self {
        TypeDescriptor {
            name: name.to_string(),
            family,
            params: Vec::new(),
            builtin: true,
        }
    }

    pub fn header(&self) -> &'static str {
        self.family.header()
    }

    /// The alias line for this descriptor, or `None` when it emits nothing.
    pub fn alias_line(&self) -> Option<String> {
        if self.builtin || self.name.is_empty() {
            return None;
        }
        if self.params.is_empty() {
            return Some(format!("typedef {} {};", self.family, self.name));
        }
        let params = self
            .params
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Some(format!("typedef {}<{}> {};", self.family, params, self.name))
    }
}
