// src/domain/lookup/mod.rs

pub mod source;
pub mod value_objects;

pub use source::LookupSource;
pub use value_objects::{
    AggregateFailure, FailureKind, LookupError, ProductSource, ResolvedProduct, SourceFailure,
};
