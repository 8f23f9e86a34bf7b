// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Value Bridge
// ====================================================================================
//
// The `bridge` is the boundary between the host language's dynamic, row-oriented,
// null-aware values and the engine's typed columnar tables. Nothing else in the
// crate knows about `Value`.
//
// Data Flow (Construction):
//
//   1. [Host runtime / CSV reader]   -> NamedValues: Vec<(name, Vec<Value>)>
//         |
//         `-> from_columns: infer each column's type from its first present value,
//             turn missing markers into the null bitmap
//
//   2. [Table]                       -> consumed by kernels / grouping / export
//
//
// Data Flow (Consumption):
//
//   1. [Table]                       -> produced by a kernel or aggregate
//         |
//         `-> to_columns / row_as_record: nulls become *typed* missing markers
//
//   2. [Host runtime]                -> re-ingesting the values rebuilds the same types
//
// ====================================================================================
pub mod stateless_api;
pub mod value;

pub use stateless_api::{
    column_values, from_columns, from_columns_with_config, row_as_record, to_columns, value_at,
    NamedValues, Record,
};
pub use value::{MissingKind, Value};
