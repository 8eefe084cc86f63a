/// Data layer: core types, decoding, normalization, merging, and export.
///
/// Architecture:
/// ```text
///  .csv / .xlsx / .xls
///        │
///        ▼
///   ┌──────────┐
///   │  decode   │  parse file → Vec<RawRecord>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  drop blank rows, fix column order → Dataset
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  merge    │  attach per-row predictions → Vec<AugmentedRow>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  flat records, prediction column last → CSV
///   └──────────┘
/// ```
pub mod decode;
pub mod export;
pub mod merge;
pub mod model;
pub mod normalize;
