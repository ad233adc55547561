/// A candidate table row straight out of the HTML, before key resolution.
/// `hex` is already normalized to `#` plus six uppercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub name: String,
    pub hex: String,
}

/// A fully resolved color entry, ready for emission.
///
/// `key` is unique across the run and matches `[a-z0-9]+`; `rgb` is the
/// byte decomposition of `hex`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRecord {
    pub key: String,
    pub name: String,
    pub hex: String,
    pub rgb: (u8, u8, u8),
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<ColorRecord>,
    /// Rendered Rust source of the static table, written verbatim by `load`.
    pub table_source: String,
}
