//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Checks are further gated by `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit every extracted pivot (index, kind, price).
    pub print_pivots: bool,
    /// Emit cluster centroids and member counts after the sweep.
    pub print_clusters: bool,
    /// If non-empty, emit per-level scoring breakdowns only for this contract.
    /// Example: "MAR26". Use "" to disable.
    pub print_scoring_for_contract: &'static str,
    /// Emit which series provider satisfied each contract.
    pub print_series_source: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_pivots: false,
    print_clusters: false,
    print_scoring_for_contract: "",
    print_series_source: true,
};
