//! Shared small enums referenced across multiple compiler crates, kept here
//! to avoid circular dependencies between `vane-ir`, `vane-passes`, and
//! `vane-emit`.

/// Which backend a module's Core IR should be lowered for (spec.md §3.4,
/// §4.11).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Carriers are discharged through a small runtime (`callInfectious`,
    /// `recordGetInfectious`, `registerInfectiousType`); no monomorphization.
    #[default]
    Runtime,
    /// No runtime: carriers are resolved to concrete tagged unions ahead of
    /// time, generic ADTs are monomorphized, and pointer/array carriers are
    /// normalized (spec.md §4.6–§4.7).
    Raw,
}

impl Backend {
    #[must_use]
    pub const fn is_raw(self) -> bool {
        matches!(self, Self::Raw)
    }
}
