use clap::ValueEnum;
use manuscript_overlay::OffsetUnit;

#[derive(Copy, Clone, Default, ValueEnum)]
pub(crate) enum UnitFlag {
    /// Unicode scalar values (Python string indices)
    #[default]
    Char,
    /// UTF-16 code units (JavaScript string indices)
    Utf16,
}

impl UnitFlag {
    pub(crate) const fn as_domain(self) -> OffsetUnit {
        match self {
            UnitFlag::Char => OffsetUnit::Char,
            UnitFlag::Utf16 => OffsetUnit::Utf16,
        }
    }
}
