//! The STDF V4 record types and their `(rec_typ, rec_sub)` wire codes.

use crate::error::StdfError;
use std::fmt;

/// One of the STDF record kinds (spec GLOSSARY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Far,
    Atr,
    Mir,
    Mrr,
    Pcr,
    Hbr,
    Sbr,
    Pmr,
    Pgr,
    Plr,
    Rdr,
    Sdr,
    Wir,
    Wrr,
    Wcr,
    Pir,
    Prr,
    Tsr,
    Ptr,
    Mpr,
    Ftr,
    Bps,
    Eps,
    Gdr,
    Dtr,
}

impl RecordType {
    /// The 3-letter symbolic tag used both as the ATDF header and in the
    /// `-r/--records` CLI filter.
    pub const fn tag(self) -> &'static str {
        match self {
            RecordType::Far => "FAR",
            RecordType::Atr => "ATR",
            RecordType::Mir => "MIR",
            RecordType::Mrr => "MRR",
            RecordType::Pcr => "PCR",
            RecordType::Hbr => "HBR",
            RecordType::Sbr => "SBR",
            RecordType::Pmr => "PMR",
            RecordType::Pgr => "PGR",
            RecordType::Plr => "PLR",
            RecordType::Rdr => "RDR",
            RecordType::Sdr => "SDR",
            RecordType::Wir => "WIR",
            RecordType::Wrr => "WRR",
            RecordType::Wcr => "WCR",
            RecordType::Pir => "PIR",
            RecordType::Prr => "PRR",
            RecordType::Tsr => "TSR",
            RecordType::Ptr => "PTR",
            RecordType::Mpr => "MPR",
            RecordType::Ftr => "FTR",
            RecordType::Bps => "BPS",
            RecordType::Eps => "EPS",
            RecordType::Gdr => "GDR",
            RecordType::Dtr => "DTR",
        }
    }

    /// All 25 record types, in no particular order (used by the CLI to
    /// validate `-r/--records` arguments and by tests to enumerate templates).
    /// MRR is included even though the glossary's listing omits it, since
    /// §4.5/§6 require it for timestamp handling (see DESIGN.md).
    pub const ALL: [RecordType; 25] = [
        RecordType::Far,
        RecordType::Atr,
        RecordType::Mir,
        RecordType::Mrr,
        RecordType::Pcr,
        RecordType::Hbr,
        RecordType::Sbr,
        RecordType::Pmr,
        RecordType::Pgr,
        RecordType::Plr,
        RecordType::Rdr,
        RecordType::Sdr,
        RecordType::Wir,
        RecordType::Wrr,
        RecordType::Wcr,
        RecordType::Pir,
        RecordType::Prr,
        RecordType::Tsr,
        RecordType::Ptr,
        RecordType::Mpr,
        RecordType::Ftr,
        RecordType::Bps,
        RecordType::Eps,
        RecordType::Gdr,
        RecordType::Dtr,
    ];

    /// Resolve the wire `(rec_typ, rec_sub)` pair to a [`RecordType`], or
    /// `None` if it isn't one of the known kinds (spec §3 invariant 1).
    pub fn from_wire(rec_typ: u8, rec_sub: u8) -> Option<RecordType> {
        Some(match (rec_typ, rec_sub) {
            (0, 10) => RecordType::Far,
            (0, 20) => RecordType::Atr,
            (1, 10) => RecordType::Mir,
            (1, 20) => RecordType::Mrr,
            (1, 30) => RecordType::Pcr,
            (1, 40) => RecordType::Hbr,
            (1, 50) => RecordType::Sbr,
            (1, 60) => RecordType::Pmr,
            (1, 62) => RecordType::Pgr,
            (1, 63) => RecordType::Plr,
            (1, 70) => RecordType::Rdr,
            (1, 80) => RecordType::Sdr,
            (2, 10) => RecordType::Wir,
            (2, 20) => RecordType::Wrr,
            (2, 30) => RecordType::Wcr,
            (5, 10) => RecordType::Pir,
            (5, 20) => RecordType::Prr,
            (10, 30) => RecordType::Tsr,
            (15, 10) => RecordType::Ptr,
            (15, 15) => RecordType::Mpr,
            (15, 20) => RecordType::Ftr,
            (20, 10) => RecordType::Bps,
            (20, 20) => RecordType::Eps,
            (50, 10) => RecordType::Gdr,
            (50, 30) => RecordType::Dtr,
            _ => return None,
        })
    }

    /// The wire `(rec_typ, rec_sub)` pair for this record type.
    pub const fn wire_code(self) -> (u8, u8) {
        match self {
            RecordType::Far => (0, 10),
            RecordType::Atr => (0, 20),
            RecordType::Mir => (1, 10),
            RecordType::Mrr => (1, 20),
            RecordType::Pcr => (1, 30),
            RecordType::Hbr => (1, 40),
            RecordType::Sbr => (1, 50),
            RecordType::Pmr => (1, 60),
            RecordType::Pgr => (1, 62),
            RecordType::Plr => (1, 63),
            RecordType::Rdr => (1, 70),
            RecordType::Sdr => (1, 80),
            RecordType::Wir => (2, 10),
            RecordType::Wrr => (2, 20),
            RecordType::Wcr => (2, 30),
            RecordType::Pir => (5, 10),
            RecordType::Prr => (5, 20),
            RecordType::Tsr => (10, 30),
            RecordType::Ptr => (15, 10),
            RecordType::Mpr => (15, 15),
            RecordType::Ftr => (15, 20),
            RecordType::Bps => (20, 10),
            RecordType::Eps => (20, 20),
            RecordType::Gdr => (50, 10),
            RecordType::Dtr => (50, 30),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for RecordType {
    type Err = StdfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordType::ALL
            .iter()
            .copied()
            .find(|rt| rt.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| StdfError::UnknownRecord {
                rec_typ: 0,
                rec_sub: 0,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_roundtrip_all_types() {
        for rt in RecordType::ALL {
            let (typ, sub) = rt.wire_code();
            assert_eq!(RecordType::from_wire(typ, sub), Some(rt));
        }
    }

    #[test]
    fn test_unknown_wire_code() {
        assert_eq!(RecordType::from_wire(99, 99), None);
    }

    #[test]
    fn test_tag_roundtrip() {
        for rt in RecordType::ALL {
            assert_eq!(rt.tag().parse::<RecordType>().unwrap(), rt);
        }
    }
}
