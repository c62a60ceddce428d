//! # Catalog Module
//!
//! The fixed allow-lists accepted by the predictor.
//!
//! Every form field except the rank is a closed set of codes. Each set is a
//! plain enum so that anything reaching the query planner has already been
//! checked, and so that table and column identifiers can only ever come from
//! this file.

use crate::error::UnknownCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// ALLOW-LIST MACRO
// =============================================================================

/// Declares a closed allow-list enum with its wire code and display label.
macro_rules! allow_list {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => ($code:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted value, in form order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The code submitted by the form and stored in the tables.
            #[must_use]
            pub const fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// Human-readable option text.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Exact, case-sensitive lookup by code.
            #[must_use]
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl FromStr for $name {
            type Err = UnknownCode;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_code(s).ok_or_else(|| UnknownCode::new(stringify!($name), s))
            }
        }
    };
}

// =============================================================================
// ALLOW-LISTS
// =============================================================================

allow_list! {
    /// Admission phase. Each phase is a separate table snapshot.
    pub enum Phase {
        FirstPhase2022 => ("first_phase_2022", "First Phase (2022)"),
        FinalPhase2022 => ("final_phase_2022", "Final Phase (2022)"),
        FinalPhase2023 => ("final_phase_2023", "Final Phase (2023)"),
    }
}

allow_list! {
    /// Reservation category. The code doubles as the cutoff column name.
    pub enum Category {
        OcBoys => ("OC_BOYS", "OC Male"),
        OcGirls => ("OC_GIRLS", "OC Female"),
        BcAGirls => ("BC_A_GIRLS", "BC A Female"),
        BcABoys => ("BC_A_BOYS", "BC A Male"),
        BcBBoys => ("BC_B_BOYS", "BC B Male"),
        BcBGirls => ("BC_B_GIRLS", "BC B Female"),
        BcCBoys => ("BC_C_BOYS", "BC C Male"),
        BcCGirls => ("BC_C_GIRLS", "BC C Female"),
        BcDGirls => ("BC_D_GIRLS", "BC D Female"),
        BcDBoys => ("BC_D_BOYS", "BC D Male"),
        BcEBoys => ("BC_E_BOYS", "BC E Male"),
        BcEGirls => ("BC_E_GIRLS", "BC E Female"),
        ScBoys => ("SC_BOYS", "SC Male"),
        ScGirls => ("SC_GIRLS", "SC Female"),
        StBoys => ("ST_BOYS", "ST Male"),
        StGirls => ("ST_GIRLS", "ST Female"),
        EwsGenOu => ("EWS_GEN_OU", "EWS Male"),
        EwsGirlsOu => ("EWS_GIRLS_OU", "EWS Female"),
    }
}

allow_list! {
    /// Course branch code.
    pub enum Branch {
        Ane => ("ANE", "AERONAUTICAL ENGINEERING"),
        Agr => ("AGR", "AGRICULTURAL ENGINEERING"),
        Ai => ("AI", "ARTIFICIAL INTELLIGENCE"),
        Aid => ("AID", "ARTIFICIAL INTELLIGENCE AND DATA SCIENCE"),
        Aim => ("AIM", "ARTIFICIAL INTELLIGENCE AND MACHINE LEARNING"),
        Aut => ("AUT", "AUTOMOBILE ENGINEERING"),
        Phm => ("PHM", "B. PHARMACY (M.P.C. STREAM)"),
        Bme => ("BME", "BIO-MEDICAL ENGINEERING"),
        Bio => ("BIO", "BIO-TECHNOLOGY"),
        Mms => ("MMS", "BTECH MECHANICAL WITH MTECH MANUFACTURING SYSTEMS"),
        Mte => ("MTE", "BTECH MECHANICAL WITH MTECH THERMAL ENGG"),
        Che => ("CHE", "CHEMICAL ENGINEERING"),
        Civ => ("CIV", "CIVIL ENGINEERING"),
        Cme => ("CME", "COMPUTER ENGINEERING"),
        Csw => ("CSW", "COMPUTER ENGINEERING(SOFTWARE ENGINEERING)"),
        Csg => ("CSG", "COMPUTER SCIENCE & DESIGN"),
        Csn => ("CSN", "COMPUTER SCIENCE & ENGINEERING (NETWORKS)"),
        Csb => ("CSB", "COMPUTER SCIENCE AND BUSINESS SYSTEM"),
        Cse => ("CSE", "COMPUTER SCIENCE AND ENGINEERING"),
        Csm => ("CSM", "COMPUTER SCIENCE AND ENGINEERING (ARTIFICIAL INTELLIGENCE AND MACHINE LEARNING)"),
        Csc => ("CSC", "COMPUTER SCIENCE AND ENGINEERING (CYBER SECURITY)"),
        Csd => ("CSD", "COMPUTER SCIENCE AND ENGINEERING (DATA SCIENCE)"),
        Cso => ("CSO", "COMPUTER SCIENCE AND ENGINEERING (IOT)"),
        Csi => ("CSI", "COMPUTER SCIENCE AND INFORMATION TECHNOLOGY"),
        Cst => ("CST", "COMPUTER SCIENCE AND TECHNOLOGY"),
        Cic => ("CIC", "CSE (IoT AND CYBER SECURITY INCLUDING BLOCK CHAIN TECHNOLOGY)"),
        Drg => ("DRG", "DAIRYING"),
        Dtd => ("DTD", "DIGITAL TECHNIQUES FOR DESIGN AND PLANNING"),
        Eee => ("EEE", "ELECTRICAL AND ELECTRONICS ENGINEERING"),
        Ece => ("ECE", "ELECTRONICS AND COMMUNICATION ENGINEERING"),
        Ecm => ("ECM", "ELECTRONICS AND COMPUTER ENGINEERING"),
        Eie => ("EIE", "ELECTRONICS AND INSTRUMENTATION ENGINEERING"),
        Etm => ("ETM", "ELECTRONICS AND TELEMATICS"),
        Eci => ("ECI", "ELECTRONICS COMMUNICATION AND INSTRUMENTATION ENGINEERING"),
        Fdt => ("FDT", "FOOD TECHNOLOGY"),
        Inf => ("INF", "INFORMATION TECHNOLOGY"),
        Mct => ("MCT", "MECHANICAL (MECHTRONICS) ENGINEERING"),
        Mec => ("MEC", "MECHANICAL ENGINEERING"),
        Met => ("MET", "METALLURGICAL ENGINEERING"),
        Mmt => ("MMT", "METALLURGY AND MATERIAL ENGINEERING"),
        Min => ("MIN", "MINING ENGINEERING"),
        Phd => ("PHD", "PHARM - D (M.P.C. STREAM)"),
        Phe => ("PHE", "PHARMACEUTICAL ENGINEERING"),
        Plg => ("PLG", "PLANNING"),
        Tex => ("TEX", "TEXTILE TECHNOLOGY"),
    }
}

allow_list! {
    /// Institute type.
    pub enum CollegeType {
        University => ("UNIV", "University"),
        Private => ("PVT", "Private"),
        SelfFinanced => ("SF", "Self-financed"),
        Government => ("GOV", "Government"),
    }
}

allow_list! {
    /// Co-education status of an institute.
    pub enum Coed {
        Girls => ("GIRLS", "Girls"),
        Coed => ("COED", "Co-Education"),
    }
}

allow_list! {
    /// Affiliating university.
    pub enum Affiliation {
        Pjtsau => ("PJTSAU", "PJTSAU"),
        AnuragUniversity => ("ANURAG UNIVERSITY", "ANURAG UNIVERSITY"),
        Ku => ("KU", "KU"),
        Plmu => ("PLMU", "PLMU"),
        Svhu => ("SVHU", "SVHU"),
        SrUniversity => ("SR UNIVERSITY", "SR UNIVERSITY"),
        Jntuh => ("JNTUH", "JNTUH"),
        Mgun => ("MGUN", "MGUN"),
        Pvnrtvu => ("PVNRTVU", "PVNRTVU"),
        ConstituentCollege => ("CONSTITUENT COLLEGE", "CONSTITUENT COLLEGE"),
        Ou => ("OU", "OU"),
    }
}

impl Phase {
    /// Fully qualified, quoted table holding this phase's cutoffs.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::FirstPhase2022 => r#"public."TS_EAMCET_2022_FIRST_PHASE""#,
            Self::FinalPhase2022 => r#"public."TS_EAMCET_2022_FINAL_PHASE""#,
            Self::FinalPhase2023 => r#"public."TS_EAMCET_2023_FINAL_PHASE""#,
        }
    }
}

impl Category {
    /// Male-quota columns store 0 where no seat was allotted.
    #[must_use]
    pub fn is_boys(self) -> bool {
        self.code().contains("BOYS")
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// One selectable option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub code: &'static str,
    pub label: &'static str,
}

/// All allow-lists with their labels, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub phases: Vec<CatalogEntry>,
    pub categories: Vec<CatalogEntry>,
    pub branches: Vec<CatalogEntry>,
    pub types: Vec<CatalogEntry>,
    pub coed: Vec<CatalogEntry>,
    pub affiliations: Vec<CatalogEntry>,
}

macro_rules! entries {
    ($ty:ty) => {
        <$ty>::ALL
            .iter()
            .map(|v| CatalogEntry {
                code: v.code(),
                label: v.label(),
            })
            .collect()
    };
}

/// Build the full catalog.
#[must_use]
pub fn catalog() -> Catalog {
    Catalog {
        phases: entries!(Phase),
        categories: entries!(Category),
        branches: entries!(Branch),
        types: entries!(CollegeType),
        coed: entries!(Coed),
        affiliations: entries!(Affiliation),
    }
}

// =============================================================================
// TESTS
// =============================================================================
