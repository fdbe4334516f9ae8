use serde::{Deserialize, Serialize};

/// One of the 8 Australian state/territory codes a review can be filed under.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jurisdiction {
    NSW,
    VIC,
    QLD,
    SA,
    WA,
    TAS,
    NT,
    ACT,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 8] = [
        Jurisdiction::NSW,
        Jurisdiction::VIC,
        Jurisdiction::QLD,
        Jurisdiction::SA,
        Jurisdiction::WA,
        Jurisdiction::TAS,
        Jurisdiction::NT,
        Jurisdiction::ACT,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Jurisdiction::NSW => "NSW",
            Jurisdiction::VIC => "VIC",
            Jurisdiction::QLD => "QLD",
            Jurisdiction::SA => "SA",
            Jurisdiction::WA => "WA",
            Jurisdiction::TAS => "TAS",
            Jurisdiction::NT => "NT",
            Jurisdiction::ACT => "ACT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Jurisdiction::NSW => "New South Wales (NSW)",
            Jurisdiction::VIC => "Victoria (VIC)",
            Jurisdiction::QLD => "Queensland (QLD)",
            Jurisdiction::SA => "South Australia (SA)",
            Jurisdiction::WA => "Western Australia (WA)",
            Jurisdiction::TAS => "Tasmania (TAS)",
            Jurisdiction::NT => "Northern Territory (NT)",
            Jurisdiction::ACT => "Australian Capital Territory (ACT)",
        }
    }

    /// Badge tint used on review cards, one fixed colour per jurisdiction.
    pub fn color(&self) -> &'static str {
        match self {
            Jurisdiction::NSW => "#A0C4FF",
            Jurisdiction::VIC => "#BDB2FF",
            Jurisdiction::QLD => "#FFD6A5",
            Jurisdiction::SA => "#FFADAD",
            Jurisdiction::WA => "#CAFFBF",
            Jurisdiction::TAS => "#9BF6FF",
            Jurisdiction::NT => "#FDFFB6",
            Jurisdiction::ACT => "#f3d8c7",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|j| j.code() == code)
    }
}

/// An immutable account of working at one workplace. Serialized with
/// camelCase keys to match the document shape in the `reviews` collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub state: Jurisdiction,
    pub location: String,
    pub workplace_name: String,
    pub job_title: String,
    pub last_year_worked: i32,
    pub comment: String,
}
