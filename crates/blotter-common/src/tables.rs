//! Names the input relations are registered under in the engine session.

pub const AREAS: &str = "Areas";
pub const CRIMES: &str = "Crimes";
pub const PREMISES: &str = "Premises";
pub const WEAPONS: &str = "Weapons";
pub const VICTIM_DESCENT: &str = "VictimDescent";
pub const CASE_STATUS: &str = "CaseStatus";
pub const CRIMINAL_CASES: &str = "CriminalCases";
