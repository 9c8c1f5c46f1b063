use phonenumber::{Mode, PhoneNumber};

/// One validated number together with the metadata looked up for it.
#[derive(Debug, Clone)]
pub struct LookupResult {
    pub input: String,
    pub number: PhoneNumber,
    pub time_zones: Vec<String>,
    pub carrier: String,
    pub region: String,
}

impl LookupResult {
    pub fn e164(&self) -> String {
        self.number.format().mode(Mode::E164).to_string()
    }

    pub fn international(&self) -> String {
        self.number.format().mode(Mode::International).to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub lines: usize,
    pub saved: usize,
    pub rejected: usize,
}
