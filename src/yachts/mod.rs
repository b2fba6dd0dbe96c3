pub mod csv_loader;

use log::debug;

/// One row of the yacht table. Every field is kept as free text, numeric
/// columns are parsed on demand by the generators that need them.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct YachtRecord {
    pub name: String,
    pub builder: String,
    pub value: String,
    pub owner: String,
    pub flag: String,
    pub year_delivered: String,
    pub refit: String,
    pub length: String,
    pub beam: String,
    pub gross_tonnage: String,
    pub cruising_speed: String,
    pub top_speed: String,
    pub naval_architect: String,
    pub exterior_designer: String,
    pub interior_designer: String,
    pub rank: String,
    pub profile_picture: String,
}

impl YachtRecord {
    /// Minimum viable record: every generator needs at least these.
    pub fn is_viable(&self) -> bool {
        has_text(&self.name) && has_text(&self.builder) && has_text(&self.length)
    }

    /// Length in metres, only when it is a positive number.
    pub fn length_metres(&self) -> Option<f64> {
        leading_number(&self.length).filter(|l| *l > 0.0)
    }

    /// Top speed in knots, only when it is a positive number.
    pub fn top_speed_knots(&self) -> Option<f64> {
        leading_number(&self.top_speed).filter(|s| *s > 0.0)
    }

    pub fn delivery_year(&self) -> Option<i32> {
        parse_year(&self.year_delivered)
    }

    fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            builder: self.builder.trim().to_string(),
            value: self.value.trim().to_string(),
            owner: self.owner.trim().to_string(),
            flag: self.flag.trim().to_string(),
            year_delivered: self.year_delivered.trim().to_string(),
            refit: self.refit.trim().to_string(),
            length: self.length.trim().to_string(),
            beam: self.beam.trim().to_string(),
            gross_tonnage: self.gross_tonnage.trim().to_string(),
            cruising_speed: self.cruising_speed.trim().to_string(),
            top_speed: self.top_speed.trim().to_string(),
            naval_architect: self.naval_architect.trim().to_string(),
            exterior_designer: self.exterior_designer.trim().to_string(),
            interior_designer: self.interior_designer.trim().to_string(),
            rank: self.rank.trim().to_string(),
            profile_picture: self.profile_picture.trim().to_string(),
        }
    }
}

/// Keeps the records every generator can work with, trimming their fields.
/// Rejected records are dropped without an error.
pub fn normalize<I>(records: I) -> Vec<YachtRecord>
where
    I: IntoIterator<Item = YachtRecord>,
{
    let mut rejected = 0;
    let viable = records
        .into_iter()
        .map(YachtRecord::trimmed)
        .filter(|record| {
            let keep = record.is_viable();
            if !keep {
                rejected += 1;
            }
            keep
        })
        .collect::<Vec<_>>();
    debug!("Normalized {} yachts, rejected {}", viable.len(), rejected);
    viable
}

pub fn has_text(field: &str) -> bool {
    !field.trim().is_empty()
}

/// Parses the longest leading decimal prefix of a field,
/// e.g. "180.61m" is 180.61 and "33 kn" is 33.
pub fn leading_number(field: &str) -> Option<f64> {
    let field = field.trim();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in field.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    field[..end].trim_end_matches('.').parse::<f64>().ok()
}

/// A delivery year must be a whole number.
pub fn parse_year(field: &str) -> Option<i32> {
    let year = leading_number(field)?;
    if year.fract() != 0.0 || year.abs() > i32::MAX as f64 {
        return None;
    }
    Some(year as i32)
}
