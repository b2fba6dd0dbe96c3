use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};

use crate::error::LoadError;
use crate::yachts::YachtRecord;

pub fn load_yachts(path: &Path) -> Result<Vec<YachtRecord>, LoadError> {
    let file = File::open(path)?;
    let yachts = read_yachts(file)?;
    info!("Loaded {} yachts from {}", yachts.len(), path.display());
    Ok(yachts)
}

/// Reads the yacht table. Title rows above the header are skipped, the header
/// being the first row with a `name` cell.
pub fn read_yachts<R: Read>(reader: R) -> Result<Vec<YachtRecord>, LoadError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut headers: Option<StringRecord> = None;
    let mut yachts = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        if headers.is_none() {
            if row.iter().any(|cell| cell == "name") {
                headers = Some(row);
            }
            continue;
        }
        let Some(headers) = headers.as_ref() else {
            continue;
        };

        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        if row.len() < headers.len() {
            debug!("Skipping short row at {:?}", row.position());
            continue;
        }
        let yacht = to_yacht(headers, &row);
        if yacht.name.is_empty() {
            debug!("Skipping unnamed row at {:?}", row.position());
            continue;
        }
        yachts.push(yacht);
    }

    if headers.is_none() {
        return Err(LoadError::MissingHeader);
    }
    if yachts.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(yachts)
}

fn to_yacht(headers: &StringRecord, row: &StringRecord) -> YachtRecord {
    let mut yacht = YachtRecord::default();
    for (header, cell) in headers.iter().zip(row.iter()) {
        let field = match header {
            "name" => &mut yacht.name,
            "builder" => &mut yacht.builder,
            "value" => &mut yacht.value,
            "owner" => &mut yacht.owner,
            "flag" => &mut yacht.flag,
            "year_delivered" => &mut yacht.year_delivered,
            "refit" => &mut yacht.refit,
            "length" => &mut yacht.length,
            "beam" => &mut yacht.beam,
            "gross_tonnage" => &mut yacht.gross_tonnage,
            "cruising_speed" => &mut yacht.cruising_speed,
            "top_speed" => &mut yacht.top_speed,
            "naval_architect" => &mut yacht.naval_architect,
            "exterior_designer" => &mut yacht.exterior_designer,
            "interior_designer" => &mut yacht.interior_designer,
            "rank" => &mut yacht.rank,
            "profile_picture" => &mut yacht.profile_picture,
            // Index columns and anything we don't know about
            _ => continue,
        };
        *field = cell.to_string();
    }
    yacht
}

/// Used when the table can't be loaded, so there is still something to ask about.
pub fn fallback_yachts() -> Vec<YachtRecord> {
    let yacht = |name: &str,
                 builder: &str,
                 owner: &str,
                 year: &str,
                 length: &str,
                 top_speed: &str| YachtRecord {
        name: name.to_string(),
        builder: builder.to_string(),
        owner: owner.to_string(),
        year_delivered: year.to_string(),
        length: length.to_string(),
        top_speed: top_speed.to_string(),
        ..Default::default()
    };

    let mut azzam = yacht(
        "Azzam",
        "Lürssen Yachts (Germany)",
        "Mohammed bin Zayed Al Nahyan",
        "2013",
        "180.61m",
        "33 kn",
    );
    azzam.value = "600 000 000 $".to_string();
    azzam.flag = "United Arab Emirates".to_string();
    azzam.beam = "20.8m".to_string();
    azzam.gross_tonnage = "13,136".to_string();
    azzam.cruising_speed = "12 kn".to_string();
    azzam.naval_architect = "Lürssen Yachts (Germany)".to_string();
    azzam.exterior_designer = "Nauta Yachts S.R.L (Italy)".to_string();
    azzam.interior_designer = "Christophe Leoni (France)".to_string();
    azzam.rank = "1".to_string();
    azzam.profile_picture = "https://image.yachtcharterfleet.com/w1277/h618/qh/ca/m2/k1aa9e49e/vessel/resource/124097/charter-azzam-yacht.jpg".to_string();

    vec![
        azzam,
        yacht("Eclipse", "Blohm+Voss (Germany)", "Roman Abramovich", "2010", "162.5m", "25 kn"),
        yacht("Dilbar", "Lürssen Yachts (Germany)", "Alisher Usmanov", "2016", "156m", "22.5 kn"),
        yacht("Flying Fox", "Lürssen Yachts (Germany)", "Dmitry Kamenshchik", "2019", "136m", "20 kn"),
        yacht("Koru", "Oceanco (Netherlands)", "Jeff Bezos", "2023", "127m", "18 kn"),
        yacht("Sailing Yacht A", "Nobiskrug (Germany)", "Andrey Melnichenko", "2017", "142.8m", "21 kn"),
        yacht("Al Said", "Lürssen Yachts (Germany)", "Sultan of Oman", "2008", "155m", "22 kn"),
        yacht("Octopus", "Lürssen Yachts (Germany)", "Paul Allen", "2003", "126.2m", "20 kn"),
        yacht("Symphony", "Feadship (Netherlands)", "Bernard Arnault", "2015", "101.5m", "19 kn"),
    ]
}
