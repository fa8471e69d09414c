//! Parsing of the legacy deviation matrix sheet.
//!
//! The sheet is a flat table where a deviation spans several rows: the first row carries the
//! deviation fields, follow-up rows carry one action each and leave the deviation cells blank.
//! Those blanks inherit the value seen above them, so parsing folds over the rows with a carry
//! of the deviation-level cells.

use chrono::NaiveDate;
use indexmap::IndexMap;
use std::io::Read;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Column {
    PrimaryColumn,
    Year,
    DevNumber,
    CreatedBy,
    OwnerPlant,
    AffectedPlant,
    Sbu,
    ReleaseDate,
    EffectivityDate,
    ExpirationDate,
    DrawingNumber,
    BackToBackDeviation,
    DefectCategory,
    AssemblyDefectType,
    MoldingDefectType,
    ActionDescription,
    ActionResponsible,
    ActionExpirationDate,
}

/// Map a sheet header to the column it feeds. Headers are matched after trimming, unknown
/// columns are ignored.
fn column_for(header: &str) -> Option<Column> {
    Some(match header {
        "Primary Column" => Column::PrimaryColumn,
        "Year" => Column::Year,
        "DEV NUMBER" => Column::DevNumber,
        "Created By" => Column::CreatedBy,
        "Owner Plant" => Column::OwnerPlant,
        "Affected Plant" => Column::AffectedPlant,
        "SBU" => Column::Sbu,
        "Release Date" => Column::ReleaseDate,
        "Effectivity Date" => Column::EffectivityDate,
        "Expiration Date" => Column::ExpirationDate,
        "Drawing Number" => Column::DrawingNumber,
        "Back to Back Deviation" => Column::BackToBackDeviation,
        "Defect Category" => Column::DefectCategory,
        "Assembly Defect Type" => Column::AssemblyDefectType,
        "Molding Defect Type" => Column::MoldingDefectType,
        "Actions" => Column::ActionDescription,
        "Action Responsible" => Column::ActionResponsible,
        "Action Expiration Date" => Column::ActionExpirationDate,
        _ => return None,
    })
}

/// One deviation as assembled from the sheet, with the actions of all of its rows.
///
/// Fields are `None` when the sheet never provided a value. The date fields carry a second
/// level: `Some(None)` means the cell was present but unparseable, which overwrites an
/// existing date with "empty" on re-import, while an absent cell leaves it alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SheetDeviation {
    pub dev_number: String,
    pub primary_column: Option<String>,
    pub year: Option<i32>,
    pub created_by: Option<String>,
    pub owner_plant: Option<String>,
    pub affected_plant: Option<String>,
    pub sbu: Option<String>,
    pub release_date: Option<Option<NaiveDate>>,
    pub effectivity_date: Option<Option<NaiveDate>>,
    pub expiration_date: Option<Option<NaiveDate>>,
    pub drawing_number: Option<String>,
    pub back_to_back_deviation: Option<bool>,
    pub defect_category: Option<String>,
    pub assembly_defect_type: Option<String>,
    pub molding_defect_type: Option<String>,
    pub actions: Vec<SheetAction>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetAction {
    pub description: String,
    pub responsible: String,
    pub due_date: Option<NaiveDate>,
}

/// The raw deviation-level cells seen so far.
///
/// Values are kept unparsed. A cell holding garbage still fills the rows below it, and turns
/// into `None` only when the group snapshot converts it.
#[derive(Clone, Debug, Default)]
struct Carry {
    dev_number: Option<String>,
    primary_column: Option<String>,
    year: Option<String>,
    created_by: Option<String>,
    owner_plant: Option<String>,
    affected_plant: Option<String>,
    sbu: Option<String>,
    release_date: Option<String>,
    effectivity_date: Option<String>,
    expiration_date: Option<String>,
    drawing_number: Option<String>,
    back_to_back_deviation: Option<String>,
    defect_category: Option<String>,
    assembly_defect_type: Option<String>,
    molding_defect_type: Option<String>,
}

impl Carry {
    fn set(&mut self, column: Column, value: String) {
        match column {
            Column::DevNumber => self.dev_number = Some(value),
            Column::PrimaryColumn => self.primary_column = Some(value),
            Column::Year => self.year = Some(value),
            Column::CreatedBy => self.created_by = Some(value),
            Column::OwnerPlant => self.owner_plant = Some(value),
            Column::AffectedPlant => self.affected_plant = Some(value),
            Column::Sbu => self.sbu = Some(value),
            Column::ReleaseDate => self.release_date = Some(value),
            Column::EffectivityDate => self.effectivity_date = Some(value),
            Column::ExpirationDate => self.expiration_date = Some(value),
            Column::DrawingNumber => self.drawing_number = Some(value),
            Column::BackToBackDeviation => self.back_to_back_deviation = Some(value),
            Column::DefectCategory => self.defect_category = Some(value),
            Column::AssemblyDefectType => self.assembly_defect_type = Some(value),
            Column::MoldingDefectType => self.molding_defect_type = Some(value),
            Column::ActionDescription
            | Column::ActionResponsible
            | Column::ActionExpirationDate => {}
        }
    }

    fn snapshot(&self, dev_number: String) -> SheetDeviation {
        SheetDeviation {
            dev_number,
            primary_column: self.primary_column.clone(),
            year: self.year.as_deref().and_then(parse_year),
            created_by: self.created_by.clone(),
            owner_plant: self.owner_plant.clone(),
            affected_plant: self.affected_plant.clone(),
            sbu: self.sbu.clone(),
            release_date: self.release_date.as_deref().map(parse_date),
            effectivity_date: self.effectivity_date.as_deref().map(parse_date),
            expiration_date: self.expiration_date.as_deref().map(parse_date),
            drawing_number: self.drawing_number.clone(),
            back_to_back_deviation: self
                .back_to_back_deviation
                .as_deref()
                .map(|value| value.eq_ignore_ascii_case("true")),
            defect_category: self.defect_category.clone(),
            assembly_defect_type: self.assembly_defect_type.clone(),
            molding_defect_type: self.molding_defect_type.clone(),
            actions: Vec::new(),
        }
    }
}

/// Parse a CSV export of the deviation matrix.
///
/// Returns the deviations in first-seen order. A deviation's fields come from the first row it
/// appears on, its actions from every one of its rows carrying both a description and a
/// responsible party. Rows without a dev_number, even after the fill, are dropped.
pub fn parse_sheet<R: Read>(reader: R) -> Result<Vec<SheetDeviation>, csv::Error> {
    let mut reader = csv::Reader::from_reader(reader);

    let columns = reader
        .headers()?
        .iter()
        .map(|header| column_for(header.trim()))
        .collect::<Vec<_>>();

    let mut carry = Carry::default();
    let mut groups: IndexMap<String, SheetDeviation> = IndexMap::new();

    for record in reader.records() {
        let record = record?;

        let mut description = None;
        let mut responsible = None;
        let mut due_date = None;

        for (index, value) in record.iter().enumerate() {
            let Some(Some(column)) = columns.get(index) else {
                continue;
            };
            let value = value.trim();

            match column {
                // action cells belong to their row and are not carried forward
                Column::ActionDescription => description = non_blank(value),
                Column::ActionResponsible => responsible = non_blank(value),
                Column::ActionExpirationDate => due_date = non_blank(value),
                _ => {
                    if let Some(value) = non_blank(value) {
                        carry.set(*column, value);
                    }
                }
            }
        }

        let Some(dev_number) = carry.dev_number.clone() else {
            continue;
        };

        let group = groups
            .entry(dev_number.clone())
            .or_insert_with(|| carry.snapshot(dev_number));

        if let (Some(description), Some(responsible)) = (description, responsible) {
            group.actions.push(SheetAction {
                description,
                responsible,
                due_date: due_date.as_deref().and_then(parse_date),
            });
        }
    }

    Ok(groups.into_values().collect())
}

fn non_blank(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_year(value: &str) -> Option<i32> {
    value
        .parse()
        .ok()
        // sheets exported through spreadsheet tools render integer cells as floats
        .or_else(|| value.parse::<f64>().ok().map(|year| year as i32))
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%d.%m.%Y",
];

/// Lenient date parsing. Anything unparseable is treated as an empty cell.
fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}
