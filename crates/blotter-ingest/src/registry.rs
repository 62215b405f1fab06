//! Static definitions of the seven extracts.
//!
//! The pipeline reads a fixed set of files with fixed schemas; nothing
//! here is configurable at runtime. Columns bind positionally, so field
//! order below must match the column order of the extract files.

use blotter_common::tables;
use blotter_engine::{Field, Schema};

/// The extracts are pipe-delimited.
pub const DELIMITER: u8 = b'|';

/// One extract: where it lives, what it is called in the session, and
/// how its columns are typed.
#[derive(Debug, Clone, Copy)]
pub struct DatasetDef {
    pub file_name: &'static str,
    pub table_name: &'static str,
    fields: fn() -> Vec<Field>,
}

impl DatasetDef {
    pub fn schema(&self) -> Schema {
        Schema::new((self.fields)())
    }
}

/// All seven datasets in load order. Dimensions load before the fact
/// table so a truncated drop of files fails on the small ones first.
pub fn datasets() -> [DatasetDef; 7] {
    [
        DatasetDef {
            file_name: "areas.csv",
            table_name: tables::AREAS,
            fields: area_fields,
        },
        DatasetDef {
            file_name: "crimes.csv",
            table_name: tables::CRIMES,
            fields: crime_type_fields,
        },
        DatasetDef {
            file_name: "premises.csv",
            table_name: tables::PREMISES,
            fields: premise_fields,
        },
        DatasetDef {
            file_name: "weapons.csv",
            table_name: tables::WEAPONS,
            fields: weapon_fields,
        },
        DatasetDef {
            file_name: "victim_descent.csv",
            table_name: tables::VICTIM_DESCENT,
            fields: descent_fields,
        },
        DatasetDef {
            file_name: "case_status.csv",
            table_name: tables::CASE_STATUS,
            fields: case_status_fields,
        },
        DatasetDef {
            file_name: "criminal_cases.csv",
            table_name: tables::CRIMINAL_CASES,
            fields: criminal_case_fields,
        },
    ]
}

fn area_fields() -> Vec<Field> {
    vec![Field::integer("area_id"), Field::text("area")]
}

fn crime_type_fields() -> Vec<Field> {
    vec![Field::integer("crime_id"), Field::text("crime_desc")]
}

fn premise_fields() -> Vec<Field> {
    vec![Field::integer("premis_id"), Field::text("premis_desc")]
}

fn weapon_fields() -> Vec<Field> {
    vec![Field::integer("weapon_id"), Field::text("weapon")]
}

fn descent_fields() -> Vec<Field> {
    vec![Field::text("descent_id"), Field::text("descent")]
}

fn case_status_fields() -> Vec<Field> {
    vec![Field::text("status_id"), Field::text("status_desc")]
}

fn criminal_case_fields() -> Vec<Field> {
    vec![
        Field::integer("case_id"),
        Field::date("date_occurred"),
        Field::integer("area_id"),
        Field::integer("crime_id"),
        Field::integer("victim_age"),
        Field::text("victim_sex"),
        Field::text("victim_descent_id"),
        Field::integer("premis_id"),
        Field::integer("weapon_used_id"),
        Field::text("case_status_id"),
    ]
}
