//! The five aggregation queries and the report driver.

use crate::relate::index_by;
use blotter_common::{tables, Error, ReportKind, Result};
use blotter_engine::{EngineError, Field, Schema, Session, Table, Value};
use chrono::Datelike;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::info;

/// Run every report in order, logging one line per result. Any query
/// failure aborts the batch; there is no partial set of reports.
pub fn run_all(session: &Session) -> Result<Vec<(ReportKind, Table)>> {
    let mut results = Vec::with_capacity(ReportKind::ALL.len());
    for kind in ReportKind::ALL {
        let started = Instant::now();
        let table = compute(session, kind)?;
        info!(
            report = %kind,
            rows = table.row_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "report computed"
        );
        info!("{kind}\n{}", table.preview(20));
        results.push((kind, table));
    }
    Ok(results)
}

/// Dispatch one report by kind.
pub fn compute(session: &Session, kind: ReportKind) -> Result<Table> {
    match kind {
        ReportKind::CrimesPerArea => crimes_per_area(session),
        ReportKind::TopTenCrimes => top_ten_crime_types(session),
        ReportKind::CrimesPerMonth => crimes_per_month(session),
        ReportKind::CaseStatusPerCrime => case_status_per_crime(session),
        ReportKind::CrimesPerDescentSexAge => crimes_per_descent_sex_age(session),
    }
}

fn build<F>(kind: ReportKind, body: F) -> Result<Table>
where
    F: FnOnce() -> std::result::Result<Table, EngineError>,
{
    body().map_err(|err| Error::aggregation(kind.to_string(), err))
}

/// Crime count per (area, premise description), ordered by area
/// ascending, then count descending. Ties keep premise-ascending order.
pub fn crimes_per_area(session: &Session) -> Result<Table> {
    build(ReportKind::CrimesPerArea, || {
        let cases = session.table(tables::CRIMINAL_CASES)?;
        let areas = index_by(session.table(tables::AREAS)?, "area_id", "area")?;
        let premises = index_by(session.table(tables::PREMISES)?, "premis_id", "premis_desc")?;
        let area_col = cases.column_index("area_id")?;
        let premis_col = cases.column_index("premis_id")?;

        let mut counts: BTreeMap<(Value, Value), i64> = BTreeMap::new();
        for row in cases.rows() {
            let Some(area) = areas.get(&row[area_col]) else {
                continue;
            };
            let Some(premise) = premises.get(&row[premis_col]) else {
                continue;
            };
            *counts
                .entry(((*area).clone(), (*premise).clone()))
                .or_insert(0) += 1;
        }

        let mut grouped: Vec<(Value, Value, i64)> = counts
            .into_iter()
            .map(|((area, premise), n)| (area, premise, n))
            .collect();
        grouped.sort_by(|a, b| a.0.cmp(&b.0).then(b.2.cmp(&a.2)));

        let schema = Schema::new(vec![
            Field::text("Area"),
            Field::text("Premise"),
            Field::integer("NumberOfCrimes"),
        ]);
        Table::from_rows(
            schema,
            grouped
                .into_iter()
                .map(|(area, premise, n)| vec![area, premise, Value::Int(n)])
                .collect(),
        )
    })
}

/// The ten most frequent crime descriptions, count descending. Ties
/// keep description-ascending order, which also pins down the cut at
/// the tenth place.
pub fn top_ten_crime_types(session: &Session) -> Result<Table> {
    build(ReportKind::TopTenCrimes, || {
        let cases = session.table(tables::CRIMINAL_CASES)?;
        let crimes = index_by(session.table(tables::CRIMES)?, "crime_id", "crime_desc")?;
        let crime_col = cases.column_index("crime_id")?;

        let mut counts: BTreeMap<Value, i64> = BTreeMap::new();
        for row in cases.rows() {
            let Some(desc) = crimes.get(&row[crime_col]) else {
                continue;
            };
            *counts.entry((*desc).clone()).or_insert(0) += 1;
        }

        let mut grouped: Vec<(Value, i64)> = counts.into_iter().collect();
        grouped.sort_by(|a, b| b.1.cmp(&a.1));
        grouped.truncate(10);

        let schema = Schema::new(vec![
            Field::text("Top10Crimes"),
            Field::integer("NumberOfCrimes"),
        ]);
        Table::from_rows(
            schema,
            grouped
                .into_iter()
                .map(|(desc, n)| vec![desc, Value::Int(n)])
                .collect(),
        )
    })
}

/// Crime count per (year, month) of the occurrence date, both
/// ascending with nulls first. Undated cases surface as one
/// (null, null) group whose count stays 0, since only non-null months
/// are counted.
pub fn crimes_per_month(session: &Session) -> Result<Table> {
    build(ReportKind::CrimesPerMonth, || {
        let cases = session.table(tables::CRIMINAL_CASES)?;
        let date_col = cases.column_index("date_occurred")?;

        let mut counts: BTreeMap<(Value, Value), i64> = BTreeMap::new();
        for row in cases.rows() {
            match row[date_col].as_date() {
                Some(date) => {
                    *counts
                        .entry((
                            Value::Int(i64::from(date.year())),
                            Value::Int(i64::from(date.month())),
                        ))
                        .or_insert(0) += 1;
                }
                // The group appears without contributing to any count.
                None => {
                    counts.entry((Value::Null, Value::Null)).or_insert(0);
                }
            }
        }

        let schema = Schema::new(vec![
            Field::integer("Year"),
            Field::integer("Month"),
            Field::integer("CrimesPerMonth"),
        ]);
        Table::from_rows(
            schema,
            counts
                .into_iter()
                .map(|((year, month), n)| vec![year, month, Value::Int(n)])
                .collect(),
        )
    })
}

/// Crime count per (crime description, case status description), both
/// ascending.
pub fn case_status_per_crime(session: &Session) -> Result<Table> {
    build(ReportKind::CaseStatusPerCrime, || {
        let cases = session.table(tables::CRIMINAL_CASES)?;
        let crimes = index_by(session.table(tables::CRIMES)?, "crime_id", "crime_desc")?;
        let statuses = index_by(
            session.table(tables::CASE_STATUS)?,
            "status_id",
            "status_desc",
        )?;
        let crime_col = cases.column_index("crime_id")?;
        let status_col = cases.column_index("case_status_id")?;

        let mut counts: BTreeMap<(Value, Value), i64> = BTreeMap::new();
        for row in cases.rows() {
            let Some(crime) = crimes.get(&row[crime_col]) else {
                continue;
            };
            let Some(status) = statuses.get(&row[status_col]) else {
                continue;
            };
            *counts
                .entry(((*crime).clone(), (*status).clone()))
                .or_insert(0) += 1;
        }

        let schema = Schema::new(vec![
            Field::text("Crime"),
            Field::text("CaseStatus"),
            Field::integer("NumberOfCrimes"),
        ]);
        Table::from_rows(
            schema,
            counts
                .into_iter()
                .map(|((crime, status), n)| vec![crime, status, Value::Int(n)])
                .collect(),
        )
    })
}

/// Full grouping cube over (descent, sex, age): the union of the eight
/// dimension-subset group-bys, with omitted dimensions emitted as null
/// rollup markers. Grouping sets aggregate independently, so a data
/// null in sex or age prints like a rollup marker yet keeps its own
/// row and count. Cases whose descent code does not resolve are
/// dropped by the inner join, including null descent codes.
pub fn crimes_per_descent_sex_age(session: &Session) -> Result<Table> {
    build(ReportKind::CrimesPerDescentSexAge, || {
        let cases = session.table(tables::CRIMINAL_CASES)?;
        let descents = index_by(
            session.table(tables::VICTIM_DESCENT)?,
            "descent_id",
            "descent",
        )?;
        let descent_col = cases.column_index("victim_descent_id")?;
        let sex_col = cases.column_index("victim_sex")?;
        let age_col = cases.column_index("victim_age")?;

        // Keyed by (grouping set, masked tuple): a data-level null must
        // not merge with the rollup marker of another grouping set.
        let mut counts: BTreeMap<(u8, Vec<Value>), i64> = BTreeMap::new();
        for row in cases.rows() {
            let Some(descent) = descents.get(&row[descent_col]) else {
                continue;
            };
            let detail = [
                (*descent).clone(),
                row[sex_col].clone(),
                row[age_col].clone(),
            ];
            for mask in 0u8..8 {
                let key: Vec<Value> = detail
                    .iter()
                    .enumerate()
                    .map(|(dim, value)| {
                        if mask & (1 << dim) != 0 {
                            Value::Null
                        } else {
                            value.clone()
                        }
                    })
                    .collect();
                *counts.entry((mask, key)).or_insert(0) += 1;
            }
        }

        let schema = Schema::new(vec![
            Field::text("Descent"),
            Field::text("Sex"),
            Field::integer("Age"),
            Field::integer("NumberOfCrimes"),
        ]);
        Table::from_rows(
            schema,
            counts
                .into_iter()
                .map(|((_, mut key), n)| {
                    key.push(Value::Int(n));
                    key
                })
                .collect(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn text(s: &str) -> Value {
        Value::Text(s.into())
    }

    fn int_dim(key: &str, desc: &str, rows: &[(i64, &str)]) -> Table {
        let schema = Schema::new(vec![Field::integer(key), Field::text(desc)]);
        Table::from_rows(
            schema,
            rows.iter()
                .map(|(id, name)| vec![Value::Int(*id), text(name)])
                .collect(),
        )
        .unwrap()
    }

    fn text_dim(key: &str, desc: &str, rows: &[(&str, &str)]) -> Table {
        let schema = Schema::new(vec![Field::text(key), Field::text(desc)]);
        Table::from_rows(
            schema,
            rows.iter()
                .map(|(id, name)| vec![text(id), text(name)])
                .collect(),
        )
        .unwrap()
    }

    fn fact_schema() -> Schema {
        Schema::new(vec![
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
        ])
    }

    #[allow(clippy::too_many_arguments)]
    fn case_row(
        id: i64,
        date: Option<&str>,
        area: i64,
        crime: i64,
        age: Option<i64>,
        sex: Option<&str>,
        descent: Option<&str>,
        premis: i64,
        status: &str,
    ) -> Vec<Value> {
        let date = match date {
            Some(d) => Value::Date(NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
            None => Value::Null,
        };
        vec![
            Value::Int(id),
            date,
            Value::Int(area),
            Value::Int(crime),
            age.map(Value::Int).unwrap_or(Value::Null),
            sex.map(text).unwrap_or(Value::Null),
            descent.map(text).unwrap_or(Value::Null),
            Value::Int(premis),
            Value::Null,
            text(status),
        ]
    }

    fn session_with(cases: Vec<Vec<Value>>) -> Session {
        let mut session = Session::open("ReportTests").unwrap();
        session.register(
            tables::AREAS,
            int_dim("area_id", "area", &[(1, "Central"), (2, "Harbor")]),
        );
        session.register(
            tables::CRIMES,
            int_dim(
                "crime_id",
                "crime_desc",
                &[(624, "Battery"), (510, "Vehicle Stolen"), (330, "Burglary")],
            ),
        );
        session.register(
            tables::PREMISES,
            int_dim("premis_id", "premis_desc", &[(101, "Street"), (102, "Alley")]),
        );
        session.register(
            tables::VICTIM_DESCENT,
            text_dim("descent_id", "descent", &[("H", "Hispanic"), ("W", "White")]),
        );
        session.register(
            tables::CASE_STATUS,
            text_dim(
                "status_id",
                "status_desc",
                &[("IC", "Invest Cont"), ("AA", "Adult Arrest")],
            ),
        );
        session.register(
            tables::CRIMINAL_CASES,
            Table::from_rows(fact_schema(), cases).unwrap(),
        );
        session
    }

    fn scenario_session() -> Session {
        session_with(vec![
            case_row(1, Some("2020-03-07"), 1, 624, Some(34), Some("M"), Some("H"), 101, "IC"),
            case_row(2, Some("2020-03-21"), 1, 624, Some(41), Some("F"), Some("H"), 101, "IC"),
            case_row(3, Some("2020-04-02"), 1, 510, Some(29), Some("M"), Some("W"), 101, "AA"),
        ])
    }

    #[test]
    fn area_report_collapses_the_scenario_to_one_row() {
        let table = crimes_per_area(&scenario_session()).unwrap();
        assert_eq!(
            table.schema().header(),
            vec!["Area", "Premise", "NumberOfCrimes"]
        );
        assert_eq!(
            table.rows(),
            &[vec![text("Central"), text("Street"), Value::Int(3)]]
        );
    }

    #[test]
    fn month_report_splits_the_scenario_by_month() {
        let table = crimes_per_month(&scenario_session()).unwrap();
        assert_eq!(
            table.schema().header(),
            vec!["Year", "Month", "CrimesPerMonth"]
        );
        assert_eq!(
            table.rows(),
            &[
                vec![Value::Int(2020), Value::Int(3), Value::Int(2)],
                vec![Value::Int(2020), Value::Int(4), Value::Int(1)],
            ]
        );
    }

    #[test]
    fn area_report_orders_by_area_then_count_descending() {
        let session = session_with(vec![
            case_row(1, Some("2020-01-01"), 1, 624, None, None, None, 101, "IC"),
            case_row(2, Some("2020-01-02"), 1, 624, None, None, None, 102, "IC"),
            case_row(3, Some("2020-01-03"), 1, 624, None, None, None, 102, "IC"),
            case_row(4, Some("2020-01-04"), 2, 624, None, None, None, 101, "IC"),
        ]);
        let table = crimes_per_area(&session).unwrap();
        assert_eq!(
            table.rows(),
            &[
                vec![text("Central"), text("Alley"), Value::Int(2)],
                vec![text("Central"), text("Street"), Value::Int(1)],
                vec![text("Harbor"), text("Street"), Value::Int(1)],
            ]
        );
    }

    #[test]
    fn dangling_foreign_keys_drop_out_of_joined_reports_only() {
        let session = session_with(vec![
            case_row(1, Some("2020-01-01"), 1, 624, None, None, None, 101, "IC"),
            case_row(2, Some("2020-01-02"), 1, 624, None, None, None, 999, "IC"),
        ]);
        let areas = crimes_per_area(&session).unwrap();
        let total: i64 = areas
            .rows()
            .iter()
            .filter_map(|row| row[2].as_int())
            .sum();
        assert_eq!(total, 1);

        let months = crimes_per_month(&session).unwrap();
        let total: i64 = months
            .rows()
            .iter()
            .filter_map(|row| row[2].as_int())
            .sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn top_ten_sorts_by_count_descending_with_stable_ties() {
        let session = session_with(vec![
            case_row(1, Some("2020-01-01"), 1, 510, None, None, None, 101, "IC"),
            case_row(2, Some("2020-01-02"), 1, 624, None, None, None, 101, "IC"),
            case_row(3, Some("2020-01-03"), 1, 624, None, None, None, 101, "IC"),
            case_row(4, Some("2020-01-04"), 1, 330, None, None, None, 101, "IC"),
        ]);
        let table = top_ten_crime_types(&session).unwrap();
        assert_eq!(
            table.schema().header(),
            vec!["Top10Crimes", "NumberOfCrimes"]
        );
        assert_eq!(
            table.rows(),
            &[
                vec![text("Battery"), Value::Int(2)],
                vec![text("Burglary"), Value::Int(1)],
                vec![text("Vehicle Stolen"), Value::Int(1)],
            ]
        );
    }

    #[test]
    fn top_ten_truncates_to_ten_rows() {
        let cases: Vec<Vec<Value>> = (1..=11)
            .map(|i| case_row(i, Some("2020-01-01"), 1, 100 + i, None, None, None, 101, "IC"))
            .collect();
        let mut session = session_with(cases);
        let schema = Schema::new(vec![Field::integer("crime_id"), Field::text("crime_desc")]);
        let rows = (1..=11)
            .map(|i| vec![Value::Int(100 + i), Value::Text(format!("C{i:02}"))])
            .collect();
        session.register(tables::CRIMES, Table::from_rows(schema, rows).unwrap());

        let table = top_ten_crime_types(&session).unwrap();
        assert_eq!(table.row_count(), 10);
        assert_eq!(table.rows()[0][0], text("C01"));
        assert_eq!(table.rows()[9][0], text("C10"));
    }

    #[test]
    fn undated_cases_surface_as_a_zero_count_group() {
        let session = session_with(vec![
            case_row(1, Some("2020-01-01"), 1, 624, None, None, None, 101, "IC"),
            case_row(2, None, 1, 624, None, None, None, 101, "IC"),
            case_row(3, None, 1, 624, None, None, None, 101, "IC"),
        ]);
        let table = crimes_per_month(&session).unwrap();
        assert_eq!(
            table.rows(),
            &[
                vec![Value::Null, Value::Null, Value::Int(0)],
                vec![Value::Int(2020), Value::Int(1), Value::Int(1)],
            ]
        );
    }

    #[test]
    fn status_report_orders_both_keys_ascending() {
        let session = session_with(vec![
            case_row(1, Some("2020-01-01"), 1, 624, None, None, None, 101, "IC"),
            case_row(2, Some("2020-01-02"), 1, 624, None, None, None, 101, "AA"),
            case_row(3, Some("2020-01-03"), 1, 330, None, None, None, 101, "IC"),
        ]);
        let table = case_status_per_crime(&session).unwrap();
        assert_eq!(
            table.schema().header(),
            vec!["Crime", "CaseStatus", "NumberOfCrimes"]
        );
        assert_eq!(
            table.rows(),
            &[
                vec![text("Battery"), text("Adult Arrest"), Value::Int(1)],
                vec![text("Battery"), text("Invest Cont"), Value::Int(1)],
                vec![text("Burglary"), text("Invest Cont"), Value::Int(1)],
            ]
        );
    }

    #[test]
    fn cube_emits_eight_rollups_for_a_single_combination() {
        let session = session_with(vec![case_row(
            1,
            Some("2020-01-01"),
            1,
            624,
            Some(34),
            Some("M"),
            Some("H"),
            101,
            "IC",
        )]);
        let table = crimes_per_descent_sex_age(&session).unwrap();
        assert_eq!(
            table.schema().header(),
            vec!["Descent", "Sex", "Age", "NumberOfCrimes"]
        );
        assert_eq!(table.row_count(), 8);

        let rows = table.rows();
        let has = |descent: Value, sex: Value, age: Value| {
            rows.iter()
                .any(|row| row[0] == descent && row[1] == sex && row[2] == age)
        };
        assert!(has(text("Hispanic"), text("M"), Value::Int(34)));
        assert!(has(Value::Null, Value::Null, Value::Null));
        assert!(has(text("Hispanic"), Value::Null, Value::Null));
        assert!(has(Value::Null, text("M"), Value::Int(34)));
        assert!(rows.iter().all(|row| row[3] == Value::Int(1)));
    }

    #[test]
    fn cube_aggregates_repeated_combinations() {
        let session = session_with(vec![
            case_row(1, Some("2020-01-01"), 1, 624, Some(34), Some("M"), Some("H"), 101, "IC"),
            case_row(2, Some("2020-01-02"), 1, 624, Some(34), Some("M"), Some("H"), 101, "IC"),
        ]);
        let table = crimes_per_descent_sex_age(&session).unwrap();
        assert_eq!(table.row_count(), 8);
        assert!(table.rows().iter().all(|row| row[3] == Value::Int(2)));
    }

    #[test]
    fn cube_keeps_data_null_groups_separate_from_rollups() {
        let session = session_with(vec![
            case_row(1, Some("2020-01-01"), 1, 624, Some(34), Some("M"), Some("H"), 101, "IC"),
            case_row(2, Some("2020-01-02"), 1, 624, Some(34), None, Some("H"), 101, "IC"),
        ]);
        let table = crimes_per_descent_sex_age(&session).unwrap();

        // Two joined cases, so no single group may count more than two.
        assert!(table
            .rows()
            .iter()
            .all(|row| row[3].as_int().unwrap() <= 2));
        assert_eq!(table.row_count(), 12);

        // The null-sex data group and the sex rollup print alike but
        // stay separate rows: count 1 for the data group, 2 for the
        // rollup. The same split holds at the grand total.
        let counts_at = |descent: Value, sex: Value, age: Value| {
            let mut counts: Vec<i64> = table
                .rows()
                .iter()
                .filter(|row| row[0] == descent && row[1] == sex && row[2] == age)
                .filter_map(|row| row[3].as_int())
                .collect();
            counts.sort_unstable();
            counts
        };
        assert_eq!(
            counts_at(text("Hispanic"), Value::Null, Value::Int(34)),
            vec![1, 2]
        );
        assert_eq!(
            counts_at(Value::Null, Value::Null, Value::Null),
            vec![1, 2]
        );
    }

    #[test]
    fn cube_drops_cases_without_a_resolvable_descent() {
        let session = session_with(vec![case_row(
            1,
            Some("2020-01-01"),
            1,
            624,
            Some(34),
            Some("M"),
            None,
            101,
            "IC",
        )]);
        let table = crimes_per_descent_sex_age(&session).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn run_all_yields_the_five_reports_in_order() {
        let results = run_all(&scenario_session()).unwrap();
        let kinds: Vec<ReportKind> = results.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(kinds, ReportKind::ALL);
        for (_, table) in &results {
            assert!(!table.schema().is_empty());
        }
    }
}
